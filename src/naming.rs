//! File naming shared by the capture, transparency and montage stages.
//!
//! Every artifact lives flat in the output directory:
//!
//! - `{base}_slice_{label}-0000.png` as written by the renderer
//! - `{base}_slice_{label}.png` after renaming
//! - `{base}_merged.png` for the montage

use std::path::{Path, PathBuf};

use crate::foundation::{
    core::SliceLabel,
    error::{SliceStripError, SliceStripResult},
};

/// Frame suffix the renderer appends to a capture prefix.
pub const RENDERER_FRAME_SUFFIX: &str = "0000.png";

/// Base name of a mask file: everything before the first `.` of the file name.
///
/// `left.nii.gz` and `left.nii` both map to `left`.
pub fn mask_base_name(path: &Path) -> SliceStripResult<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SliceStripError::validation(format!(
                "mask file name is not valid UTF-8: '{}'",
                path.display()
            ))
        })?;
    let base = file_name.split('.').next().unwrap_or_default();
    if base.is_empty() {
        return Err(SliceStripError::validation(format!(
            "mask file '{}' has an empty base name",
            path.display()
        )));
    }
    Ok(base.to_string())
}

/// Canonical volume rendered for a mask base name.
pub fn canonical_mask_path(input_dir: &Path, base: &str) -> PathBuf {
    input_dir.join(format!("{base}.nii"))
}

/// Prefix handed to the renderer for one capture.
pub fn capture_prefix(base: &str, label: SliceLabel) -> String {
    format!("{base}_slice_{label}-")
}

/// Path the renderer is expected to produce for `prefix`.
pub fn rendered_path(out_dir: &Path, prefix: &str) -> PathBuf {
    out_dir.join(format!("{prefix}{RENDERER_FRAME_SUFFIX}"))
}

pub fn slice_file_name(base: &str, label: SliceLabel) -> String {
    format!("{base}_slice_{label}.png")
}

pub fn merged_file_name(base: &str) -> String {
    format!("{base}_merged.png")
}

/// Strip the renderer's `-0000.png` tail from a captured file and re-append `.png`.
pub fn canonical_slice_path(rendered: &Path) -> SliceStripResult<PathBuf> {
    let name = rendered
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            SliceStripError::validation(format!(
                "renderer output has no usable file name: '{}'",
                rendered.display()
            ))
        })?;

    let tail = format!("-{RENDERER_FRAME_SUFFIX}");
    let stem = name
        .strip_suffix(&tail)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            SliceStripError::validation(format!(
                "renderer output '{name}' does not end with '{tail}'"
            ))
        })?;

    Ok(rendered.with_file_name(format!("{stem}.png")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_name_stops_at_first_dot() {
        assert_eq!(mask_base_name(Path::new("masks/left.nii")).unwrap(), "left");
        assert_eq!(mask_base_name(Path::new("masks/left.nii.gz")).unwrap(), "left");
        assert_eq!(mask_base_name(Path::new("noext")).unwrap(), "noext");
        assert!(mask_base_name(Path::new("masks/.hidden")).is_err());
    }

    #[test]
    fn canonical_mask_is_dot_nii() {
        assert_eq!(
            canonical_mask_path(Path::new("masks"), "left"),
            Path::new("masks").join("left.nii")
        );
    }

    #[test]
    fn capture_names_follow_label() {
        assert_eq!(capture_prefix("left", SliceLabel(3)), "left_slice_03-");
        assert_eq!(
            rendered_path(Path::new("out"), "left_slice_03-"),
            Path::new("out").join("left_slice_03-0000.png")
        );
        assert_eq!(slice_file_name("left", SliceLabel(12)), "left_slice_12.png");
        assert_eq!(merged_file_name("left"), "left_merged.png");
    }

    #[test]
    fn renderer_output_is_renamed_to_canonical_slice() {
        let rendered = Path::new("out").join("brain_slice_07-0000.png");
        assert_eq!(
            canonical_slice_path(&rendered).unwrap(),
            Path::new("out").join("brain_slice_07.png")
        );
    }

    #[test]
    fn unexpected_renderer_output_is_rejected() {
        assert!(canonical_slice_path(Path::new("out/brain_slice_07-0001.png")).is_err());
        assert!(canonical_slice_path(Path::new("out/brain_slice_07.png")).is_err());
        assert!(canonical_slice_path(Path::new("out/-0000.png")).is_err());
    }
}
