use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Axis, CoordinateRange, SliceLabel},
        error::{SliceStripError, SliceStripResult},
    },
    naming::{canonical_slice_path, capture_prefix, rendered_path},
    render::{CaptureRequest, VolumeRenderer},
};

/// Everything needed to capture one mask's slice series.
#[derive(Clone, Debug)]
pub struct CaptureJob<'a> {
    pub template: &'a Path,
    pub mask: &'a Path,
    /// Mask base name used in every output file name.
    pub base: &'a str,
    pub out_dir: &'a Path,
    pub range: CoordinateRange,
    pub axis: Axis,
}

/// Capture one PNG per coordinate of `job.range` and rename each to
/// `{base}_slice_{label}.png`.
///
/// Returns the canonical slice paths in capture order. The slice counter starts at 0 for
/// every call and advances once per coordinate.
pub fn capture_slices(
    renderer: &mut dyn VolumeRenderer,
    job: &CaptureJob<'_>,
) -> SliceStripResult<Vec<PathBuf>> {
    job.range.validate()?;
    if job.range.is_empty() {
        return Err(SliceStripError::validation(format!(
            "coordinate range {} -> {} by {} contains no slices",
            job.range.start, job.range.end, job.range.step
        )));
    }

    let mut slices = Vec::new();
    for (cnt, coord) in job.range.iter().enumerate() {
        let label = SliceLabel(cnt);
        let prefix = capture_prefix(job.base, label);
        let request = CaptureRequest {
            template: job.template,
            overlay: job.mask,
            focal: job.axis.focal_point(coord),
            axis: job.axis,
            out_dir: job.out_dir,
            prefix: &prefix,
        };

        let rendered = renderer.capture_slice(&request)?;
        let expected = rendered_path(job.out_dir, &prefix);
        if rendered != expected {
            return Err(SliceStripError::validation(format!(
                "renderer wrote '{}', expected '{}'",
                rendered.display(),
                expected.display()
            )));
        }

        let slice = canonical_slice_path(&rendered)?;
        std::fs::rename(&rendered, &slice).with_context(|| {
            format!(
                "rename '{}' to '{}'",
                rendered.display(),
                slice.display()
            )
        })?;

        tracing::debug!(
            slice = %slice.display(),
            coord,
            focal = %request.focal,
            "captured slice"
        );
        slices.push(slice);
    }

    Ok(slices)
}
