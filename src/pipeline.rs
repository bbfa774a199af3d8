use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    capture::{CaptureJob, capture_slices},
    foundation::{
        core::{Axis, CoordinateRange},
        error::{SliceStripError, SliceStripResult},
    },
    montage::compose_montage,
    naming::{canonical_mask_path, mask_base_name},
    raster::RasterTool,
    render::VolumeRenderer,
    report::{MaskReport, RunReport},
    transparency::key_out_slices,
};

/// Inputs of a whole run.
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    pub template: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub range: CoordinateRange,
    pub axis: Axis,
}

impl PipelineOpts {
    pub fn validate(&self) -> SliceStripResult<()> {
        if !self.template.exists() {
            return Err(SliceStripError::missing_input(&self.template));
        }
        if !self.input_dir.is_dir() {
            return Err(SliceStripError::missing_input(&self.input_dir));
        }
        self.range.validate()?;
        if self.range.is_empty() {
            return Err(SliceStripError::validation(format!(
                "increment {} never reaches {} from {}",
                self.range.step, self.range.end, self.range.start
            )));
        }
        Ok(())
    }
}

/// A mask discovered in the input directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskInput {
    pub base: String,
    /// `{input_dir}/{base}.nii`
    pub path: PathBuf,
}

/// Create the output directory (and parents) when missing.
pub fn ensure_output_dir(path: &Path) -> SliceStripResult<()> {
    if !path.is_dir() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create output directory '{}'", path.display()))?;
        tracing::info!(dir = %path.display(), "created output directory");
    }
    Ok(())
}

/// List the masks of `input_dir`, one per base name, sorted by base name.
///
/// Directories and dot-files are skipped. Every base name must have a `{base}.nii`.
pub fn discover_masks(input_dir: &Path) -> SliceStripResult<Vec<MaskInput>> {
    let entries = std::fs::read_dir(input_dir)
        .with_context(|| format!("list mask directory '{}'", input_dir.display()))?;

    let mut by_base = BTreeMap::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("list mask directory '{}'", input_dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let base = mask_base_name(&path)?;
        by_base
            .entry(base.clone())
            .or_insert_with(|| canonical_mask_path(input_dir, &base));
    }

    let mut masks = Vec::with_capacity(by_base.len());
    for (base, path) in by_base {
        if !path.exists() {
            return Err(SliceStripError::missing_input(path));
        }
        masks.push(MaskInput { base, path });
    }
    Ok(masks)
}

/// Capture, key out and merge one mask.
#[tracing::instrument(skip_all, fields(mask = %mask.base))]
pub fn process_mask(
    opts: &PipelineOpts,
    mask: &MaskInput,
    renderer: &mut dyn VolumeRenderer,
    raster: &dyn RasterTool,
) -> SliceStripResult<MaskReport> {
    let job = CaptureJob {
        template: &opts.template,
        mask: &mask.path,
        base: &mask.base,
        out_dir: &opts.output_dir,
        range: opts.range,
        axis: opts.axis,
    };
    let captured = capture_slices(renderer, &job)?;
    let slices = key_out_slices(raster, &captured)?;
    let merged = compose_montage(raster, &opts.output_dir, &mask.base, &slices)?;

    let merged_size = match image::image_dimensions(&merged) {
        Ok((w, h)) => Some([w, h]),
        Err(e) => {
            tracing::warn!(merged = %merged.display(), "could not read merged image: {e}");
            None
        }
    };

    tracing::info!(
        slices = slices.len(),
        merged = %merged.display(),
        "mask done"
    );

    Ok(MaskReport {
        name: mask.base.clone(),
        input: mask.path.clone(),
        slices,
        merged,
        merged_size,
    })
}

/// Run every mask of `opts.input_dir` through capture, transparency and montage.
///
/// Masks are processed in base-name order; the first error aborts the run.
pub fn run_pipeline(
    opts: &PipelineOpts,
    renderer: &mut dyn VolumeRenderer,
    raster: &dyn RasterTool,
) -> SliceStripResult<RunReport> {
    opts.validate()?;
    ensure_output_dir(&opts.output_dir)?;

    let masks = discover_masks(&opts.input_dir)?;
    if masks.is_empty() {
        tracing::warn!(dir = %opts.input_dir.display(), "no mask files found");
    }
    tracing::info!(
        masks = masks.len(),
        slices_per_mask = opts.range.len(),
        axis = %opts.axis,
        "starting run"
    );

    let mut reports = Vec::with_capacity(masks.len());
    for mask in &masks {
        reports.push(process_mask(opts, mask, renderer, raster)?);
    }

    Ok(RunReport {
        template: opts.template.clone(),
        output_dir: opts.output_dir.clone(),
        axis: opts.axis,
        range: opts.range,
        masks: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = PathBuf::from("target").join("pipeline_unit").join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn discover_dedupes_bases_and_skips_dirs() {
        let dir = scratch("discover");
        for name in ["right.nii", "left.nii", "left.nii.gz", ".DS_Store"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }
        std::fs::create_dir_all(dir.join("sub.nii")).unwrap();

        let masks = discover_masks(&dir).unwrap();
        let bases: Vec<&str> = masks.iter().map(|m| m.base.as_str()).collect();
        assert_eq!(bases, ["left", "right"]);
        assert_eq!(masks[0].path, dir.join("left.nii"));
    }

    #[test]
    fn discover_requires_canonical_nii() {
        let dir = scratch("discover_missing");
        std::fs::write(dir.join("only.nii.gz"), b"").unwrap();
        let err = discover_masks(&dir).unwrap_err();
        assert!(matches!(err, SliceStripError::MissingInput(p) if p == dir.join("only.nii")));
    }

    #[test]
    fn ensure_output_dir_creates_nested_dirs() {
        let dir = scratch("ensure_out").join("a").join("b");
        ensure_output_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_output_dir(&dir).unwrap();
    }

    #[test]
    fn validate_rejects_missing_template_and_empty_range() {
        let dir = scratch("validate");
        let template = dir.join("t.nii");
        let opts = PipelineOpts {
            template: template.clone(),
            input_dir: dir.clone(),
            output_dir: dir.join("out"),
            range: CoordinateRange::new(0.0, 10.0, 1.0).unwrap(),
            axis: Axis::Axial,
        };
        assert!(matches!(
            opts.validate(),
            Err(SliceStripError::MissingInput(_))
        ));

        std::fs::write(&template, b"").unwrap();
        assert!(opts.validate().is_ok());

        let backwards = PipelineOpts {
            range: CoordinateRange::new(0.0, 10.0, -1.0).unwrap(),
            ..opts
        };
        assert!(matches!(
            backwards.validate(),
            Err(SliceStripError::Validation(_))
        ));

        let oversized = PipelineOpts {
            range: CoordinateRange {
                start: 0.0,
                end: 1e12,
                step: 1e-6,
            },
            ..backwards
        };
        assert!(matches!(
            oversized.validate(),
            Err(SliceStripError::Validation(_))
        ));
        assert!(!oversized.output_dir.exists());
    }
}
