use std::path::{Path, PathBuf};

use crate::{
    foundation::error::{SliceStripError, SliceStripResult},
    naming::merged_file_name,
    raster::RasterTool,
};

/// Concatenate one mask's slices into `{out_dir}/{base}_merged.png`.
///
/// `slices` is the tracked list of this mask's captures, in capture order. An empty list
/// is rejected before the raster tool is invoked.
pub fn compose_montage(
    raster: &dyn RasterTool,
    out_dir: &Path,
    base: &str,
    slices: &[PathBuf],
) -> SliceStripResult<PathBuf> {
    if slices.is_empty() {
        return Err(SliceStripError::validation(format!(
            "no slices captured for mask '{base}', refusing to build an empty montage"
        )));
    }

    let merged = out_dir.join(merged_file_name(base));
    raster.smush_horizontal(slices, &merged)?;
    Ok(merged)
}
