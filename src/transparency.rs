use std::path::PathBuf;

use crate::{foundation::error::SliceStripResult, raster::RasterTool};

/// Key the background out of each freshly captured slice, in place.
///
/// Only `slices` are touched; other files in the output directory are left alone. Returns
/// the written paths, which equal the inputs for `.png` slices.
pub fn key_out_slices(
    raster: &dyn RasterTool,
    slices: &[PathBuf],
) -> SliceStripResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(slices.len());
    for slice in slices {
        let out = raster.key_out_background(slice)?;
        if &out != slice {
            tracing::warn!(
                input = %slice.display(),
                output = %out.display(),
                "transparent copy written next to non-png input"
            );
        }
        written.push(out);
    }
    Ok(written)
}
