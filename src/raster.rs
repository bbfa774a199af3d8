use std::path::{Path, PathBuf};

use crate::foundation::error::SliceStripResult;

pub mod imagemagick;

/// Raster operations applied to captured slices.
pub trait RasterTool {
    /// Key the near-black background of `image` out to transparency.
    ///
    /// Returns the path written, which is `image` with a `.png` extension.
    fn key_out_background(&self, image: &Path) -> SliceStripResult<PathBuf>;

    /// Concatenate `inputs` left to right into `out`.
    fn smush_horizontal(&self, inputs: &[PathBuf], out: &Path) -> SliceStripResult<()>;
}
