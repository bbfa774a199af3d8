use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::{
    foundation::error::{SliceStripError, SliceStripResult},
    raster::RasterTool,
    tools::run_tool,
};

/// Options for [`ImageMagick`].
#[derive(Clone, Debug)]
pub struct ImageMagickOpts {
    /// `convert` for ImageMagick 6, `magick` for ImageMagick 7.
    pub program: String,
    /// Colour distance (percent) still treated as background.
    pub fuzz_percent: f64,
    /// Colour keyed out to transparency.
    pub background: String,
    /// Pixels by which neighbouring slices overlap in a montage.
    pub overlap: u32,
}

impl Default for ImageMagickOpts {
    fn default() -> Self {
        Self {
            program: "convert".to_string(),
            fuzz_percent: 10.0,
            background: "black".to_string(),
            overlap: 30,
        }
    }
}

impl ImageMagickOpts {
    pub fn validate(&self) -> SliceStripResult<()> {
        if !(0.0..=100.0).contains(&self.fuzz_percent) {
            return Err(SliceStripError::validation(format!(
                "fuzz must be within 0..=100 percent, got {}",
                self.fuzz_percent
            )));
        }
        Ok(())
    }
}

pub struct ImageMagick {
    opts: ImageMagickOpts,
}

impl ImageMagick {
    pub fn new(opts: ImageMagickOpts) -> SliceStripResult<Self> {
        opts.validate()?;
        Ok(Self { opts })
    }

    pub fn opts(&self) -> &ImageMagickOpts {
        &self.opts
    }

    pub fn key_out_command(&self, image: &Path, out: &Path) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.arg(image)
            .args(["-fuzz", &format!("{}%", self.opts.fuzz_percent)])
            .args(["-transparent", &self.opts.background])
            .arg(out);
        cmd
    }

    pub fn smush_command(&self, inputs: &[PathBuf], out: &Path) -> Command {
        let mut cmd = Command::new(&self.opts.program);
        cmd.args(["-background", "none", "-gravity", "center"])
            .args(inputs)
            .args(["+smush", &format!("-{}", self.opts.overlap)])
            .arg(out);
        cmd
    }
}

impl RasterTool for ImageMagick {
    fn key_out_background(&self, image: &Path) -> SliceStripResult<PathBuf> {
        if !image.exists() {
            return Err(SliceStripError::missing_input(image));
        }

        let out = image.with_extension("png");
        run_tool(&mut self.key_out_command(image, &out))?;
        Ok(out)
    }

    fn smush_horizontal(&self, inputs: &[PathBuf], out: &Path) -> SliceStripResult<()> {
        if inputs.is_empty() {
            return Err(SliceStripError::validation(format!(
                "no images to concatenate into '{}'",
                out.display()
            )));
        }
        run_tool(&mut self.smush_command(inputs, out))
    }
}
