use std::path::{Path, PathBuf};

use crate::foundation::{
    core::{Axis, FocalPoint},
    error::SliceStripResult,
};

pub mod mrview;

/// One slice to capture: template plus overlay, focused at `focal` on `axis`.
#[derive(Clone, Debug)]
pub struct CaptureRequest<'a> {
    pub template: &'a Path,
    pub overlay: &'a Path,
    pub focal: FocalPoint,
    pub axis: Axis,
    pub out_dir: &'a Path,
    /// File-name prefix for the captured frame.
    pub prefix: &'a str,
}

/// Produces one PNG for a [`CaptureRequest`].
///
/// Implementations write into `request.out_dir` and return the path of the written frame,
/// which is expected to be `{out_dir}/{prefix}0000.png`.
pub trait VolumeRenderer {
    fn capture_slice(&mut self, request: &CaptureRequest<'_>) -> SliceStripResult<PathBuf>;
}
