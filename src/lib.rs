//! Batch slice montages for neuroimaging overlays.
//!
//! For every mask volume in a directory, slicestrip asks an external volume renderer
//! (MRtrix3 `mrview`) for one capture per coordinate along a chosen axis, keys the black
//! background out with an external raster tool (ImageMagick), and concatenates the slices
//! into a single `{mask}_merged.png` strip.
//!
//! The external tools sit behind [`VolumeRenderer`] and [`RasterTool`], so the pipeline can
//! be driven with other implementations.
#![forbid(unsafe_code)]

mod foundation;

pub mod capture;
pub mod montage;
pub mod naming;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod report;
pub mod tools;
pub mod transparency;

pub use crate::foundation::core::{Axis, CoordinateRange, FocalPoint, MAX_SLICES, SliceLabel};
pub use crate::foundation::error::{SliceStripError, SliceStripResult};

pub use crate::capture::{CaptureJob, capture_slices};
pub use crate::montage::compose_montage;
pub use crate::pipeline::{
    MaskInput, PipelineOpts, discover_masks, ensure_output_dir, process_mask, run_pipeline,
};
pub use crate::raster::RasterTool;
pub use crate::raster::imagemagick::{ImageMagick, ImageMagickOpts};
pub use crate::render::mrview::{Colourmap, MrviewOpts, MrviewRenderer};
pub use crate::render::{CaptureRequest, VolumeRenderer};
pub use crate::report::{MaskReport, RunReport};
pub use crate::tools::{ensure_tool_on_path, is_tool_on_path};
pub use crate::transparency::key_out_slices;
