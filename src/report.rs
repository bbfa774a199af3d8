use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::{
    core::{Axis, CoordinateRange},
    error::SliceStripResult,
};

/// Summary of one pipeline run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub template: PathBuf,
    pub output_dir: PathBuf,
    pub axis: Axis,
    pub range: CoordinateRange,
    pub masks: Vec<MaskReport>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MaskReport {
    pub name: String,
    pub input: PathBuf,
    pub slices: Vec<PathBuf>,
    pub merged: PathBuf,
    /// `[width, height]` of the merged PNG, when it could be read back.
    pub merged_size: Option<[u32; 2]>,
}

impl RunReport {
    pub fn slice_count(&self) -> usize {
        self.masks.iter().map(|m| m.slices.len()).sum()
    }

    pub fn write_json(&self, path: &Path) -> SliceStripResult<()> {
        let f = File::create(path)
            .with_context(|| format!("create report '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), self)
            .with_context(|| format!("write report '{}'", path.display()))?;
        Ok(())
    }
}
