use std::{path::PathBuf, process::Command};

use crate::{
    foundation::error::{SliceStripError, SliceStripResult},
    naming::rendered_path,
    render::{CaptureRequest, VolumeRenderer},
    tools::run_tool,
};

/// Entries of the `mrview` colourmap list. `-overlay.colourmap` takes the list index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colourmap {
    Gray,
    Hot,
    Cool,
    Jet,
    Inferno,
    Viridis,
    Pet,
}

impl Colourmap {
    pub fn index(self) -> u8 {
        match self {
            Self::Gray => 0,
            Self::Hot => 1,
            Self::Cool => 2,
            Self::Jet => 3,
            Self::Inferno => 4,
            Self::Viridis => 5,
            Self::Pet => 6,
        }
    }
}

/// Options for [`MrviewRenderer`].
#[derive(Clone, Debug)]
pub struct MrviewOpts {
    /// Executable name or path.
    pub program: String,
    /// Field of view of the base image.
    pub fov: f64,
    /// Opacity of both overlay layers.
    pub overlay_opacity: f64,
    /// Colormap for voxels above zero.
    pub positive_colormap: Colourmap,
    /// Colormap for voxels below zero.
    pub negative_colormap: Colourmap,
}

impl Default for MrviewOpts {
    fn default() -> Self {
        Self {
            program: "mrview".to_string(),
            fov: 245.0,
            overlay_opacity: 0.7,
            positive_colormap: Colourmap::Hot,
            negative_colormap: Colourmap::Cool,
        }
    }
}

impl MrviewOpts {
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

/// Renderer backed by MRtrix3 `mrview`, driven entirely through command-line options.
///
/// Each capture is a fresh process: load, focus, grab one frame, exit.
pub struct MrviewRenderer {
    opts: MrviewOpts,
}

impl MrviewRenderer {
    pub fn new(opts: MrviewOpts) -> Self {
        Self { opts }
    }

    pub fn opts(&self) -> &MrviewOpts {
        &self.opts
    }

    /// Build the `mrview` invocation for `request` without running it.
    pub fn command(&self, request: &CaptureRequest<'_>) -> Command {
        let opacity = self.opts.overlay_opacity.to_string();
        let mut cmd = Command::new(&self.opts.program);
        cmd.arg(request.template)
            .args(["-mode", "1"])
            .args(["-fov", &self.opts.fov.to_string()])
            .args(["-plane", &request.axis.index().to_string()])
            .args(["-focus", &request.focal.to_string()]);

        // Positive voxels.
        cmd.arg("-overlay.load")
            .arg(request.overlay)
            .args([
                "-overlay.colourmap",
                &self.opts.positive_colormap.index().to_string(),
            ])
            .args(["-overlay.threshold_min", "0"])
            .args(["-overlay.opacity", &opacity]);

        // Negative voxels.
        cmd.arg("-overlay.load")
            .arg(request.overlay)
            .args([
                "-overlay.colourmap",
                &self.opts.negative_colormap.index().to_string(),
            ])
            .args(["-overlay.threshold_max", "0"])
            .args(["-overlay.opacity", &opacity]);

        cmd.arg("-noannotations")
            .arg("-capture.folder")
            .arg(request.out_dir)
            .args(["-capture.prefix", request.prefix])
            .arg("-capture.grab")
            .arg("-exit");
        cmd
    }
}

impl VolumeRenderer for MrviewRenderer {
    fn capture_slice(&mut self, request: &CaptureRequest<'_>) -> SliceStripResult<PathBuf> {
        for input in [request.template, request.overlay] {
            if !input.exists() {
                return Err(SliceStripError::missing_input(input));
            }
        }

        run_tool(&mut self.command(request))?;

        let out = rendered_path(request.out_dir, request.prefix);
        if !out.exists() {
            return Err(SliceStripError::tool(format!(
                "{} finished but did not write '{}'",
                self.opts.program,
                out.display()
            )));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::foundation::core::Axis;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn command_loads_overlay_twice_and_grabs_one_frame() {
        let renderer = MrviewRenderer::new(MrviewOpts::default());
        let request = CaptureRequest {
            template: Path::new("MNI152.nii.gz"),
            overlay: Path::new("masks/left.nii"),
            focal: Axis::Coronal.focal_point(-30.0),
            axis: Axis::Coronal,
            out_dir: Path::new("out"),
            prefix: "left_slice_04-",
        };
        let cmd = renderer.command(&request);
        assert_eq!(cmd.get_program(), "mrview");

        let args = args_of(&cmd);
        let joined = args.join(" ");
        assert!(joined.starts_with("MNI152.nii.gz -mode 1 -fov 245 -plane 1 -focus -1,-30,18"));
        assert_eq!(
            args.iter().filter(|a| *a == "-overlay.load").count(),
            2
        );
        assert!(joined.contains(
            "-overlay.colourmap 1 -overlay.threshold_min 0 -overlay.opacity 0.7"
        ));
        assert!(joined.contains(
            "-overlay.colourmap 2 -overlay.threshold_max 0 -overlay.opacity 0.7"
        ));
        assert!(joined.ends_with(
            "-noannotations -capture.folder out -capture.prefix left_slice_04- -capture.grab -exit"
        ));
    }

    #[test]
    fn program_override_is_used() {
        let renderer = MrviewRenderer::new(MrviewOpts::default().with_program("/opt/mrtrix/mrview"));
        let request = CaptureRequest {
            template: Path::new("t.nii"),
            overlay: Path::new("m.nii"),
            focal: Axis::Axial.focal_point(0.0),
            axis: Axis::Axial,
            out_dir: Path::new("out"),
            prefix: "m_slice_00-",
        };
        assert_eq!(renderer.command(&request).get_program(), "/opt/mrtrix/mrview");
    }

    #[test]
    fn missing_program_surfaces_as_missing_tool() {
        let dir = PathBuf::from("target").join("mrview_unit");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let template = dir.join("t.nii");
        let overlay = dir.join("m.nii");
        std::fs::write(&template, b"").unwrap();
        std::fs::write(&overlay, b"").unwrap();

        let mut renderer = MrviewRenderer::new(
            MrviewOpts::default().with_program("slicestrip-definitely-not-a-real-tool"),
        );
        let request = CaptureRequest {
            template: &template,
            overlay: &overlay,
            focal: Axis::Axial.focal_point(0.0),
            axis: Axis::Axial,
            out_dir: &dir,
            prefix: "m_slice_00-",
        };
        let err = renderer.capture_slice(&request).unwrap_err();
        assert!(matches!(err, SliceStripError::MissingTool(_)));
    }
}
