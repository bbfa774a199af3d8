use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use slicestrip::{
    Axis, CoordinateRange, ImageMagick, ImageMagickOpts, MrviewOpts, MrviewRenderer,
    PipelineOpts, ensure_tool_on_path, run_pipeline,
};

const REQUIREMENTS: &str = "\
Requirements:
  mrview (MRtrix3) and ImageMagick (convert, or magick with --raster magick) on PATH.

Outputs, per mask {base}.nii in INPUT_PATH:
  OUTPUT_PATH/{base}_slice_{NN}.png   one capture per coordinate, background keyed out
  OUTPUT_PATH/{base}_merged.png       all slices of the mask, side by side

Example:
  slicestrip MNI152_T1_1mm.nii.gz masks/ out/ -66 66 10 0";

#[derive(Parser, Debug)]
#[command(
    name = "slicestrip",
    version,
    about = "Render overlay masks on a template as slice series and merge them into strips",
    after_long_help = REQUIREMENTS,
    disable_version_flag = true
)]
struct Cli {
    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: (),

    /// Template volume shown under every mask (.nii or .nii.gz).
    template_file: PathBuf,

    /// Directory containing the mask volumes ({base}.nii).
    input_path: PathBuf,

    /// Directory receiving slices and merged strips (created if missing).
    output_path: PathBuf,

    /// First coordinate along the axis.
    #[arg(allow_negative_numbers = true)]
    coordinate_0: f64,

    /// Last coordinate along the axis (inclusive when on the step grid).
    #[arg(allow_negative_numbers = true)]
    coordinate_f: f64,

    /// Step between coordinates; its sign must point from coordinate_0 to coordinate_f.
    #[arg(allow_negative_numbers = true)]
    increment: f64,

    /// 0 = sagittal, 1 = coronal, 2 = axial.
    axis: Axis,

    /// Renderer executable.
    #[arg(long, default_value = "mrview")]
    renderer: String,

    /// ImageMagick executable (`convert`, or `magick` for ImageMagick 7).
    #[arg(long, default_value = "convert")]
    raster: String,

    /// Background fuzz tolerance, in percent.
    #[arg(long, default_value_t = 10.0)]
    fuzz: f64,

    /// Overlap between neighbouring slices in the merged strip, in pixels.
    #[arg(long, default_value_t = 30)]
    overlap: u32,

    /// Write a JSON report of everything produced.
    #[arg(long)]
    report: Option<PathBuf>,

    /// More logging; repeat for trace output.
    #[arg(long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    if std::env::args_os().len() <= 1 {
        Cli::command().print_long_help()?;
        return Ok(());
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let renderer_opts = MrviewOpts::default().with_program(cli.renderer);
    let raster = ImageMagick::new(ImageMagickOpts {
        program: cli.raster,
        fuzz_percent: cli.fuzz,
        overlap: cli.overlap,
        ..ImageMagickOpts::default()
    })?;

    ensure_tool_on_path(&renderer_opts.program)?;
    ensure_tool_on_path(&raster.opts().program)?;

    let opts = PipelineOpts {
        template: cli.template_file,
        input_dir: cli.input_path,
        output_dir: cli.output_path,
        range: CoordinateRange::new(cli.coordinate_0, cli.coordinate_f, cli.increment)?,
        axis: cli.axis,
    };

    let mut renderer = MrviewRenderer::new(renderer_opts);
    let report = run_pipeline(&opts, &mut renderer, &raster)?;

    if let Some(path) = &cli.report {
        report.write_json(path)?;
        eprintln!("wrote report {}", path.display());
    }

    eprintln!(
        "wrote {} slices and {} merged images to {}",
        report.slice_count(),
        report.masks.len(),
        opts.output_dir.display()
    );
    Ok(())
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::WARN,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse_as_positionals() {
        let cli = Cli::try_parse_from([
            "slicestrip",
            "t.nii.gz",
            "masks",
            "out",
            "-66",
            "66",
            "10",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.coordinate_0, -66.0);
        assert_eq!(cli.increment, 10.0);
        assert_eq!(cli.axis, Axis::Sagittal);
        assert_eq!(cli.raster, "convert");
    }

    #[test]
    fn invalid_axis_is_a_parse_error() {
        let err =
            Cli::try_parse_from(["slicestrip", "t", "m", "o", "0", "1", "1", "3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn too_few_arguments_is_an_error() {
        let err = Cli::try_parse_from(["slicestrip", "t", "m", "o"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
