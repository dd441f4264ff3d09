use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::{error, info, LevelFilter};
use vesicle_distance::{BoundarySelection, DistanceReport, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Tab-separated log lines.
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Minimum distance from each vesicle marker to the boundary line.
#[derive(Debug, Parser)]
#[command(name = "vesicle-distance", version, about)]
struct Args {
    /// Session JSON exported by the host (title, calibration, ROIs).
    session: PathBuf,

    /// Write the report here instead of stdout (overrides the session's `output_path`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Fail when more than one line ROI is present instead of using the first.
    #[arg(long)]
    strict_boundary: bool,

    /// Upper bound on resampled boundary points.
    #[arg(long)]
    max_samples: Option<usize>,

    /// Log level for stderr diagnostics. With the `tracing` feature this is
    /// the default filter and `RUST_LOG` takes precedence.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    /// Emit `tracing` spans as JSON (requires the `tracing` feature).
    #[cfg(feature = "tracing")]
    #[arg(long)]
    trace_json: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    #[cfg(feature = "tracing")]
    vesicle_distance::core::init_tracing(args.trace_json, args.log_level);
    #[cfg(not(feature = "tracing"))]
    if let Err(err) = vesicle_distance::core::init_with_level(args.log_level) {
        eprintln!("failed to install logger: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info", skip_all))]
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::load_json(&args.session)?;
    info!(
        "loaded {} ROIs from {}",
        session.rois.len(),
        args.session.display()
    );

    let mut params = session.build_params();
    if args.strict_boundary {
        params.boundary_selection = BoundarySelection::Strict;
    }
    if let Some(max_samples) = args.max_samples {
        params.resample.max_samples = max_samples;
    }

    let report = session.run_with(params)?;
    let out_path = args.output.clone().or_else(|| session.output_path());
    write_report(&report, out_path, args.format)
}

fn write_report(
    report: &DistanceReport,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        let stdout = std::io::stdout().lock();
        match format {
            OutputFormat::Text => report.write_text(stdout)?,
            OutputFormat::Json => serde_json::to_writer_pretty(stdout, report)?,
        }
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match format {
        OutputFormat::Text => report.write_text(fs::File::create(&path)?)?,
        OutputFormat::Json => report.write_json(&path)?,
    }
    info!("wrote report to {}", path.display());
    Ok(())
}
