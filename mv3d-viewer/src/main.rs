use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn};
use mv3d_core::import::{self, ImportError};
use thiserror::Error;

use crate::abs::SetupError;
use crate::viewer::{Viewer, ViewerOptions};

mod abs;
mod viewer;

/// Real-time 3D model viewer for STL (ASCII and binary) and OBJ files.
#[derive(Parser, Debug)]
#[command(name = "mv3d", version, about)]
struct Cli {
    /// Path to the model file
    model: PathBuf,

    /// Window width in pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Start fullscreen at the desktop resolution (overrides --width/--height)
    #[arg(long)]
    fullscreen: bool,

    /// Disable vsync
    #[arg(long)]
    no_vsync: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum Error {
    #[error("{0}")]
    InvalidModelPath(String),
    #[error("failed to load model: {0}")]
    Import(#[from] ImportError),
    #[error("failed to initialize viewer: {0}")]
    Setup(#[from] SetupError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<(), Error> {
    validate_model_path(&cli.model)?;

    info!("loading {}", cli.model.display());
    let mesh = import::import(&cli.model)?;
    info!(
        "loaded {} triangles, center {}, scale {:.6}",
        mesh.triangle_count(),
        mesh.center,
        mesh.scale
    );

    let options = ViewerOptions {
        width: cli.width,
        height: cli.height,
        fullscreen: cli.fullscreen,
        vsync: !cli.no_vsync,
    };
    let mut viewer = Viewer::new(mesh, &options)?;
    viewer.run();
    Ok(())
}

/// Cheap pre-flight checks before the importer touches the file. The
/// extension is advisory only; the importer decides the format by content.
fn validate_model_path(path: &Path) -> Result<(), Error> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        Error::InvalidModelPath(format!("model file {}: {e}", path.display()))
    })?;
    if metadata.len() == 0 {
        return Err(Error::InvalidModelPath(format!(
            "model file is empty: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("stl") | Some("obj") => {}
        _ => warn!(
            "unrecognized model extension on {}, relying on content detection",
            path.display()
        ),
    }
    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .expect("logger initialized twice");
}
