//! Uicapture: validation and persistence for web UI captures.
//!
//! A browser extension uploads a "capture": a screenshot plus a recursive
//! tree of bounding boxes for the UI elements visible in it. This crate is
//! the engine behind that upload endpoint: it decodes the embedded image,
//! validates every bounding box in the tree against the image's dimensions,
//! and persists the validated result as a metadata/image file pair that
//! round-trips losslessly.
//!
//! # Modules
//!
//! - [`capture`]: Core types (CaptureRecord, BBoxNode, CaptureImage, ...)
//! - [`error`]: Error types for uicapture operations

pub mod capture;
pub mod error;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use capture::{
    validate_bbox, BBox, BBoxNode, Bounds, CaptureImage, CaptureMetadata, CaptureRecord,
    DecodeError, GeometryError, RawBBoxNode, TagError, TreeError,
};
pub use error::CaptureError;

/// The uicapture CLI application.
#[derive(Parser)]
#[command(name = "uicapture")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Validate a capture payload without persisting it.
    Validate(ValidateArgs),

    /// Validate a capture payload and persist it as a metadata/image pair.
    Ingest(IngestArgs),
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Capture payload file to validate.
    input: PathBuf,
}

/// Arguments for the ingest subcommand.
#[derive(clap::Args)]
struct IngestArgs {
    /// Capture payload file to ingest.
    input: PathBuf,

    /// Directory to write the metadata/image pair into.
    #[arg(long, default_value = "dataset")]
    out_dir: PathBuf,

    /// Base name for the persisted pair (defaults to the input file stem).
    #[arg(long)]
    name: Option<String>,
}

/// Run the uicapture CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CaptureError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Ingest(args)) => run_ingest(args),
        None => {
            println!("uicapture {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Validation and persistence engine for web UI captures.");
            println!();
            println!("Run 'uicapture --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), CaptureError> {
    let raw = fs::read(&args.input)?;
    let record = CaptureRecord::from_upload(&raw)?;

    println!(
        "Validation passed: {} elements, image {}, url {}",
        record.bbox_tree().node_count(),
        record.image_size(),
        record.url()
    );
    Ok(())
}

/// Execute the ingest subcommand.
fn run_ingest(args: IngestArgs) -> Result<(), CaptureError> {
    let raw = fs::read(&args.input)?;
    let record = CaptureRecord::from_upload(&raw)?;

    let name = match &args.name {
        Some(name) => name.clone(),
        None => args
            .input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("capture")
            .to_string(),
    };

    let (metadata_path, image_path) = record.persist(&args.out_dir, &name)?;
    println!("Wrote {}", metadata_path.display());
    println!("Wrote {}", image_path.display());
    Ok(())
}
