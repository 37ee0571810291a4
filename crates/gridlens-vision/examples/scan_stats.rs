//! Example reporting the preprocessing stages for an image file.
//!
//! Loads an image, runs it through resizing, grayscale conversion,
//! Otsu binarization, and content detection, then prints what the scan
//! pipeline would work with. Useful for judging whether a photo is
//! likely to scan well before wiring up a recognition backend.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example scan_stats -- puzzle-photo.png
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use gridlens_vision::pipeline;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the image file to inspect.
    image: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let bytes = match std::fs::read(&args.image) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("failed to read {}: {err}", args.image.display());
            return ExitCode::FAILURE;
        }
    };
    let decoded = match image::load_from_memory(&bytes) {
        Ok(decoded) => decoded.to_rgba8(),
        Err(err) => {
            eprintln!("failed to decode {}: {err}", args.image.display());
            return ExitCode::FAILURE;
        }
    };
    println!("Input:");
    println!("  {} ({} bytes)", args.image.display(), bytes.len());
    println!("  {}x{} pixels", decoded.width(), decoded.height());
    println!();

    match pipeline::preprocess_stats(&decoded) {
        Ok((width, height, threshold, bounds)) => {
            println!("Working image:");
            println!("  {width}x{height} pixels");
            println!();
            println!("Otsu threshold:");
            println!("  {threshold}");
            println!();
            println!("Content bounds:");
            println!(
                "  {}x{} at ({}, {})",
                bounds.width, bounds.height, bounds.x, bounds.y
            );
            println!(
                "  cell images would be {}x{} pixels",
                bounds.width / 9,
                bounds.height / 9
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("preprocessing failed: {err}");
            ExitCode::FAILURE
        }
    }
}
