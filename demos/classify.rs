//! Food Image Classification Example
//!
//! Classifies a single photograph into one of the Food-101 categories using
//! a local ONNX model.
//!
//! Usage:
//! ```
//! cargo run --example classify -- --model-path <model.onnx> --labels-path <classes.txt> <image>
//! ```

use clap::Parser;
use food_classifier::prelude::*;
use food_classifier::utils::init_tracing;
use tracing::error;

/// Command-line arguments for the classification example
#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Food Image Classification Example - labels a single photograph")]
struct Args {
    /// Path to the ONNX model file
    #[arg(short, long)]
    model_path: String,

    /// Path to the newline-separated label file
    #[arg(short, long)]
    labels_path: String,

    /// Image file to classify
    #[arg(required = true)]
    image: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let args = Args::parse();

    let classifier = ImageClassifierBuilder::new()
        .model_file(&args.model_path)
        .labels_file(&args.labels_path)
        .build()?;

    let image = std::fs::read(&args.image)?;
    match classifier.classify_image(&image) {
        Ok(label) => println!("{}: {}", args.image, label),
        Err(e) => {
            error!("failed to classify {}: {}", args.image, e);
            return Err(e.into());
        }
    }

    Ok(())
}
