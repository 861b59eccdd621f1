//! Command-line interface for reagent_colorscan
//!
//! Analyzes one photo of a reacted reagent test and prints the JSON result.
//! Set `RUST_LOG=reagent_colorscan=debug` to follow the pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use reagent_colorscan::image_loader::load_rgba;
use reagent_colorscan::{AnalysisResult, AnalyzerConfig, ImageAnalyzer, ReferenceTable};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "reagent-colorscan")]
#[command(about = "Dominant colors and candidate substances for a reagent test photo")]
struct Cli {
    /// Image to analyze (JPEG, PNG, WebP, ...)
    image: PathBuf,

    /// Analyzer configuration JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reference table JSON replacing the built-in one
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Seed for reproducible clustering
    #[arg(short, long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Print a short human-readable summary instead of JSON
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reagent_colorscan=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };
    let table = match &cli.table {
        Some(path) => ReferenceTable::from_json_file(path)
            .with_context(|| format!("loading reference table {}", path.display()))?,
        None => ReferenceTable::standard(),
    };
    let analyzer = ImageAnalyzer::with_reference_table(config, Arc::new(table))?;

    let image = load_rgba(&cli.image)
        .with_context(|| format!("loading image {}", cli.image.display()))?;
    let result = match cli.seed {
        Some(seed) => analyzer.analyze_with_rng(
            &image.pixels,
            image.width,
            image.height,
            &mut StdRng::seed_from_u64(seed),
        )?,
        None => analyzer.analyze(&image.pixels, image.width, image.height)?,
    };

    if cli.summary {
        print_summary(&result);
    } else if cli.pretty {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", serde_json::to_string(&result)?);
    }
    Ok(())
}

fn print_summary(result: &AnalysisResult) {
    println!(
        "Lighting: {:?}  Quality: {:?}  ({:.1} ms)",
        result.lighting_condition, result.image_quality, result.processing_time
    );
    if result.colors.is_empty() {
        println!("No usable colors found.");
    }
    for color in &result.colors {
        println!(
            "{} {:<10} {:5.1}%  confidence {:.0}",
            color.hex, color.color_name, color.dominance, color.confidence
        );
        for candidate in &color.chemical_matches {
            println!(
                "    {:<16} {:<9} {:.2}  ({})",
                candidate.substance, candidate.test_type, candidate.confidence, candidate.color_range
            );
        }
    }
    for advice in &result.recommendations {
        println!("* {}", advice);
    }
}
