//! Write the default analyzer configuration and the built-in reference table
//!
//! Both files can be edited and passed back to the CLI with `--config` and
//! `--table`.

use std::{env, path::Path, process};

use reagent_colorscan::{AnalyzerConfig, ReferenceTable};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_dir>", args[0]);
        eprintln!();
        eprintln!("Writes analyzer.json and reference_table.json");
        process::exit(1);
    }

    let output_dir = Path::new(&args[1]);
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        eprintln!("Error creating directory: {}", e);
        process::exit(1);
    }

    let config = AnalyzerConfig::default();
    let config_path = output_dir.join("analyzer.json");
    if let Err(e) = config.to_json_file(&config_path) {
        eprintln!("Error saving config: {}", e);
        process::exit(1);
    }

    let table = ReferenceTable::standard();
    let table_path = output_dir.join("reference_table.json");
    if let Err(e) = table.to_json_file(&table_path) {
        eprintln!("Error saving reference table: {}", e);
        process::exit(1);
    }

    eprintln!("Configuration saved to {}", config_path.display());
    eprintln!(
        "  Sampling:   alpha ≥ {}, channel sum {}-{}",
        config.sampling.min_alpha, config.sampling.min_channel_sum, config.sampling.max_channel_sum
    );
    eprintln!(
        "  Clustering: k = {}, {} iterations, threshold {:.1}",
        config.clustering.cluster_count,
        config.clustering.max_iterations,
        config.clustering.convergence_threshold
    );
    eprintln!("Reference table saved to {} ({} signatures)", table_path.display(), table.len());
}
