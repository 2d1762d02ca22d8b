//! Pixmerge CLI: combine two local images and write the results to a directory.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use pixmerge_cli::{init_tracing, CombineReport};
use pixmerge_core::constants::DEFAULT_OUTPUT_DIR;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pixmerge",
    about = "Combine two images with xor, add, sub, avg, max, min, and, or"
)]
struct Cli {
    /// First image; its dimensions are used for every result
    image1: PathBuf,
    /// Second image; resized to the first image's dimensions when they differ
    image2: PathBuf,
    /// Directory receiving the <op>_result.png files
    #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
    /// Output format for the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let output = pixmerge_processing::combine_images(&cli.image1, &cli.image2, &cli.output_dir)?;

    match cli.format {
        OutputFormat::Text => println!("{}", CombineReport::render_text(&output)),
        OutputFormat::Json => {
            let report = CombineReport::from_output(&output);
            let out = serde_json::to_string_pretty(&report).context("Serialize report")?;
            println!("{}", out);
        }
    }

    Ok(())
}
