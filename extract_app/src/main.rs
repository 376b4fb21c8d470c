//! `vphys_to_tri`: batch-converts compiled physics documents into flat
//! triangle buffers.
//!
//! Reads every `.vphys` document in the input directory and writes one
//! `.tri` file per document that has default-group collision geometry.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, Command};
use vphys_extract::config::Config;
use vphys_extract::core::config::ExtractorConfig;
use vphys_extract::foundation::logging;
use vphys_extract::Extractor;

fn main() -> Result<()> {
    let matches = Command::new("vphys_to_tri")
        .about("Extracts default-group collision triangles from .vphys documents")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory containing the physics documents"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory for the triangle buffers"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Default log filter (RUST_LOG overrides)"),
        )
        .get_matches();

    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExtractorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ExtractorConfig::default(),
    };

    if let Some(input) = matches.get_one::<PathBuf>("input") {
        config.paths.input_dir = input.clone();
    }
    if let Some(output) = matches.get_one::<PathBuf>("output") {
        config.paths.output_dir = output.clone();
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }

    logging::init(&config.logging.level);
    log::info!(
        "Converting {} -> {}",
        config.paths.input_dir.display(),
        config.paths.output_dir.display()
    );

    let report = Extractor::new(config).run().context("Extraction run failed")?;
    if report.failed > 0 {
        log::warn!("{} document(s) could not be processed", report.failed);
    }
    log::info!("Wrote {} triangle(s) to {} file(s)", report.triangles, report.written);

    Ok(())
}
