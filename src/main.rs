use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use voice_features::{ExtractorConfig, FeatureExtractor};

/// Extract acoustic voice features from an audio file and print them as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Audio file to analyze (WAV, FLAC, Ogg Vorbis, MP3, AAC)
    input: PathBuf,

    /// Path to a JSON config file (defaults to ~/.voice-features/config.json if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so stdout stays valid JSON
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Determine config path
    let config_path = match &args.config {
        Some(path) => Some(path.clone()),
        None => ExtractorConfig::default_config_path().ok(),
    };
    let config = match &config_path {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => ExtractorConfig::default(),
    };
    debug!("Config ({:?}): {:?}", config_path, config);

    let extractor = FeatureExtractor::new(config).context("Invalid extractor configuration")?;

    info!("Analyzing {:?}", args.input);
    let features = extractor
        .extract_file(&args.input)
        .with_context(|| format!("Failed to extract features from {:?}", args.input))?;
    info!(
        "Done: {:.2}s at {} Hz, {:.0}% voiced",
        features.duration_secs,
        features.sample_rate,
        features.voiced_ratio * 100.0
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&features)
    } else {
        serde_json::to_string(&features)
    }
    .context("Failed to serialize features")?;
    println!("{}", json);

    Ok(())
}
