use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skin_tone_advisor_wasm::{
    Classification, ClassifierConfig, SmallImagePolicy, analyze_bytes, media_type_for_path,
};

/// Suggest clothing colors from the skin undertone in the middle of a photo.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// JSON file with classifier settings; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Side of the square sampled from the image center
    #[arg(short, long)]
    sample_size: Option<u32>,

    /// Warmth beyond which a sample is warm (or cool, when negative)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Fail on images smaller than the sample instead of shrinking it
    #[arg(long)]
    reject_small: bool,

    /// Treat every input as this media type instead of guessing from the extension
    #[arg(short = 'm', long)]
    media_type: Option<String>,

    /// Print one JSON object per input
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("skin_tone_advisor_wasm={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for input in &args.inputs {
        if let Err(err) = advise(input, &args, &config) {
            eprintln!("{}: {err:#}", input.display());
            failed = true;
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn build_config(args: &Args) -> Result<ClassifierConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => ClassifierConfig::default(),
    };

    if let Some(size) = args.sample_size {
        config.sample_size = size;
    }
    if let Some(threshold) = args.threshold {
        config.warmth_threshold = threshold;
    }
    if args.reject_small {
        config.small_image_policy = SmallImagePolicy::Reject;
    }

    config.validate()?;
    Ok(config)
}

fn advise(input: &Path, args: &Args, config: &ClassifierConfig) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let media_type = args
        .media_type
        .as_deref()
        .unwrap_or_else(|| media_type_for_path(input));

    let result = analyze_bytes(media_type, bytes, config).context("analysis failed")?;

    if args.json {
        let line = serde_json::json!({
            "input": input.display().to_string(),
            "result": result,
        });
        println!("{line}");
    } else {
        print_report(input, &result);
    }
    Ok(())
}

fn print_report(input: &Path, result: &Classification) {
    println!("{}", input.display());
    println!(
        "  {} (warmth {:+.3}, average {})",
        result.title,
        result.warmth,
        result.average.to_hex()
    );
    for swatch in result.palette {
        println!("  {}  {}", swatch.hex(), swatch.name);
    }
}
