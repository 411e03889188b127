//! DotBot frame dump tool - decodes hex frames and prints their layout
//!
//! Usage:
//!   dotbot-dump 0000000000000001000000000000000200030101ff0080
//!   dotbot-dump --json --config config/codec.toml <HEX>...

use anyhow::{Context, Result};
use clap::Parser;
use codec::{CodecConfig, PayloadDecoder};
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dotbot-dump")]
#[command(about = "Decode DotBot protocol frames")]
#[command(version)]
struct Args {
    /// Frames to decode, one hex string each
    #[arg(required = true)]
    frames: Vec<String>,

    /// Path to codec configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Print decoded payloads as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock())
}

/// Decode every frame in `args` and write its rendering to `out`
///
/// Stops at the first frame that is not valid hex or fails to decode.
fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let config = match &args.config {
        Some(path) => {
            info!("Configuration: {}", path);
            CodecConfig::from_file(path)
                .with_context(|| format!("loading codec configuration from {}", path))?
        }
        None => CodecConfig::default(),
    };
    let decoder = PayloadDecoder::new(config);

    for (index, frame) in args.frames.iter().enumerate() {
        let bytes = hex::decode(frame.trim().trim_start_matches("0x"))
            .with_context(|| format!("frame {} is not valid hex", index))?;

        let payload = decoder.decode(&bytes).map_err(|e| {
            error!("Failed to decode frame {}: {}", index, e);
            e
        })?;

        if args.json {
            serde_json::to_writer(&mut *out, &payload)?;
            writeln!(out)?;
        } else {
            write!(out, "{}", payload)?;
        }
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let log_level = match args.log_level.to_lowercase().as_str() {
        level @ ("trace" | "debug" | "info" | "warn" | "error") => level.to_string(),
        _ => "warn".to_string(),
    };

    // RUST_LOG takes precedence over --log-level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
