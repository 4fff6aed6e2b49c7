//! bitframe - encode, decode and inspect flag-delimited bit streams

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use bitframe_frame::frame::FrameCodec;
use bitframe_tools::decode::frame_lines;
use bitframe_tools::inspect::inspect_file;
use bitframe_tools::{
    init_logging, DecodeArgs, Decoder, EncodeArgs, Encoder, FramingConfig, GlobalConfig,
    InspectArgs,
};

/// Bit-stuffed, CRC-checked framing of '0'/'1' text files
#[derive(Parser)]
#[command(name = "bitframe")]
#[command(about = "Bit-stuffed, CRC-8 checked framing of bit text files")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a bit file into frames
    Encode(EncodeArgs),
    /// Recover the payload from a frame file
    Decode(DecodeArgs),
    /// Show every frame with its stuffing bits marked
    Inspect(InspectArgs),
    /// Write the default framing configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Destination file (TOML, or JSON with a .json extension)
    #[arg(long)]
    write: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global)?;

    let config = FramingConfig::resolve(&cli.global)?;
    debug!(?config, "framing configuration");

    match cli.command {
        Commands::Encode(args) => {
            let config = config.with_overrides(args.chunk_size, args.layout);
            let summary = Encoder::new(config)?.encode_file(&args.input, &args.output)?;

            println!("Encoding complete. Created {} frames.", summary.frame_count);
            println!("Output written to: {}", args.output.display());
        }
        Commands::Decode(args) => {
            let decoder = Decoder::default();
            let decoded =
                decoder.decode_file(&args.input, &args.output, args.report.as_deref())?;

            for line in frame_lines(&decoded) {
                println!("{}", line);
            }

            if decoded.nothing_decoded() {
                println!("No valid frames to decode.");
            } else {
                println!();
                println!("Decoding complete.");
                println!(
                    "Valid frames: {}/{}",
                    decoded.valid_frames, decoded.total_frames
                );
                println!("Output written to: {}", args.output.display());
            }
        }
        Commands::Inspect(args) => {
            let inspections = inspect_file(&FrameCodec::default(), &args.input)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&inspections)?);
            } else {
                for inspection in &inspections {
                    println!("{}", inspection.describe());
                }
            }
        }
        Commands::Config(args) => {
            FramingConfig::default().save_to_file(&args.write)?;
            println!("Configuration written to: {}", args.write.display());
        }
    }

    Ok(())
}
