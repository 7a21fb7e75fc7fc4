//! vparse - command-line smoke-test harness for the bitstream parsers.
//!
//! The core crates never perform I/O (they consume a borrowed byte slice
//! and a timestamp); this binary is the thin read-a-file-and-print-JSON
//! wrapper around them, not a decoder or container demuxer.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "vparse")]
#[command(about = "Parse H.264/H.265/MPEG-2/VP8/VP9/VC-1/JPEG bitstreams and print their structure", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Elementary-stream codec the input file carries. vparse has no
/// container/demuxer layer (that's explicitly out of scope), so the
/// caller names the codec directly rather than relying on autodetection.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Codec {
    Avc,
    Hevc,
    Mpeg2,
    Vp8,
    Vp9,
    Vc1,
    Jpeg,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a file and print a one-line summary per picture/frame found.
    Info {
        /// Input elementary-stream file
        #[arg(short, long)]
        file: PathBuf,

        /// Codec the file contains
        #[arg(short, long, value_enum)]
        codec: Codec,
    },

    /// Parse a file and print its full structure as JSON.
    Dump {
        /// Input elementary-stream file
        #[arg(short, long)]
        file: PathBuf,

        /// Codec the file contains
        #[arg(short, long, value_enum)]
        codec: Codec,
    },

    /// Parse a file and exit nonzero on the first error encountered.
    Validate {
        /// Input elementary-stream file
        #[arg(short, long)]
        file: PathBuf,

        /// Codec the file contains
        #[arg(short, long, value_enum)]
        codec: Codec,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::WARN))
        .init();

    match cli.command {
        Commands::Info { file, codec } => commands::info::run(&file, codec),
        Commands::Dump { file, codec } => commands::dump::run(&file, codec),
        Commands::Validate { file, codec } => commands::validate::run(&file, codec),
    }
}
