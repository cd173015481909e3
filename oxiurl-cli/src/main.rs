//! OxiUrl CLI - URL-safe text compression
//!
//! Compresses short texts into strings that can be pasted into a URL, and
//! expands them back.

mod commands;
mod logging;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_compress, cmd_expand, cmd_inspect, cmd_utf8_decode, cmd_utf8_encode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxiurl")]
#[command(author, version, about = "URL-safe text compression")]
#[command(long_about = "
OxiUrl compresses short texts into base64url strings (or raw 8-bit output)
using an adaptive Huffman model over a sliding window.

Examples:
  oxiurl compress 'Hello, World!'
  oxiurl expand SGVsbG8
  oxiurl compress -i notes.txt --raw > notes.oxu
  oxiurl expand -i notes.oxu --raw
  oxiurl inspect --json 'abcabcabcabc'
  oxiurl utf8-encode 'caf\u{e9}'
  oxiurl utf8-decode '63 61 66 c3 a9'
")]
struct Cli {
    /// Log filter directives (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress text
    #[command(alias = "c")]
    Compress {
        /// Text to compress (stdin if omitted)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Write raw 8-bit units instead of base64url text
        #[arg(short, long)]
        raw: bool,
    },

    /// Expand compressed text
    #[command(alias = "x")]
    Expand {
        /// Compressed text (stdin if omitted)
        text: Option<String>,

        /// Read the compressed data from a file
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Input is raw 8-bit units instead of base64url text
        #[arg(short, long)]
        raw: bool,
    },

    /// Show how a text would be compressed
    #[command(alias = "i")]
    Inspect {
        /// Text to inspect (stdin if omitted)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Print the UTF-8 transcoding of a text as hex
    Utf8Encode {
        /// Text to transcode (stdin if omitted)
        text: Option<String>,
    },

    /// Decode hex UTF-8 bytes into text
    Utf8Decode {
        /// Hex bytes, optionally separated by whitespace
        hex: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(&cli.log_level);

    let result = match cli.command {
        Commands::Compress { text, input, raw } => cmd_compress(text, input.as_deref(), raw),
        Commands::Expand { text, input, raw } => cmd_expand(text, input.as_deref(), raw),
        Commands::Inspect { text, input, json } => cmd_inspect(text, input.as_deref(), json),
        Commands::Utf8Encode { text } => cmd_utf8_encode(text),
        Commands::Utf8Decode { hex } => cmd_utf8_decode(&hex),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
