/// TTLV command-line tool: inspect, validate, and hex-dump TTLV messages.
///
/// # Command overview
///
/// ```text
/// ttlv <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect      Print the decoded item tree of a TTLV file
///   validate     Decode a TTLV file and report the first failure in full
///   encode-hex   Print a binary TTLV file as hex
///   help         Print help information
///
/// Global options:
///   -v, --verbose    Raise log level (-v debug, -vv trace)
///   --backtrace      Capture backtraces when errors are tagged
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                    |
/// |------|--------------------------------------------|
/// | 0    | Success                                    |
/// | 1    | Error (I/O failure, invalid message, etc.) |
///
/// Logs and error details go to stderr so stdout can be piped cleanly.
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ttlv_errors::TraceConfig;
use ttlv_wire::{DecoderConfig, decode_hex};

mod cmd_encode_hex;
mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The TTLV command-line tool.
#[derive(Parser)]
#[command(name = "ttlv", version, about = "TTLV message inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise the log level. Repeat for more detail.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Capture a backtrace whenever an error is tagged.
    ///
    /// Without this flag the `TTLV_BACKTRACE`, `RUST_LIB_BACKTRACE`, and
    /// `RUST_BACKTRACE` variables decide.
    #[arg(long, global = true)]
    backtrace: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded item tree of a TTLV file.
    Inspect(InspectArgs),
    /// Decode a TTLV file and report the first failure in full.
    Validate(ValidateArgs),
    /// Print a binary TTLV file as hex.
    EncodeHex(EncodeHexArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Where to read a message from, and how.
///
/// ```text
/// ┌───────────────┬─────────────────────────────────────────────────┐
/// │ Flag          │ Effect                                          │
/// ├───────────────┼─────────────────────────────────────────────────┤
/// │ --hex         │ The file holds hex text, not raw bytes          │
/// │ --max-depth N │ Reject structures nested deeper than N (64)     │
/// └───────────────┴─────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the TTLV message.
    pub file: PathBuf,

    /// Treat the file as hex text (whitespace and a leading `0x` allowed).
    #[arg(long)]
    pub hex: bool,

    /// Maximum structure nesting depth.
    #[arg(long, default_value_t = DecoderConfig::default().max_depth)]
    pub max_depth: usize,
}

impl InputArgs {
    /// Read the message bytes, decoding hex text when `--hex` is set.
    pub fn read(&self) -> Result<Vec<u8>> {
        if self.hex {
            let text = fs::read_to_string(&self.file)
                .with_context(|| format!("cannot read {}", self.file.display()))?;
            let bytes = decode_hex(&text)
                .with_context(|| format!("{} is not valid hex", self.file.display()))?;
            Ok(bytes)
        } else {
            read_bytes(&self.file)
        }
    }

    pub fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            max_depth: self.max_depth,
        }
    }
}

/// Arguments for `ttlv inspect`.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `ttlv validate`.
///
/// Exits 0 when the whole file decodes, 1 otherwise.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for `ttlv encode-hex`.
#[derive(clap::Args)]
pub struct EncodeHexArgs {
    /// Path to a binary TTLV file.
    pub file: PathBuf,
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("cannot read {}", path.display()))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut trace = TraceConfig::from_env();
    trace.capture_backtrace |= cli.backtrace;
    if let Err(e) = trace.install() {
        tracing::warn!(error = %e, "trace configuration not applied");
    }

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::EncodeHex(args) => cmd_encode_hex::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
