//! Command line interface for the `psbt-qr` binary.
//!
//! Kept free of crate-internal types so `build.rs` can compile it on its own
//! to render the man page.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command line arguments for the `psbt-qr` binary.
#[derive(Debug, Parser)]
#[command(
    name = "psbt-qr",
    version,
    about = "Show PSBTs as animated UR QR codes and read them back"
)]
pub struct Cli {
    /// Log filter directives, for example `psbt_qr=debug`.
    #[arg(long, env = "PSBT_QR_LOG", global = true)]
    pub log: Option<String>,

    /// Mode to start in when no subcommand is given.
    #[arg(long, env = "PSBT_QR_MODE", value_enum, default_value_t = Mode::Encode)]
    pub mode: Mode,

    /// What to do.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Startup mode used when no subcommand is given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Show a PSBT read from standard input as QR codes.
    #[default]
    Encode,
    /// Read QR codes from standard input.
    Read,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display a PSBT as an animated UR QR code.
    Encode(EncodeArgs),
    /// Reassemble a PSBT from scanned UR QR text.
    Read(ReadArgs),
    /// Summarise a PSBT.
    Inspect(InspectArgs),
}

/// Arguments for `psbt-qr encode`.
#[derive(Debug, Default, Args)]
pub struct EncodeArgs {
    /// PSBT file in binary, hex or base64. Reads standard input when omitted.
    pub input: Option<PathBuf>,

    /// UR type tag for the payload [default: crypto-psbt].
    #[arg(long)]
    pub ur_type: Option<String>,

    /// Maximum payload bytes per fragment.
    #[arg(long, env = "PSBT_QR_MAX_FRAGMENT_LEN")]
    pub max_fragment_len: Option<usize>,

    /// Minimum payload bytes per fragment.
    #[arg(long, env = "PSBT_QR_MIN_FRAGMENT_LEN")]
    pub min_fragment_len: Option<usize>,

    /// Sequence number of the first fragment shown, at most 10000.
    #[arg(long)]
    pub first_part: Option<u32>,

    /// Milliseconds between animation frames.
    #[arg(long, env = "PSBT_QR_FRAME_INTERVAL_MS")]
    pub frame_interval_ms: Option<u64>,

    /// Stop after this many frames instead of looping until interrupted.
    #[arg(long)]
    pub frames: Option<usize>,

    /// Keep fragment text lower-case inside the QR code.
    #[arg(long)]
    pub lowercase: bool,

    /// Print fragment strings, one per line, instead of drawing QR codes.
    #[arg(long)]
    pub text: bool,
}

/// Arguments for `psbt-qr read`.
#[derive(Debug, Default, Args)]
pub struct ReadArgs {
    /// File with one decoded QR code per line. Reads standard input when
    /// omitted, so the raw output of a QR scanner can be piped in.
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// Upper bound on codes processed per second.
    #[arg(long, env = "PSBT_QR_MAX_SCANS_PER_SECOND")]
    pub max_scans_per_second: Option<u32>,

    /// Preferred camera: `environment`, `user` or a device identifier.
    #[arg(long, env = "PSBT_QR_CAMERA")]
    pub camera: Option<String>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `psbt-qr inspect`.
#[derive(Debug, Default, Args)]
pub struct InspectArgs {
    /// PSBT file in binary, hex or base64. Reads standard input when omitted.
    pub input: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}
