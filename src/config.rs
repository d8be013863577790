//! Application configuration.
//!
//! [`AppConfig`] is built once at startup from the parsed command line
//! (including its environment-variable fallbacks) and validated into the
//! typed option structs the library consumes.

use std::{
    num::{NonZeroU32, NonZeroUsize},
    path::PathBuf,
    time::Duration,
};

use thiserror::Error;

use crate::{
    cli::{Cli, Command, EncodeArgs, InspectArgs, Mode, ReadArgs},
    codec::{
        CRYPTO_PSBT,
        DEFAULT_MAX_FRAGMENT_LEN,
        DEFAULT_MIN_FRAGMENT_LEN,
        EncodeError,
        EncodeOptions,
        is_valid_ur_type,
    },
    fragment::SequenceNumber,
    render::{DEFAULT_FRAME_INTERVAL, RenderOptions},
    scanner::{CameraPreference, DEFAULT_MAX_SCANS_PER_SECOND, ScanOptions},
};

/// Errors raised while validating configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A setting that must be positive was zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    /// The UR type tag is malformed.
    #[error("invalid UR type {0:?}")]
    InvalidType(String),
    /// Encoder options are inconsistent.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Where to read input from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    #[default]
    Stdin,
    /// A file.
    Path(PathBuf),
}

impl From<Option<PathBuf>> for InputSource {
    fn from(path: Option<PathBuf>) -> Self { path.map_or(Self::Stdin, Self::Path) }
}

/// Settings for the encode flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeConfig {
    /// PSBT input.
    pub input: InputSource,
    /// UR type tag.
    pub ur_type: String,
    /// Fragment sizing.
    pub encode: EncodeOptions,
    /// Drawing options.
    pub render: RenderOptions,
    /// Print fragment text instead of QR codes.
    pub text_only: bool,
}

/// Settings for the read flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadConfig {
    /// Decoded QR text feed.
    pub feed: InputSource,
    /// Scanner options.
    pub scan: ScanOptions,
    /// Print the summary as JSON.
    pub json: bool,
}

/// Settings for the inspect flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InspectConfig {
    /// PSBT input.
    pub input: InputSource,
    /// Print the summary as JSON.
    pub json: bool,
}

/// The flow the application starts in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartupMode {
    /// Display a PSBT as QR codes.
    Encode(EncodeConfig),
    /// Read QR codes back into a PSBT.
    Read(ReadConfig),
    /// Summarise a PSBT.
    Inspect(InspectConfig),
}

/// Validated application configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Log filter directives, if any were given.
    pub log_filter: Option<String>,
    /// Initial flow.
    pub mode: StartupMode,
}

impl AppConfig {
    /// Validate the parsed command line.
    ///
    /// Without a subcommand the `--mode` flag (or `PSBT_QR_MODE`) picks the
    /// flow, using defaults for everything else.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for zero-valued or inconsistent settings.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let command = cli.command.unwrap_or(match cli.mode {
            Mode::Encode => Command::Encode(EncodeArgs::default()),
            Mode::Read => Command::Read(ReadArgs::default()),
        });
        let mode = match command {
            Command::Encode(args) => StartupMode::Encode(encode_config(args)?),
            Command::Read(args) => StartupMode::Read(read_config(args)?),
            Command::Inspect(InspectArgs { input, json }) => StartupMode::Inspect(InspectConfig {
                input: input.into(),
                json,
            }),
        };
        Ok(Self {
            log_filter: cli.log,
            mode,
        })
    }
}

fn non_zero_usize(value: Option<usize>, default: NonZeroUsize, name: &'static str) -> Result<NonZeroUsize, ConfigError> {
    value.map_or(Ok(default), |v| NonZeroUsize::new(v).ok_or(ConfigError::Zero(name)))
}

fn encode_config(args: EncodeArgs) -> Result<EncodeConfig, ConfigError> {
    let ur_type = args.ur_type.unwrap_or_else(|| CRYPTO_PSBT.to_owned());
    if !is_valid_ur_type(&ur_type) {
        return Err(ConfigError::InvalidType(ur_type));
    }
    let max = non_zero_usize(args.max_fragment_len, DEFAULT_MAX_FRAGMENT_LEN, "max fragment length")?;
    let min = non_zero_usize(args.min_fragment_len, DEFAULT_MIN_FRAGMENT_LEN, "min fragment length")?;
    let first = match args.first_part {
        Some(n) => SequenceNumber::new(n).ok_or(ConfigError::Zero("first part"))?,
        None => SequenceNumber::first(),
    };
    let frame_interval = match args.frame_interval_ms {
        Some(0) => return Err(ConfigError::Zero("frame interval")),
        Some(ms) => Duration::from_millis(ms),
        None => DEFAULT_FRAME_INTERVAL,
    };
    let max_frames = match args.frames {
        Some(n) => Some(NonZeroUsize::new(n).ok_or(ConfigError::Zero("frame count"))?),
        None => None,
    };
    Ok(EncodeConfig {
        input: args.input.into(),
        ur_type,
        encode: EncodeOptions::new(max, min, first)?,
        render: RenderOptions {
            uppercase: !args.lowercase,
            frame_interval,
            max_frames,
            ..RenderOptions::default()
        },
        text_only: args.text,
    })
}

fn read_config(args: ReadArgs) -> Result<ReadConfig, ConfigError> {
    let rate = match args.max_scans_per_second {
        Some(n) => NonZeroU32::new(n).ok_or(ConfigError::Zero("max scans per second"))?,
        None => DEFAULT_MAX_SCANS_PER_SECOND,
    };
    let camera = args
        .camera
        .map_or_else(CameraPreference::default, |name| match name.parse() {
            Ok(preference) => preference,
            Err(never) => match never {},
        });
    Ok(ReadConfig {
        feed: args.feed.into(),
        scan: ScanOptions::new(rate, camera),
        json: args.json,
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::*;

    fn config(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let mut argv = vec!["psbt-qr"];
        argv.extend_from_slice(args);
        AppConfig::from_cli(Cli::parse_from(argv))
    }

    #[test]
    fn defaults_to_encoding_stdin() {
        let config = config(&["--mode", "encode"]).expect("valid");
        let StartupMode::Encode(encode) = config.mode else {
            panic!("expected encode mode");
        };
        assert_eq!(encode.input, InputSource::Stdin);
        assert_eq!(encode.ur_type, CRYPTO_PSBT);
        assert_eq!(encode.encode, EncodeOptions::default());
        assert!(encode.render.uppercase);
    }

    #[test]
    fn read_mode_uses_scanner_defaults() {
        let config = config(&["--mode", "read"]).expect("valid");
        let StartupMode::Read(read) = config.mode else {
            panic!("expected read mode");
        };
        assert_eq!(read.scan, ScanOptions::default());
        assert_eq!(read.feed, InputSource::Stdin);
    }

    #[test]
    fn subcommand_overrides_mode() {
        let config = config(&["--mode", "read", "inspect", "tx.psbt"]).expect("valid");
        assert_eq!(
            config.mode,
            StartupMode::Inspect(InspectConfig {
                input: InputSource::Path("tx.psbt".into()),
                json: false,
            })
        );
    }

    #[test]
    fn camera_preference_is_parsed() {
        let config = config(&["read", "--camera", "/dev/video2"]).expect("valid");
        let StartupMode::Read(read) = config.mode else {
            panic!("expected read mode");
        };
        assert_eq!(
            read.scan.preferred_camera(),
            &CameraPreference::Device("/dev/video2".to_owned())
        );
    }

    #[rstest]
    #[case(&["encode", "--max-fragment-len", "0"], ConfigError::Zero("max fragment length"))]
    #[case(&["encode", "--first-part", "0"], ConfigError::Zero("first part"))]
    #[case(&["encode", "--frames", "0"], ConfigError::Zero("frame count"))]
    #[case(&["encode", "--frame-interval-ms", "0"], ConfigError::Zero("frame interval"))]
    #[case(&["read", "--max-scans-per-second", "0"], ConfigError::Zero("max scans per second"))]
    #[case(&["encode", "--ur-type", "Crypto PSBT"], ConfigError::InvalidType("Crypto PSBT".to_owned()))]
    fn rejects_invalid_settings(#[case] args: &[&str], #[case] expected: ConfigError) {
        assert_eq!(config(args), Err(expected));
    }

    #[test]
    fn rejects_a_first_part_that_needs_long_fast_forward() {
        let err = config(&["encode", "--first-part", "4000000000"]).expect_err("too far");
        assert!(matches!(err, ConfigError::Encode(EncodeError::SequenceTooLarge { .. })));
    }

    #[test]
    fn rejects_inverted_fragment_bounds() {
        let err = config(&["encode", "--max-fragment-len", "20", "--min-fragment-len", "50"])
            .expect_err("inverted bounds");
        assert!(matches!(err, ConfigError::Encode(EncodeError::FragmentBounds { .. })));
    }
}
