#![doc(html_root_url = "https://docs.rs/psbt-qr/latest")]
//! Public API for the `psbt-qr` library.
//!
//! This crate turns PSBTs into animated UR QR codes and reassembles them from
//! scanned QR text. The fountain coding and the PSBT format are handled by
//! the `ur` and `bitcoin` crates; the crate itself provides the scan
//! reassembly controller, a rate-limited scanner driver and the adapters
//! around those libraries.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod fragment;
pub mod metrics;
pub mod psbt;
pub mod reassembly;
pub mod render;
pub mod scanner;

pub use codec::{DecodedPayload, EncodeOptions, FragmentDecoder, FragmentStream, UrDecoder, encode};
pub use config::{AppConfig, ConfigError, StartupMode};
pub use error::{AppError, Result};
pub use fragment::{FormatError, Fragment};
pub use metrics::{FRAGMENTS_ENCODED, FRAGMENTS_SCANNED, SESSIONS_FINISHED};
pub use psbt::{PsbtError, PsbtSummary, psbt_from_outcome};
pub use reassembly::{Progress, ScanError, ScanOutcome, ScanResult, ScanSession, ScanStatus};
pub use render::{Animation, RenderError, RenderOptions};
pub use scanner::{CameraDevice, DeviceError, QrScanner, ScanHandle, ScanOptions, ScanSink, TextFeedDevice};
