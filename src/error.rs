//! Canonical error and result types for the `psbt-qr` application layer.
//!
//! Library modules report their own focused error enums. [`AppError`] gathers
//! them for the binary so every flow can propagate with `?`.

use std::io;

use thiserror::Error;

use crate::{
    codec::EncodeError,
    config::ConfigError,
    psbt::PsbtError,
    render::RenderError,
    scanner::DeviceError,
};

/// Top-level error type for the `psbt-qr` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The PSBT could not be loaded or unpacked.
    #[error(transparent)]
    Psbt(#[from] PsbtError),
    /// Fragment generation failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Drawing a QR code failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The camera could not be used.
    #[error(transparent)]
    Device(#[from] DeviceError),
    /// The scan ended without a payload.
    #[error("scan incomplete: {0}")]
    Incomplete(String),
    /// The scan task panicked.
    #[error("scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    /// Serialising the summary failed.
    #[error("failed to serialise summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Canonical result alias used by the application layer.
pub type Result<T> = std::result::Result<T, AppError>;
