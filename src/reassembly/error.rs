//! Errors reported by [`ScanSession`](super::ScanSession).

use thiserror::Error;

use crate::fragment::FormatError;

/// Errors returned from [`ScanSession::on_fragment`](super::ScanSession::on_fragment).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    /// The scanned text was not a UR fragment. The session did not advance.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The decoder gave up. The session is now terminal.
    #[error("decoding failed: {reason}")]
    Decoder {
        /// Failure reason reported by the decoder, verbatim.
        reason: String,
    },
}

impl ScanError {
    /// Report whether scanning may continue after this error.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool { matches!(self, Self::Format(_)) }
}
