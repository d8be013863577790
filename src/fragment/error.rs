//! Error types emitted while classifying scanned QR text.

use thiserror::Error;

/// Scanned text is not a UR fragment.
///
/// This is a recoverable condition: the scanner may simply have picked up an
/// unrelated QR code, so the session is left untouched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The text does not start with the `ur:` scheme.
    #[error("not a recognised UR code: missing \"ur:\" prefix")]
    MissingScheme,
    /// The text carries an `i-n` segment that is not a valid part marker.
    #[error("malformed UR part marker: {0}")]
    InvalidMarker(#[from] MarkerError),
}

/// Errors produced while parsing an `i-n` part marker.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MarkerError {
    /// The marker lacks the `-` separator.
    #[error("part marker missing '-' separator")]
    MissingSeparator,
    /// A marker component contains non-digit characters.
    #[error("part marker component is not numeric")]
    NotNumeric,
    /// A marker component does not fit in `u32`.
    #[error("part marker component out of range")]
    OutOfRange,
    /// Sequence numbers and totals start at one.
    #[error("part marker component must be non-zero")]
    Zero,
}
