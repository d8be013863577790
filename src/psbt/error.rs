//! Error types for the PSBT adapters.

use thiserror::Error;

use crate::codec::DecodeError;

/// Errors raised while loading or unpacking a PSBT.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PsbtError {
    /// Input was text but neither base64 nor hex.
    #[error("PSBT text is neither base64 nor hex")]
    UnrecognisedText,
    /// The bytes are not a valid PSBT.
    #[error("failed to parse PSBT: {0}")]
    Parse(String),
    /// The payload is not a single CBOR byte string.
    #[error("invalid CBOR byte string: {0}")]
    Cbor(String),
    /// The scanned code carries a UR type other than a PSBT.
    #[error("unexpected UR type {0:?}: expected crypto-psbt or bytes")]
    UnexpectedType(String),
    /// The single-part UR could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
