//! Error types for the UR codec adapters.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::fragment::FormatError;

/// Errors produced while configuring or running the fragment encoder.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The UR type tag uses characters outside `[a-z0-9-]`.
    #[error("invalid UR type {0:?}: expected lowercase letters, digits and '-'")]
    InvalidType(String),
    /// The minimum fragment length exceeds the maximum.
    #[error("minimum fragment length {min} exceeds maximum {max}")]
    FragmentBounds {
        /// Configured minimum fragment length.
        min: NonZeroUsize,
        /// Configured maximum fragment length.
        max: NonZeroUsize,
    },
    /// The encoder would have to skip too many parts to reach the start.
    #[error("start sequence {sequence} exceeds the limit of {max}")]
    SequenceTooLarge {
        /// Requested start sequence.
        sequence: u32,
        /// Largest accepted start sequence.
        max: u32,
    },
    /// The external codec rejected the payload or failed to emit a part.
    #[error("UR encoder failed: {0}")]
    Codec(String),
}

/// Errors produced while decoding a single-part UR.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The text is not a UR at all.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The text carries an `i-n` marker and needs a stateful decoder.
    #[error("fragment is part of a multi-part UR")]
    MultiPart,
    /// The external codec rejected the body.
    #[error("UR decoder failed: {0}")]
    Codec(String),
}
