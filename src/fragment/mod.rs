//! Scanned UR fragment primitives.
//!
//! This module collects the small domain types used to classify QR scanner
//! output before it reaches the reassembly controller. Each sub-module
//! focuses on a single concept to keep the code small and easy to audit.

pub mod error;
pub mod marker;
pub mod scanned;

pub use error::{FormatError, MarkerError};
pub use marker::{PartCount, PartMarker, SequenceNumber};
pub use scanned::{Fragment, UR_SCHEME, has_ur_scheme};

#[cfg(test)]
mod tests;
