//! Scan reassembly controller.
//!
//! [`ScanSession`] sits between a QR scanner and the fountain decoder. It
//! filters out text that is not a UR code, drops repeated scans of the same
//! frame, short-circuits single-part codes and reports progress until the
//! decoder signals completion.

pub mod error;
pub mod outcome;
pub mod progress;
pub mod session;

pub use error::ScanError;
pub use outcome::{ScanOutcome, ScanResult, ScanStatus};
pub use progress::Progress;
pub use session::ScanSession;

#[cfg(test)]
mod tests;
