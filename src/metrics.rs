//! Metric helpers for `psbt-qr`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate. With the
//! `metrics` feature disabled the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

/// Name of the counter tracking scanned fragments.
pub const FRAGMENTS_SCANNED: &str = "psbt_qr_fragments_scanned_total";
/// Name of the counter tracking finished scan sessions.
pub const SESSIONS_FINISHED: &str = "psbt_qr_sessions_finished_total";
/// Name of the counter tracking emitted fragments.
pub const FRAGMENTS_ENCODED: &str = "psbt_qr_fragments_encoded_total";

/// What the reassembly controller did with a scanned fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// A new fragment advanced the session.
    Accepted,
    /// The fragment had already been seen.
    Duplicate,
    /// The text was not a UR code.
    Rejected,
}

impl FragmentOutcome {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            FragmentOutcome::Accepted => "accepted",
            FragmentOutcome::Duplicate => "duplicate",
            FragmentOutcome::Rejected => "rejected",
        }
    }
}

/// How a scan session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionResult {
    /// A payload was recovered.
    Success,
    /// The decoder gave up.
    Failure,
}

impl SessionResult {
    #[cfg_attr(not(feature = "metrics"), allow(dead_code))]
    fn as_str(self) -> &'static str {
        match self {
            SessionResult::Success => "success",
            SessionResult::Failure => "failure",
        }
    }
}

/// Record a scanned fragment with the given outcome.
pub fn inc_fragments(outcome: FragmentOutcome) {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_SCANNED, "outcome" => outcome.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = outcome;
}

/// Record a finished scan session.
pub fn inc_sessions(result: SessionResult) {
    #[cfg(feature = "metrics")]
    counter!(SESSIONS_FINISHED, "result" => result.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = result;
}

/// Record an emitted fragment.
pub fn inc_fragments_encoded() {
    #[cfg(feature = "metrics")]
    counter!(FRAGMENTS_ENCODED).increment(1);
}
