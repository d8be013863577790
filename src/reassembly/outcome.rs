//! Session outcomes and per-fragment status.

use super::Progress;
use crate::{codec::DecodedPayload, fragment::Fragment};

/// What one call to [`on_fragment`](super::ScanSession::on_fragment) did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanStatus {
    /// The text had already been scanned this session.
    Duplicate,
    /// A new multi-part fragment reached the decoder.
    Accepted {
        /// Progress after the fragment was applied.
        progress: Progress,
    },
    /// The session finished successfully with this fragment.
    Completed,
    /// The session was already terminal; the text was not examined.
    Ignored,
}

/// Payload recovered by a successful session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanResult {
    /// A single-part code. The payload is the scanned text itself; decode it
    /// with [`decode_single_part`](crate::codec::decode_single_part).
    SinglePart(Fragment),
    /// Bytes rebuilt by the fountain decoder.
    Reassembled(DecodedPayload),
}

impl ScanResult {
    /// UR type tag of the recovered payload.
    #[must_use]
    pub fn ur_type(&self) -> &str {
        match self {
            Self::SinglePart(fragment) => fragment.ur_type(),
            Self::Reassembled(payload) => payload.ur_type(),
        }
    }
}

/// Terminal state of a scan session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Still collecting fragments.
    #[default]
    Pending,
    /// A payload was recovered.
    Success(ScanResult),
    /// The decoder failed with the given reason.
    Failure(String),
}

impl ScanOutcome {
    /// Report whether the session has finished.
    #[must_use]
    pub const fn is_terminal(&self) -> bool { !matches!(self, Self::Pending) }

    /// Borrow the recovered payload, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&ScanResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// Borrow the failure reason, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}
