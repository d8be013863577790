//! The `i-n` part marker carried by multi-part UR fragments.
//!
//! A marker names the fountain sequence number of the fragment and the number
//! of pure fragments the payload was split into. Sequence numbers beyond the
//! declared total are legal: the encoder keeps emitting mixed parts after the
//! first `n`.

use std::{num::NonZeroU32, str::FromStr};

use derive_more::{Display, From, Into};

use super::MarkerError;

/// One-based fountain sequence number of a fragment.
///
/// # Examples
///
/// ```
/// use psbt_qr::fragment::SequenceNumber;
/// let seq = SequenceNumber::new(3).expect("non-zero");
/// assert_eq!(seq.get(), 3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("{_0}")]
pub struct SequenceNumber(NonZeroU32);

impl SequenceNumber {
    /// Construct a sequence number, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }

    /// Return the first sequence number emitted by an encoder.
    #[must_use]
    pub const fn first() -> Self { Self(NonZeroU32::MIN) }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0.get() }
}

/// Declared number of pure fragments the payload was split into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("{_0}")]
pub struct PartCount(NonZeroU32);

impl PartCount {
    /// Construct a part count, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(inner) => Some(Self(inner)),
            None => None,
        }
    }

    /// Return the underlying numeric value.
    #[must_use]
    pub const fn get(self) -> u32 { self.0.get() }
}

/// Parsed `i-n` marker of a multi-part fragment.
///
/// # Examples
///
/// ```
/// use psbt_qr::fragment::PartMarker;
/// let marker: PartMarker = "12-10".parse().expect("valid marker");
/// assert_eq!(marker.sequence().get(), 12);
/// assert_eq!(marker.total().get(), 10);
/// assert!(marker.is_mixed());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display("{sequence}-{total}")]
pub struct PartMarker {
    sequence: SequenceNumber,
    total: PartCount,
}

impl PartMarker {
    /// Create a marker from its components.
    #[must_use]
    pub const fn new(sequence: SequenceNumber, total: PartCount) -> Self {
        Self { sequence, total }
    }

    /// Fountain sequence number of the fragment.
    #[must_use]
    pub const fn sequence(&self) -> SequenceNumber { self.sequence }

    /// Declared total of pure fragments.
    #[must_use]
    pub const fn total(&self) -> PartCount { self.total }

    /// Report whether the fragment lies past the pure range and therefore
    /// carries a fountain mix of several pure fragments.
    #[must_use]
    pub const fn is_mixed(&self) -> bool { self.sequence.get() > self.total.get() }
}

impl FromStr for PartMarker {
    type Err = MarkerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sequence, total) = s.split_once('-').ok_or(MarkerError::MissingSeparator)?;
        let sequence = parse_component(sequence)?;
        let total = parse_component(total)?;
        Ok(Self {
            sequence: SequenceNumber::new(sequence).ok_or(MarkerError::Zero)?,
            total: PartCount::new(total).ok_or(MarkerError::Zero)?,
        })
    }
}

fn parse_component(raw: &str) -> Result<u32, MarkerError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MarkerError::NotNumeric);
    }
    raw.parse().map_err(|_| MarkerError::OutOfRange)
}
