//! Integer progress percentage.

use derive_more::Display;

/// Reassembly progress as a whole percentage in `0..=100`.
///
/// Progress is a heuristic lower bound. Reaching 100 does not mean the
/// payload has been recovered; only the decoder decides that.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}%")]
pub struct Progress(u8);

impl Progress {
    /// No fragments seen.
    pub const ZERO: Self = Self(0);
    /// Upper bound.
    pub const COMPLETE: Self = Self(100);

    /// Percentage of `seen` fragments out of a declared `total`.
    ///
    /// Rounds down and saturates at 100. A zero total yields zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use psbt_qr::reassembly::Progress;
    /// assert_eq!(Progress::from_fraction(3, 10).percent(), 30);
    /// assert_eq!(Progress::from_fraction(2, 3).percent(), 66);
    /// assert_eq!(Progress::from_fraction(12, 10).percent(), 100);
    /// ```
    #[must_use]
    pub fn from_fraction(seen: usize, total: u32) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        let seen = u64::try_from(seen).unwrap_or(u64::MAX);
        let percent = seen.saturating_mul(100) / u64::from(total);
        Self(u8::try_from(percent.min(100)).unwrap_or(100))
    }

    /// Convert a decoder estimate in `0.0..=1.0` to a percentage.
    ///
    /// Values outside the range are clamped; `NaN` maps to zero.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to 0..=100 before the cast"
    )]
    pub fn from_estimate(estimate: f64) -> Self {
        if estimate.is_nan() {
            return Self::ZERO;
        }
        let percent = (estimate.clamp(0.0, 1.0) * 100.0).floor();
        Self(percent as u8)
    }

    /// Whole percentage.
    #[must_use]
    pub const fn percent(self) -> u8 { self.0 }
}
