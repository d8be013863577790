//! The stateful reassembly controller.

use std::{collections::HashSet, fmt};

use super::{Progress, ScanError, ScanOutcome, ScanResult, ScanStatus};
use crate::{
    codec::{FragmentDecoder, UrDecoder},
    fragment::{Fragment, PartCount},
    metrics::{self, FragmentOutcome, SessionResult},
};

type DecoderFactory<D> = Box<dyn Fn() -> D + Send>;

/// One attempt at reading a (possibly animated) UR QR code.
///
/// Each distinct fragment text reaches the decoder at most once. The decoder
/// is built when the first multi-part fragment arrives and dropped again on
/// [`reset`](Self::reset). Once the session is terminal it ignores further
/// input until reset.
///
/// # Examples
///
/// ```
/// use psbt_qr::reassembly::{ScanSession, ScanStatus};
/// let mut session = ScanSession::new();
/// assert!(session.on_fragment("not-a-ur-code").is_err());
/// assert_eq!(session.progress().percent(), 0);
///
/// let status = session
///     .on_fragment("ur:bytes/hdcxdwinvezm")
///     .expect("single-part codes complete immediately");
/// assert_eq!(status, ScanStatus::Completed);
/// assert!(session.is_terminal());
/// ```
pub struct ScanSession<D: FragmentDecoder = UrDecoder> {
    seen: HashSet<String>,
    decoder: Option<D>,
    make_decoder: DecoderFactory<D>,
    declared_total: Option<PartCount>,
    progress: Progress,
    outcome: ScanOutcome,
}

impl ScanSession<UrDecoder> {
    /// Create a session backed by [`UrDecoder`].
    #[must_use]
    pub fn new() -> Self { Self::with_decoder_factory(UrDecoder::new) }
}

impl Default for ScanSession<UrDecoder> {
    fn default() -> Self { Self::new() }
}

impl<D: FragmentDecoder> ScanSession<D> {
    /// Create a session that builds its decoder with `make_decoder`.
    #[must_use]
    pub fn with_decoder_factory(make_decoder: impl Fn() -> D + Send + 'static) -> Self {
        Self {
            seen: HashSet::new(),
            decoder: None,
            make_decoder: Box::new(make_decoder),
            declared_total: None,
            progress: Progress::ZERO,
            outcome: ScanOutcome::Pending,
        }
    }

    /// Process one piece of scanner output.
    ///
    /// Returns the effect the text had on the session. Terminal sessions
    /// report [`ScanStatus::Ignored`] without examining the text.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Format`] when `text` is not a UR code or carries a
    /// malformed part marker; the session is left exactly as it was. Terminal
    /// sessions never report this error, since they do not examine the text.
    /// Returns [`ScanError::Decoder`] when the decoder fails; the session is
    /// then terminal with [`ScanOutcome::Failure`].
    pub fn on_fragment(&mut self, text: &str) -> Result<ScanStatus, ScanError> {
        if self.is_terminal() {
            return Ok(ScanStatus::Ignored);
        }

        let fragment = match Fragment::parse(text) {
            Ok(fragment) => fragment,
            Err(err) => {
                tracing::warn!(error = %err, "rejected scanned text");
                metrics::inc_fragments(FragmentOutcome::Rejected);
                return Err(err.into());
            }
        };

        if !self.seen.insert(text.to_owned()) {
            metrics::inc_fragments(FragmentOutcome::Duplicate);
            return Ok(ScanStatus::Duplicate);
        }
        metrics::inc_fragments(FragmentOutcome::Accepted);

        match fragment.marker() {
            None => {
                tracing::info!(ur_type = fragment.ur_type(), "single-part code scanned");
                self.succeed(ScanResult::SinglePart(fragment));
                Ok(ScanStatus::Completed)
            }
            Some(marker) => {
                self.declared_total = Some(marker.total());
                self.feed_decoder(text, marker.total())
            }
        }
    }

    fn feed_decoder(&mut self, text: &str, total: PartCount) -> Result<ScanStatus, ScanError> {
        let make_decoder = &self.make_decoder;
        let decoder = self.decoder.get_or_insert_with(|| make_decoder());
        decoder.receive(text);

        let estimate = match decoder.estimated_percent_complete() {
            Some(estimate) => Progress::from_estimate(estimate),
            None => Progress::from_fraction(self.seen.len(), total.get()),
        };
        self.progress = self.progress.max(estimate);
        tracing::debug!(
            scanned = self.seen.len(),
            total = total.get(),
            progress = self.progress.percent(),
            "fragment accepted"
        );

        if !decoder.is_complete() {
            return Ok(ScanStatus::Accepted {
                progress: self.progress,
            });
        }

        let result = if decoder.is_success() {
            decoder
                .result()
                .ok_or_else(|| "decoder reported success without a payload".to_owned())
        } else {
            Err(decoder
                .error()
                .unwrap_or_else(|| "decoder failed without a reason".to_owned()))
        };
        match result {
            Ok(payload) => {
                tracing::info!(
                    ur_type = payload.ur_type(),
                    len = payload.bytes().len(),
                    scanned = self.seen.len(),
                    "multi-part payload reassembled"
                );
                self.succeed(ScanResult::Reassembled(payload));
                Ok(ScanStatus::Completed)
            }
            Err(reason) => {
                tracing::warn!(%reason, scanned = self.seen.len(), "scan session failed");
                metrics::inc_sessions(SessionResult::Failure);
                self.outcome = ScanOutcome::Failure(reason.clone());
                Err(ScanError::Decoder { reason })
            }
        }
    }

    fn succeed(&mut self, result: ScanResult) {
        metrics::inc_sessions(SessionResult::Success);
        self.progress = Progress::COMPLETE;
        self.outcome = ScanOutcome::Success(result);
    }

    /// Discard every scanned fragment and the decoder, returning to pending.
    pub fn reset(&mut self) {
        if self.seen.is_empty() && self.decoder.is_none() && !self.is_terminal() {
            return;
        }
        tracing::debug!(scanned = self.seen.len(), "scan session reset");
        self.seen.clear();
        self.decoder = None;
        self.declared_total = None;
        self.progress = Progress::ZERO;
        self.outcome = ScanOutcome::Pending;
    }

    /// Current progress estimate.
    #[must_use]
    pub const fn progress(&self) -> Progress { self.progress }

    /// Borrow the session outcome.
    #[must_use]
    pub const fn outcome(&self) -> &ScanOutcome { &self.outcome }

    /// Consume the session, returning its outcome.
    #[must_use]
    pub fn into_outcome(self) -> ScanOutcome { self.outcome }

    /// Report whether the session succeeded or failed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool { self.outcome.is_terminal() }

    /// Number of distinct fragments accepted so far.
    #[must_use]
    pub fn scanned_len(&self) -> usize { self.seen.len() }

    /// Part count declared by the most recent multi-part fragment.
    #[must_use]
    pub const fn declared_total(&self) -> Option<PartCount> { self.declared_total }

    /// Borrow the decoder, if one has been built.
    #[must_use]
    pub const fn decoder(&self) -> Option<&D> { self.decoder.as_ref() }
}

impl<D: FragmentDecoder + fmt::Debug> fmt::Debug for ScanSession<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanSession")
            .field("scanned", &self.seen.len())
            .field("decoder", &self.decoder)
            .field("declared_total", &self.declared_total)
            .field("progress", &self.progress)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
