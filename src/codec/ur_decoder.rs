//! [`FragmentDecoder`] implementation backed by [`ur::Decoder`].

use std::fmt;

use super::{DecodedPayload, FragmentDecoder};
use crate::fragment::Fragment;

/// Multi-part decoder wrapping the external fountain decoder.
///
/// Fragments are lower-cased before submission because QR alphanumeric mode
/// transports UR text upper-cased. The UR type of the first accepted fragment
/// pins the type for the rest of the session; a fragment declaring another
/// type fails the decode.
#[derive(Default)]
pub struct UrDecoder {
    inner: ur::Decoder,
    ur_type: Option<String>,
    received: usize,
    payload: Option<Vec<u8>>,
    failure: Option<String>,
}

impl UrDecoder {
    /// Create an empty decoder.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of fragments the inner decoder accepted.
    #[must_use]
    pub const fn received(&self) -> usize { self.received }

    fn fail(&mut self, reason: String) {
        tracing::warn!(%reason, "ur decoder failed");
        self.failure = Some(reason);
    }
}

impl FragmentDecoder for UrDecoder {
    fn receive(&mut self, fragment: &str) {
        if self.is_complete() {
            return;
        }
        let normalized = fragment.to_ascii_lowercase();
        let parsed = match Fragment::parse(&normalized) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.fail(err.to_string());
                return;
            }
        };
        match &self.ur_type {
            Some(expected) if expected != parsed.ur_type() => {
                let reason = format!(
                    "UR type mismatch: expected {expected}, found {}",
                    parsed.ur_type()
                );
                self.fail(reason);
                return;
            }
            Some(_) => {}
            None => self.ur_type = Some(parsed.ur_type().to_owned()),
        }

        if let Err(err) = self.inner.receive(&normalized) {
            self.fail(err.to_string());
            return;
        }
        self.received += 1;

        if self.inner.complete() {
            match self.inner.message() {
                Ok(Some(bytes)) => self.payload = Some(bytes),
                Ok(None) => {}
                Err(err) => self.fail(err.to_string()),
            }
        }
    }

    fn is_complete(&self) -> bool { self.payload.is_some() || self.failure.is_some() }

    fn is_success(&self) -> bool { self.payload.is_some() && self.failure.is_none() }

    fn result(&self) -> Option<DecodedPayload> {
        let bytes = self.payload.clone()?;
        let ur_type = self.ur_type.clone().unwrap_or_default();
        Some(DecodedPayload::new(ur_type, bytes))
    }

    fn error(&self) -> Option<String> { self.failure.clone() }
}

impl fmt::Debug for UrDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrDecoder")
            .field("ur_type", &self.ur_type)
            .field("received", &self.received)
            .field("complete", &self.is_complete())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}
