//! The stateful decoder contract consumed by the reassembly controller.

/// Payload rebuilt from one or more UR fragments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedPayload {
    ur_type: String,
    bytes: Vec<u8>,
}

impl DecodedPayload {
    /// Construct a new [`DecodedPayload`].
    #[must_use]
    pub fn new(ur_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            ur_type: ur_type.into(),
            bytes,
        }
    }

    /// UR type tag declared by the fragments.
    #[must_use]
    pub fn ur_type(&self) -> &str { &self.ur_type }

    /// Borrow the decoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] { self.bytes.as_slice() }

    /// Consume the payload, returning the owned bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> { self.bytes }
}

/// A stateful decoder that accepts multi-part fragments in any order.
///
/// The contract mirrors the decoders shipped with UR libraries: feeding never
/// fails outright. Instead the decoder records an error and reports itself as
/// complete but unsuccessful, leaving the caller to decide how to surface the
/// reason.
pub trait FragmentDecoder {
    /// Submit one fragment.
    fn receive(&mut self, fragment: &str);

    /// Report whether decoding reached a terminal state.
    fn is_complete(&self) -> bool;

    /// Report whether decoding finished and produced a payload.
    fn is_success(&self) -> bool;

    /// Reassembled payload once [`is_success`](Self::is_success) holds.
    fn result(&self) -> Option<DecodedPayload>;

    /// Failure reason once decoding finished unsuccessfully.
    fn error(&self) -> Option<String>;

    /// Decoder's own completion estimate in `0.0..=1.0`, if it keeps one.
    fn estimated_percent_complete(&self) -> Option<f64> { None }
}

impl<D: FragmentDecoder + ?Sized> FragmentDecoder for Box<D> {
    fn receive(&mut self, fragment: &str) { (**self).receive(fragment); }

    fn is_complete(&self) -> bool { (**self).is_complete() }

    fn is_success(&self) -> bool { (**self).is_success() }

    fn result(&self) -> Option<DecodedPayload> { (**self).result() }

    fn error(&self) -> Option<String> { (**self).error() }

    fn estimated_percent_complete(&self) -> Option<f64> { (**self).estimated_percent_complete() }
}
