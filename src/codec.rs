//! Adapters around the external UR fountain codec.
//!
//! The fountain coding, bytewords and CRC checks live in the [`ur`] crate.
//! This module wraps them behind two seams:
//!
//! - [`FragmentDecoder`]: the stateful decoder contract consumed by the
//!   reassembly controller, implemented for the real codec by [`UrDecoder`].
//! - [`FragmentStream`]: a lazily generated, restartable sequence of fragment
//!   strings for a payload.
//!
//! # Error Handling
//!
//! Configuration mistakes surface as [`EncodeError`]. Decoder failures are
//! recorded inside the decoder and reported through
//! [`FragmentDecoder::error`] so callers can surface the codec's reason
//! verbatim.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod single;
pub mod ur_decoder;

pub use decoder::{DecodedPayload, FragmentDecoder};
pub use encoder::{
    DEFAULT_MAX_FRAGMENT_LEN,
    DEFAULT_MIN_FRAGMENT_LEN,
    EncodeOptions,
    FragmentStream,
    MAX_START_SEQUENCE,
    encode,
};
pub use error::{DecodeError, EncodeError};
pub use single::{decode_single_part, encode_single_part};
pub use ur_decoder::UrDecoder;

/// UR type registered for PSBT payloads.
pub const CRYPTO_PSBT: &str = "crypto-psbt";

/// Generic UR type for opaque byte strings.
pub const BYTES: &str = "bytes";

/// Check that `ur_type` only uses the characters UR allows in a type tag.
#[must_use]
pub fn is_valid_ur_type(ur_type: &str) -> bool {
    !ur_type.is_empty()
        && ur_type
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}
