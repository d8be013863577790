//! Single-part UR strings: `ur:<type>/<bytewords>`.

use ur::bytewords::{self, Style};

use super::{DecodeError, DecodedPayload, EncodeError, is_valid_ur_type};
use crate::fragment::{Fragment, UR_SCHEME};

/// Encode `payload` as one self-contained UR string.
///
/// # Errors
///
/// Returns [`EncodeError::InvalidType`] when `ur_type` is not a valid UR type
/// tag.
///
/// # Examples
///
/// ```
/// use psbt_qr::codec::{decode_single_part, encode_single_part};
/// let text = encode_single_part("bytes", b"data").expect("valid type");
/// assert!(text.starts_with("ur:bytes/"));
/// let decoded = decode_single_part(&text).expect("round trip");
/// assert_eq!(decoded.bytes(), b"data");
/// ```
pub fn encode_single_part(ur_type: &str, payload: &[u8]) -> Result<String, EncodeError> {
    if !is_valid_ur_type(ur_type) {
        return Err(EncodeError::InvalidType(ur_type.to_owned()));
    }
    let body = bytewords::encode(payload, Style::Minimal);
    Ok(format!("{UR_SCHEME}{ur_type}/{body}"))
}

/// Decode a single-part UR string scanned in any letter case.
///
/// # Errors
///
/// Returns [`DecodeError::Format`] for non-UR text, [`DecodeError::MultiPart`]
/// when the text carries a part marker, and [`DecodeError::Codec`] when the
/// bytewords body or its checksum is invalid.
pub fn decode_single_part(text: &str) -> Result<DecodedPayload, DecodeError> {
    let fragment = Fragment::parse(text)?;
    if fragment.is_multi_part() {
        return Err(DecodeError::MultiPart);
    }
    let normalized = text.to_ascii_lowercase();
    let body = normalized[UR_SCHEME.len()..]
        .split_once('/')
        .map(|(_, body)| body)
        .ok_or_else(|| DecodeError::Codec("missing UR body".to_owned()))?;
    let bytes =
        bytewords::decode(body, Style::Minimal).map_err(|err| DecodeError::Codec(err.to_string()))?;
    Ok(DecodedPayload::new(fragment.ur_type(), bytes))
}
