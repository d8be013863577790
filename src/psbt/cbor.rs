//! The CBOR byte-string envelope used by `crypto-psbt` and `bytes` URs.

use minicbor::{Decoder, Encoder};

use super::PsbtError;

/// Wrap `bytes` in a CBOR byte string (major type 2).
///
/// # Examples
///
/// ```
/// use psbt_qr::psbt::{unwrap_byte_string, wrap_byte_string};
/// let wrapped = wrap_byte_string(b"psbt").expect("in-memory encoding");
/// assert_eq!(wrapped, [0x44, b'p', b's', b'b', b't']);
/// assert_eq!(unwrap_byte_string(&wrapped).expect("valid"), b"psbt");
/// ```
///
/// # Errors
///
/// Returns [`PsbtError::Cbor`] if the encoder fails.
pub fn wrap_byte_string(bytes: &[u8]) -> Result<Vec<u8>, PsbtError> {
    let mut encoder = Encoder::new(Vec::with_capacity(bytes.len() + 9));
    encoder
        .bytes(bytes)
        .map_err(|err| PsbtError::Cbor(err.to_string()))?;
    Ok(encoder.into_writer())
}

/// Extract the contents of a CBOR byte string that spans all of `cbor`.
///
/// # Errors
///
/// Returns [`PsbtError::Cbor`] when `cbor` does not start with a byte string
/// or carries trailing data after it.
pub fn unwrap_byte_string(cbor: &[u8]) -> Result<Vec<u8>, PsbtError> {
    let mut decoder = Decoder::new(cbor);
    let bytes = decoder
        .bytes()
        .map_err(|err| PsbtError::Cbor(err.to_string()))?
        .to_vec();
    let trailing = cbor.len() - decoder.position();
    if trailing > 0 {
        return Err(PsbtError::Cbor(format!("{trailing} trailing bytes")));
    }
    Ok(bytes)
}
