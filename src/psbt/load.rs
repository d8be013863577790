//! Loading PSBTs from raw bytes, hex or base64.

use bitcoin::{Psbt, hex::FromHex};

use super::{PsbtError, wrap_byte_string};

/// Magic bytes every serialised PSBT starts with.
pub const PSBT_MAGIC: [u8; 5] = *b"psbt\xff";

/// Parse a PSBT from binary, hex or base64 input.
///
/// Binary input is recognised by its magic bytes. Anything else must be
/// UTF-8 text; whitespace is ignored, so wrapped base64 from a file or
/// clipboard loads as-is.
///
/// # Errors
///
/// Returns [`PsbtError::UnrecognisedText`] for text in neither encoding and
/// [`PsbtError::Parse`] when the decoded bytes are not a valid PSBT.
pub fn load(input: &[u8]) -> Result<Psbt, PsbtError> {
    if input.starts_with(&PSBT_MAGIC) {
        tracing::debug!(len = input.len(), "loading binary PSBT");
        return parse_binary(input);
    }
    let text = std::str::from_utf8(input).map_err(|_| PsbtError::UnrecognisedText)?;
    let cleaned: String = text.split_whitespace().collect();
    if cleaned.is_empty() {
        return Err(PsbtError::UnrecognisedText);
    }
    if cleaned.bytes().all(|b| b.is_ascii_hexdigit()) {
        tracing::debug!(len = cleaned.len(), "loading hex PSBT");
        let bytes = Vec::<u8>::from_hex(&cleaned).map_err(|_| PsbtError::UnrecognisedText)?;
        return parse_binary(&bytes);
    }
    tracing::debug!(len = cleaned.len(), "loading base64 PSBT");
    cleaned
        .parse::<Psbt>()
        .map_err(|err| PsbtError::Parse(err.to_string()))
}

fn parse_binary(bytes: &[u8]) -> Result<Psbt, PsbtError> {
    Psbt::deserialize(bytes).map_err(|err| PsbtError::Parse(err.to_string()))
}

/// Serialise `psbt` into the CBOR-wrapped payload of a `crypto-psbt` UR.
///
/// # Errors
///
/// Returns [`PsbtError::Cbor`] if the CBOR encoder fails.
pub fn to_ur_payload(psbt: &Psbt) -> Result<Vec<u8>, PsbtError> { wrap_byte_string(&psbt.serialize()) }
