//! PSBT adapters.
//!
//! Parsing and serialisation of the PSBT binary format are delegated to the
//! [`bitcoin`] crate. This module loads PSBTs from the formats people paste
//! around, wraps them in the CBOR byte string the `crypto-psbt` UR type
//! expects, and turns a finished scan into a parsed PSBT plus a summary.

pub mod cbor;
pub mod error;
pub mod load;
pub mod summary;

pub use bitcoin::Psbt;
pub use cbor::{unwrap_byte_string, wrap_byte_string};
pub use error::PsbtError;
pub use load::{PSBT_MAGIC, load, to_ur_payload};
pub use summary::{InputSummary, OutputSummary, PsbtSummary, ScriptType};

use crate::{
    codec::{BYTES, CRYPTO_PSBT, decode_single_part},
    reassembly::ScanResult,
};

/// Turn the payload of a successful scan into a parsed PSBT.
///
/// Single-part results are decoded from their text first. Both
/// `crypto-psbt` and `bytes` payloads are accepted.
///
/// # Errors
///
/// Returns [`PsbtError::UnexpectedType`] for any other UR type, and the
/// decode, CBOR or parse error for malformed payloads.
pub fn psbt_from_outcome(result: &ScanResult) -> Result<Psbt, PsbtError> {
    let payload = match result {
        ScanResult::SinglePart(fragment) => decode_single_part(fragment.text())?,
        ScanResult::Reassembled(payload) => payload.clone(),
    };
    match payload.ur_type() {
        CRYPTO_PSBT | BYTES => {
            let bytes = unwrap_byte_string(payload.bytes())?;
            Psbt::deserialize(&bytes).map_err(|err| PsbtError::Parse(err.to_string()))
        }
        other => Err(PsbtError::UnexpectedType(other.to_owned())),
    }
}
