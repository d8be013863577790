//! Shared utilities for integration tests.
//!
//! Provides payload and PSBT fixtures plus a helper that encodes a payload
//! into its pure fragment strings.

// Items in this shared module may not be used by all test binaries that import it.
#![allow(
    dead_code,
    reason = "shared test utilities are not used by all test binaries"
)]

use std::str::FromStr;

use bitcoin::{
    Amount,
    OutPoint,
    Psbt,
    ScriptBuf,
    Sequence,
    Transaction,
    TxIn,
    TxOut,
    Txid,
    Witness,
    absolute,
    transaction,
};
use psbt_qr::codec::{EncodeOptions, encode};
use rstest::fixture;

/// Deterministic payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| u8::try_from(i * 7 % 256).expect("fits in u8"))
        .collect()
}

/// Encode `data` and collect its pure fragments.
pub fn fragments(ur_type: &str, data: &[u8]) -> Vec<String> {
    encode(ur_type, data, EncodeOptions::default())
        .expect("valid options")
        .collect::<Result<_, _>>()
        .expect("fragments")
}

/// Write `lines` to a fresh temporary feed file.
pub fn feed_file(name: &str, lines: &[String]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("psbt-qr-{}-{name}.txt", std::process::id()));
    std::fs::write(&path, lines.join("\n")).expect("write feed file");
    path
}

/// A PSBT spending a P2WPKH output to a taproot output and change.
#[fixture]
pub fn sample_psbt() -> Psbt {
    let script = |hex: &str| ScriptBuf::from_hex(hex).expect("valid script hex");
    let tx = Transaction {
        version: transaction::Version::TWO,
        lock_time: absolute::LockTime::from_consensus(840_000),
        input: (0..4)
            .map(|vout| TxIn {
                previous_output: OutPoint {
                    txid: Txid::from_str(
                        "f61b1742ca13176464adb3cb66050c00787bb3a4eead37e985f2df1e37718126",
                    )
                    .expect("valid txid"),
                    vout,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
                witness: Witness::new(),
            })
            .collect(),
        output: vec![
            TxOut {
                value: Amount::from_sat(150_000),
                script_pubkey: script(
                    "5120a60869f0dbcf1dc659c9cecbaf8050135ea9e8cdc487053f1dc6880949dc684c",
                ),
            },
            TxOut {
                value: Amount::from_sat(48_000),
                script_pubkey: script("0014751e76e8199196d454941c45d1b3a323f1433bd6"),
            },
        ],
    };
    let mut psbt = Psbt::from_unsigned_tx(tx).expect("unsigned transaction");
    for input in &mut psbt.inputs {
        input.witness_utxo = Some(TxOut {
            value: Amount::from_sat(50_000),
            script_pubkey: script("0014751e76e8199196d454941c45d1b3a323f1433bd6"),
        });
    }
    psbt
}
