//! Human-oriented view of a parsed PSBT.

use std::fmt;

use bitcoin::{Psbt, Script, TxOut};
use derive_more::Display;
use serde::Serialize;

/// Standard output script templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptType {
    /// Pay to public key hash.
    #[display("p2pkh")]
    P2pkh,
    /// Pay to script hash.
    #[display("p2sh")]
    P2sh,
    /// Pay to witness public key hash.
    #[display("p2wpkh")]
    P2wpkh,
    /// Pay to witness script hash.
    #[display("p2wsh")]
    P2wsh,
    /// Pay to taproot.
    #[display("p2tr")]
    P2tr,
    /// Bare public key.
    #[display("p2pk")]
    P2pk,
    /// Provably unspendable data carrier.
    #[display("op-return")]
    OpReturn,
    /// Anything else.
    #[display("non-standard")]
    NonStandard,
}

impl ScriptType {
    /// Classify `script`.
    #[must_use]
    pub fn of(script: &Script) -> Self {
        if script.is_p2pkh() {
            Self::P2pkh
        } else if script.is_p2sh() {
            Self::P2sh
        } else if script.is_p2wpkh() {
            Self::P2wpkh
        } else if script.is_p2wsh() {
            Self::P2wsh
        } else if script.is_p2tr() {
            Self::P2tr
        } else if script.is_p2pk() {
            Self::P2pk
        } else if script.is_op_return() {
            Self::OpReturn
        } else {
            Self::NonStandard
        }
    }
}

/// One transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InputSummary {
    /// Txid of the spent output.
    pub txid: String,
    /// Index of the spent output.
    pub vout: u32,
    /// Raw sequence number.
    pub sequence: u32,
    /// Value of the spent output, when the PSBT carries it.
    pub value_sats: Option<u64>,
    /// Script type of the spent output, when the PSBT carries it.
    pub script_type: Option<ScriptType>,
}

/// One transaction output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutputSummary {
    /// Amount paid.
    pub value_sats: u64,
    /// Output script in hex.
    pub script_hex: String,
    /// Output script template.
    pub script_type: ScriptType,
}

/// Summary of the unsigned transaction inside a PSBT.
///
/// Totals over inputs and the fee are only present when every input carries
/// its spent output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PsbtSummary {
    /// Transaction version.
    pub version: i32,
    /// Consensus-encoded lock time.
    pub locktime: u32,
    /// Inputs in transaction order.
    pub inputs: Vec<InputSummary>,
    /// Outputs in transaction order.
    pub outputs: Vec<OutputSummary>,
    /// Sum of spent output values.
    pub total_input_sats: Option<u64>,
    /// Sum of output values.
    pub total_output_sats: u64,
    /// Inputs minus outputs.
    pub fee_sats: Option<u64>,
}

impl PsbtSummary {
    /// Summarise `psbt`.
    #[must_use]
    pub fn new(psbt: &Psbt) -> Self {
        let tx = &psbt.unsigned_tx;
        let inputs: Vec<InputSummary> = tx
            .input
            .iter()
            .zip(&psbt.inputs)
            .map(|(txin, input)| {
                let vout = txin.previous_output.vout;
                let spent: Option<&TxOut> = input.witness_utxo.as_ref().or_else(|| {
                    input
                        .non_witness_utxo
                        .as_ref()
                        .and_then(|prev| prev.output.get(usize::try_from(vout).ok()?))
                });
                InputSummary {
                    txid: txin.previous_output.txid.to_string(),
                    vout,
                    sequence: txin.sequence.to_consensus_u32(),
                    value_sats: spent.map(|txout| txout.value.to_sat()),
                    script_type: spent.map(|txout| ScriptType::of(&txout.script_pubkey)),
                }
            })
            .collect();
        let outputs: Vec<OutputSummary> = tx
            .output
            .iter()
            .map(|txout| OutputSummary {
                value_sats: txout.value.to_sat(),
                script_hex: txout.script_pubkey.to_hex_string(),
                script_type: ScriptType::of(&txout.script_pubkey),
            })
            .collect();

        let total_input_sats = inputs
            .iter()
            .try_fold(0_u64, |acc, input| acc.checked_add(input.value_sats?));
        let total_output_sats = outputs
            .iter()
            .fold(0_u64, |acc, output| acc.saturating_add(output.value_sats));
        let fee_sats = total_input_sats.and_then(|total| total.checked_sub(total_output_sats));

        Self {
            version: tx.version.0,
            locktime: tx.lock_time.to_consensus_u32(),
            inputs,
            outputs,
            total_input_sats,
            total_output_sats,
            fee_sats,
        }
    }
}

impl From<&Psbt> for PsbtSummary {
    fn from(psbt: &Psbt) -> Self { Self::new(psbt) }
}

impl fmt::Display for PsbtSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:  {}", self.version)?;
        writeln!(f, "locktime: {}", self.locktime)?;
        writeln!(f, "inputs:   {}", self.inputs.len())?;
        for (index, input) in self.inputs.iter().enumerate() {
            write!(
                f,
                "  #{index} {}:{} seq={:#010x}",
                input.txid, input.vout, input.sequence
            )?;
            if let Some(value) = input.value_sats {
                write!(f, " {value} sat")?;
            }
            if let Some(script_type) = input.script_type {
                write!(f, " {script_type}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "outputs:  {}", self.outputs.len())?;
        for (index, output) in self.outputs.iter().enumerate() {
            writeln!(
                f,
                "  #{index} {} sat {} {}",
                output.value_sats, output.script_type, output.script_hex
            )?;
        }
        match self.total_input_sats {
            Some(total) => writeln!(f, "total in: {total} sat")?,
            None => writeln!(f, "total in: unknown")?,
        }
        writeln!(f, "total out: {} sat", self.total_output_sats)?;
        match self.fee_sats {
            Some(fee) => write!(f, "fee: {fee} sat"),
            None => write!(f, "fee: unknown"),
        }
    }
}
