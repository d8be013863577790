//! Consumers of decoded QR text.

use std::ops::ControlFlow;

use crate::{
    codec::FragmentDecoder,
    reassembly::{ScanError, ScanSession},
};

/// Receives each decoded code from a running scan.
///
/// Calls are sequential: the scanner waits for `on_code` to return before it
/// reads the next code.
pub trait ScanSink: Send + 'static {
    /// Handle one decoded code. Return [`ControlFlow::Break`] to stop
    /// scanning.
    fn on_code(&mut self, code: &str) -> ControlFlow<()>;
}

impl<D> ScanSink for ScanSession<D>
where
    D: FragmentDecoder + Send + 'static,
{
    fn on_code(&mut self, code: &str) -> ControlFlow<()> {
        match self.on_fragment(code) {
            Ok(_) | Err(ScanError::Format(_)) => {}
            Err(ScanError::Decoder { .. }) => return ControlFlow::Break(()),
        }
        if self.is_terminal() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

impl<F> ScanSink for F
where
    F: FnMut(&str) -> ControlFlow<()> + Send + 'static,
{
    fn on_code(&mut self, code: &str) -> ControlFlow<()> { self(code) }
}
