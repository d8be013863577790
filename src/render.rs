//! Terminal rendering of UR fragments as (animated) QR codes.
//!
//! Each fragment is rendered on its own with [`qr_code`]; an [`Animation`]
//! cycles through a [`FragmentStream`] at a fixed frame interval.

use std::{io, num::NonZeroUsize, time::Duration};

use thiserror::Error;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    select,
    time::{self, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::codec::{EncodeError, FragmentStream};

/// Default delay between animation frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(250);

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Errors raised while rendering QR codes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The text does not fit in a QR code.
    #[error("failed to build QR code: {0}")]
    Qr(String),
    /// The fragment stream failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// Writing a frame failed.
    #[error("failed to write frame: {0}")]
    Io(#[from] io::Error),
}

/// How fragments are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Upper-case the text so the QR uses the denser alphanumeric mode.
    pub uppercase: bool,
    /// Quiet-zone width in modules.
    pub border: u8,
    /// Delay between animation frames.
    pub frame_interval: Duration,
    /// Stop after this many frames. `None` animates until cancelled.
    pub max_frames: Option<NonZeroUsize>,
    /// Clear the terminal before each frame.
    pub clear_screen: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            uppercase: true,
            border: 3,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            max_frames: None,
            clear_screen: true,
        }
    }
}

/// Render `text` as a QR code made of Unicode half blocks.
///
/// # Errors
///
/// Returns [`RenderError::Qr`] when the text is too long for a QR code.
pub fn render_fragment(text: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let text = if options.uppercase {
        text.to_ascii_uppercase()
    } else {
        text.to_owned()
    };
    let code = qr_code::QrCode::new(&text).map_err(|err| RenderError::Qr(format!("{err:?}")))?;
    Ok(code.to_string(true, options.border))
}

/// Plays a fragment stream as an animated terminal QR code.
#[derive(Debug)]
pub struct Animation<'a> {
    stream: FragmentStream<'a>,
    options: RenderOptions,
}

impl<'a> Animation<'a> {
    /// Animate `stream` with `options`.
    #[must_use]
    pub const fn new(stream: FragmentStream<'a>, options: RenderOptions) -> Self { Self { stream, options } }

    /// Write frames to `out` until the frame limit is reached or `shutdown`
    /// fires. Returns the number of frames written.
    ///
    /// Single-part payloads are drawn once.
    ///
    /// # Errors
    ///
    /// Returns the first render, encode or write error.
    pub async fn play<W>(&mut self, out: &mut W, shutdown: &CancellationToken) -> Result<usize, RenderError>
    where
        W: AsyncWrite + Unpin,
    {
        let limit = if self.stream.is_single_part() {
            Some(1)
        } else {
            self.options.max_frames.map(NonZeroUsize::get)
        };
        let mut ticker = time::interval(self.options.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let total = self.stream.fragment_count();
        let mut written = 0_usize;

        while limit.is_none_or(|limit| written < limit) {
            select! {
                biased;
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }
            let sequence = self.stream.next_sequence();
            let part = self.stream.next_part()?;
            let frame = render_fragment(&part, &self.options)?;
            if self.options.clear_screen {
                out.write_all(CLEAR_SCREEN.as_bytes()).await?;
            }
            out.write_all(frame.as_bytes()).await?;
            out.write_all(format!("\npart {sequence} of {total}\n").as_bytes())
                .await?;
            out.flush().await?;
            written += 1;
            tracing::trace!(sequence, total, "frame rendered");
        }
        Ok(written)
    }
}
