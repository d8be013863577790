//! A camera stand-in fed with already decoded QR text.
//!
//! Command-line QR tools (for example `zbarcam --raw`) print one decoded code
//! per line. [`TextFeedDevice`] turns such output, or a capture file, into a
//! [`CameraDevice`].

use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
};

use super::{CameraDevice, CameraPreference, CodeStream, DeviceError};

type BoxedReader = Box<dyn AsyncBufRead + Send + Unpin>;
type ReaderSlot = Arc<Mutex<Option<BoxedReader>>>;

enum Source {
    Path(PathBuf),
    Reader(ReaderSlot),
}

/// Reads one decoded code per line; blank lines are skipped.
pub struct TextFeedDevice {
    source: Source,
}

impl TextFeedDevice {
    /// Open `path` afresh each time the device is opened.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    /// Share a single reader. Only one stream can hold it at a time; the
    /// reader returns to the device when that stream is dropped.
    #[must_use]
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        Self {
            source: Source::Reader(Arc::new(Mutex::new(Some(Box::new(reader))))),
        }
    }

    /// Read codes from standard input.
    #[must_use]
    pub fn stdin() -> Self { Self::from_reader(BufReader::new(tokio::io::stdin())) }
}

#[async_trait]
impl CameraDevice for TextFeedDevice {
    async fn open(&self, preference: &CameraPreference) -> Result<Box<dyn CodeStream>, DeviceError> {
        let (reader, slot): (BoxedReader, Option<ReaderSlot>) = match &self.source {
            Source::Path(path) => {
                let file = File::open(path)
                    .await
                    .map_err(|err| DeviceError::from_open(err, &path.display().to_string()))?;
                (Box::new(BufReader::new(file)), None)
            }
            Source::Reader(slot) => {
                let reader = slot
                    .lock()
                    .map_err(|_| DeviceError::Unavailable("text feed lock poisoned".to_owned()))?
                    .take()
                    .ok_or_else(|| DeviceError::Unavailable("text feed already open".to_owned()))?;
                (reader, Some(Arc::clone(slot)))
            }
        };
        tracing::debug!(%preference, "text feed opened");
        Ok(Box::new(TextFeedStream {
            lines: Some(reader.lines()),
            slot,
        }))
    }
}

impl fmt::Debug for TextFeedDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Source::Path(path) => f.debug_tuple("TextFeedDevice").field(path).finish(),
            Source::Reader(_) => f.debug_tuple("TextFeedDevice").field(&"<reader>").finish(),
        }
    }
}

struct TextFeedStream {
    lines: Option<Lines<BoxedReader>>,
    slot: Option<ReaderSlot>,
}

#[async_trait]
impl CodeStream for TextFeedStream {
    async fn next_code(&mut self) -> Result<Option<String>, DeviceError> {
        let Some(lines) = self.lines.as_mut() else {
            return Ok(None);
        };
        while let Some(line) = lines.next_line().await? {
            let code = line.trim();
            if !code.is_empty() {
                return Ok(Some(code.to_owned()));
            }
        }
        Ok(None)
    }
}

impl Drop for TextFeedStream {
    fn drop(&mut self) {
        let (Some(lines), Some(slot)) = (self.lines.take(), self.slot.take()) else {
            return;
        };
        if let Ok(mut guard) = slot.lock() {
            *guard = Some(lines.into_inner());
        }
        tracing::debug!("text feed released");
    }
}
