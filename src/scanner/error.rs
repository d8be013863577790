//! Error types for camera devices.

use std::io;

use thiserror::Error;

/// Failures acquiring or reading a camera device.
///
/// Raised before a scan session starts when the device cannot be opened, or
/// as the stop reason when the feed breaks mid-scan.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Access to the device was refused.
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),
    /// No matching device exists or it is already in use.
    #[error("camera unavailable: {0}")]
    Unavailable(String),
    /// Reading from the device failed.
    #[error("camera feed I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DeviceError {
    /// Classify an error raised while opening `what`.
    #[must_use]
    pub fn from_open(err: io::Error, what: &str) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(format!("{what}: {err}")),
            io::ErrorKind::NotFound => Self::Unavailable(format!("{what}: {err}")),
            _ => Self::Io(err),
        }
    }

    /// Report whether the user refused access.
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool { matches!(self, Self::PermissionDenied(_)) }
}
