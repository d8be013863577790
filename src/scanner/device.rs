//! Camera device abstraction.

use async_trait::async_trait;

use super::{CameraPreference, DeviceError};

/// Source of decoded QR text.
///
/// Implementations must be cancellation-safe: dropping a pending
/// `next_code()` future must not lose a code already read. Dropping the
/// stream releases the underlying device.
#[async_trait]
pub trait CodeStream: Send {
    /// Wait for the next decoded code. `None` means the feed has ended.
    async fn next_code(&mut self) -> Result<Option<String>, DeviceError>;
}

/// A camera (or camera stand-in) that can be opened for scanning.
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Acquire the device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::PermissionDenied`] or
    /// [`DeviceError::Unavailable`] when the device cannot be acquired.
    async fn open(&self, preference: &CameraPreference) -> Result<Box<dyn CodeStream>, DeviceError>;
}

/// Check that the device can be opened, releasing it again immediately.
///
/// # Errors
///
/// Returns the error [`CameraDevice::open`] reported.
pub async fn probe_permission<D>(device: &D, preference: &CameraPreference) -> Result<(), DeviceError>
where
    D: CameraDevice + ?Sized,
{
    let stream = device.open(preference).await?;
    drop(stream);
    tracing::debug!(%preference, "camera permission probe succeeded");
    Ok(())
}
