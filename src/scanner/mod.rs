//! Scanner driver.
//!
//! A [`CameraDevice`] yields a [`CodeStream`] of decoded QR text. The
//! [`QrScanner`] opens the stream, then pulls codes at a bounded rate and
//! hands each one synchronously to a [`ScanSink`]. Stopping the scan
//! releases the device but leaves the sink's state intact, so a partially
//! read animation can still be inspected.

pub mod device;
pub mod driver;
pub mod error;
pub mod options;
pub mod sink;
pub mod text_feed;

pub use device::{CameraDevice, CodeStream, probe_permission};
pub use driver::{QrScanner, ScanHandle, ScanReport, StopReason};
pub use error::DeviceError;
pub use options::{CameraPreference, DEFAULT_MAX_SCANS_PER_SECOND, ScanOptions};
pub use sink::ScanSink;
pub use text_feed::TextFeedDevice;
