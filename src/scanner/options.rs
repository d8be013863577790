//! Scanner configuration.

use std::{fmt, num::NonZeroU32, str::FromStr, time::Duration};

/// Default upper bound on decoded frames per second.
pub const DEFAULT_MAX_SCANS_PER_SECOND: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Which camera to open.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CameraPreference {
    /// The camera facing away from the user.
    #[default]
    Environment,
    /// The camera facing the user.
    User,
    /// A specific device, by identifier or path.
    Device(String),
}

impl fmt::Display for CameraPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => f.write_str("environment"),
            Self::User => f.write_str("user"),
            Self::Device(id) => f.write_str(id),
        }
    }
}

impl FromStr for CameraPreference {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "environment" | "back" => Self::Environment,
            "user" | "front" => Self::User,
            other => Self::Device(other.to_owned()),
        })
    }
}

/// Options passed to [`QrScanner`](super::QrScanner).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    max_scans_per_second: NonZeroU32,
    preferred_camera: CameraPreference,
}

impl ScanOptions {
    /// Construct scanner options.
    #[must_use]
    pub const fn new(max_scans_per_second: NonZeroU32, preferred_camera: CameraPreference) -> Self {
        Self {
            max_scans_per_second,
            preferred_camera,
        }
    }

    /// Upper bound on codes delivered per second.
    #[must_use]
    pub const fn max_scans_per_second(&self) -> NonZeroU32 { self.max_scans_per_second }

    /// Camera to open.
    #[must_use]
    pub const fn preferred_camera(&self) -> &CameraPreference { &self.preferred_camera }

    /// Minimum spacing between two delivered codes.
    #[must_use]
    pub fn scan_interval(&self) -> Duration { Duration::from_secs(1) / self.max_scans_per_second.get() }
}

impl Default for ScanOptions {
    fn default() -> Self { Self::new(DEFAULT_MAX_SCANS_PER_SECOND, CameraPreference::default()) }
}
