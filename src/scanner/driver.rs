//! The rate-limited scan loop.

use std::{fmt, sync::Arc};

use leaky_bucket::RateLimiter;
use tokio::{select, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use super::{CameraDevice, CodeStream, DeviceError, ScanOptions, ScanSink, probe_permission};

/// Why a scan loop ended.
#[derive(Debug)]
pub enum StopReason {
    /// [`ScanHandle::stop`] was called or the handle was dropped.
    Stopped,
    /// The sink asked to stop.
    SinkFinished,
    /// The device reported the end of its feed.
    FeedEnded,
    /// The device failed mid-scan.
    DeviceFailed(DeviceError),
}

/// The sink handed back by a finished scan, with the reason it ended.
#[derive(Debug)]
pub struct ScanReport<S> {
    /// The sink, with whatever state it accumulated.
    pub sink: S,
    /// Why scanning ended.
    pub reason: StopReason,
    /// Number of codes delivered to the sink.
    pub delivered: u64,
}

/// Starts rate-limited scans on a camera device.
pub struct QrScanner {
    device: Arc<dyn CameraDevice>,
    options: ScanOptions,
}

impl QrScanner {
    /// Create a scanner for `device`.
    #[must_use]
    pub fn new(device: Arc<dyn CameraDevice>, options: ScanOptions) -> Self { Self { device, options } }

    /// Options this scanner was built with.
    #[must_use]
    pub const fn options(&self) -> &ScanOptions { &self.options }

    /// Open and immediately release the preferred camera.
    ///
    /// # Errors
    ///
    /// Returns the [`DeviceError`] raised by the device.
    pub async fn probe(&self) -> Result<(), DeviceError> {
        probe_permission(self.device.as_ref(), self.options.preferred_camera()).await
    }

    /// Open the preferred camera and start delivering codes to `sink`.
    ///
    /// Must be called within a Tokio runtime. At most
    /// [`max_scans_per_second`](ScanOptions::max_scans_per_second) codes are
    /// delivered per second.
    ///
    /// # Errors
    ///
    /// Returns a [`DeviceError`] when the camera cannot be opened. The sink is
    /// never called in that case.
    pub async fn start<S: ScanSink>(&self, sink: S) -> Result<ScanHandle<S>, DeviceError> {
        let preference = self.options.preferred_camera();
        let stream = match self.device.open(preference).await {
            Ok(stream) => stream,
            Err(err) => {
                tracing::warn!(error = %err, %preference, "failed to open camera");
                return Err(err);
            }
        };
        let interval = self.options.scan_interval();
        let limiter = RateLimiter::builder()
            .initial(1)
            .refill(1)
            .interval(interval)
            .max(1)
            .build();
        let token = CancellationToken::new();
        tracing::info!(
            %preference,
            max_scans_per_second = self.options.max_scans_per_second().get(),
            "scanner started"
        );
        let task = tokio::spawn(scan_loop(stream, sink, limiter, token.clone()));
        Ok(ScanHandle {
            token,
            task: Some(task),
        })
    }
}

impl fmt::Debug for QrScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QrScanner")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Controls a running scan.
///
/// Dropping the handle stops the scan and releases the device; the sink is
/// then dropped with the task.
pub struct ScanHandle<S> {
    token: CancellationToken,
    task: Option<JoinHandle<ScanReport<S>>>,
}

impl<S> fmt::Debug for ScanHandle<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanHandle")
            .field("cancelled", &self.token.is_cancelled())
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

impl<S> ScanHandle<S> {
    /// Stop delivering codes, release the device and return the sink.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`](tokio::task::JoinError) if the scan task
    /// panicked.
    pub async fn stop(mut self) -> Result<ScanReport<S>, tokio::task::JoinError> {
        self.token.cancel();
        self.join().await
    }

    /// Wait for the scan to end by itself.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`](tokio::task::JoinError) if the scan task
    /// panicked.
    pub async fn finished(mut self) -> Result<ScanReport<S>, tokio::task::JoinError> { self.join().await }

    /// Token that stops the scan when cancelled, for wiring to signal
    /// handlers while [`finished`](Self::finished) is awaited.
    #[must_use]
    pub fn shutdown_token(&self) -> CancellationToken { self.token.clone() }

    /// Report whether the scan loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool { self.task.as_ref().is_none_or(JoinHandle::is_finished) }

    async fn join(&mut self) -> Result<ScanReport<S>, tokio::task::JoinError> {
        match self.task.take() {
            Some(task) => task.await,
            None => unreachable!("scan task joined twice"),
        }
    }
}

impl<S> Drop for ScanHandle<S> {
    fn drop(&mut self) { self.token.cancel(); }
}

async fn scan_loop<S: ScanSink>(
    mut stream: Box<dyn CodeStream>,
    mut sink: S,
    limiter: RateLimiter,
    token: CancellationToken,
) -> ScanReport<S> {
    let mut delivered = 0_u64;
    let reason = loop {
        select! {
            biased;
            () = token.cancelled() => break StopReason::Stopped,
            () = limiter.acquire_one() => {}
        }
        let next = select! {
            biased;
            () = token.cancelled() => break StopReason::Stopped,
            next = stream.next_code() => next,
        };
        match next {
            Ok(Some(code)) => {
                delivered += 1;
                if sink.on_code(&code).is_break() {
                    break StopReason::SinkFinished;
                }
            }
            Ok(None) => break StopReason::FeedEnded,
            Err(err) => {
                tracing::warn!(error = %err, "camera feed failed");
                break StopReason::DeviceFailed(err);
            }
        }
    };
    drop(stream);
    tracing::info!(?reason, delivered, "scanner stopped");
    ScanReport {
        sink,
        reason,
        delivered,
    }
}
