//! The `psbt-qr` binary.
//!
//! Parses the command line once into an [`AppConfig`] and runs the selected
//! flow: draw a PSBT as an animated QR code, read one back from a scanner
//! feed, or summarise a PSBT.

use std::{
    io::{self, Write},
    ops::ControlFlow,
    process::ExitCode,
    sync::Arc,
};

use clap::Parser;
use psbt_qr::{
    AppConfig,
    AppError,
    Result,
    StartupMode,
    cli::Cli,
    codec,
    config::{EncodeConfig, InputSource, InspectConfig, ReadConfig},
    psbt::{self, PsbtSummary},
    reassembly::{Progress, ScanOutcome, ScanSession},
    render::Animation,
    scanner::{CameraDevice, QrScanner, ScanSink, TextFeedDevice},
};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());

    let result = match AppConfig::from_cli(cli) {
        Ok(config) => run(config).await,
        Err(err) => Err(err.into()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "psbt-qr failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(directives: Option<&str>) {
    let filter = directives.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        EnvFilter::new,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(config: AppConfig) -> Result<()> {
    match config.mode {
        StartupMode::Encode(config) => encode(config).await,
        StartupMode::Read(config) => read(config).await,
        StartupMode::Inspect(config) => inspect(config).await,
    }
}

async fn read_input(source: &InputSource) -> io::Result<Vec<u8>> {
    match source {
        InputSource::Stdin => {
            let mut buf = Vec::new();
            tokio::io::stdin().read_to_end(&mut buf).await?;
            Ok(buf)
        }
        InputSource::Path(path) => tokio::fs::read(path).await,
    }
}

fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });
}

async fn encode(config: EncodeConfig) -> Result<()> {
    let psbt = psbt::load(&read_input(&config.input).await?)?;
    let payload = psbt::to_ur_payload(&psbt)?;
    let stream = codec::encode(&config.ur_type, &payload, config.encode)?;
    tracing::info!(
        ur_type = %config.ur_type,
        payload_len = payload.len(),
        fragments = stream.fragment_count(),
        "encoding PSBT"
    );

    if config.text_only {
        let mut stdout = io::stdout().lock();
        for part in stream {
            writeln!(stdout, "{}", part?)?;
        }
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    cancel_on_ctrl_c(shutdown.clone());
    let mut animation = Animation::new(stream, config.render);
    let frames = animation.play(&mut tokio::io::stdout(), &shutdown).await?;
    tracing::info!(frames, "animation finished");
    Ok(())
}

/// Wraps the session to report progress on standard error.
struct ProgressSink {
    session: ScanSession,
    reported: Progress,
}

impl ScanSink for ProgressSink {
    fn on_code(&mut self, code: &str) -> ControlFlow<()> {
        let flow = self.session.on_code(code);
        let progress = self.session.progress();
        if progress > self.reported {
            eprintln!(
                "scanned {} fragments ({progress})",
                self.session.scanned_len()
            );
            self.reported = progress;
        }
        flow
    }
}

async fn read(config: ReadConfig) -> Result<()> {
    let device: Arc<dyn CameraDevice> = match &config.feed {
        InputSource::Stdin => Arc::new(TextFeedDevice::stdin()),
        InputSource::Path(path) => Arc::new(TextFeedDevice::from_path(path.clone())),
    };
    let scanner = QrScanner::new(device, config.scan);
    scanner.probe().await?;

    let sink = ProgressSink {
        session: ScanSession::new(),
        reported: Progress::ZERO,
    };
    let handle = scanner.start(sink).await?;
    cancel_on_ctrl_c(handle.shutdown_token());
    let report = handle.finished().await?;
    tracing::debug!(reason = ?report.reason, delivered = report.delivered, "scan ended");

    let session = report.sink.session;
    let progress = session.progress();
    let result = match session.into_outcome() {
        ScanOutcome::Success(result) => result,
        ScanOutcome::Failure(reason) => return Err(AppError::Incomplete(reason)),
        ScanOutcome::Pending => {
            return Err(AppError::Incomplete(format!(
                "scanning stopped at {progress} before the payload was complete"
            )));
        }
    };
    let psbt = psbt::psbt_from_outcome(&result)?;
    print_summary(&PsbtSummary::new(&psbt), config.json)?;
    println!("{psbt}");
    Ok(())
}

async fn inspect(config: InspectConfig) -> Result<()> {
    let psbt = psbt::load(&read_input(&config.input).await?)?;
    print_summary(&PsbtSummary::new(&psbt), config.json)
}

fn print_summary(summary: &PsbtSummary, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, summary)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{summary}")?;
    }
    Ok(())
}
