use thiserror::Error;
use tokio::task::JoinHandle;

use crate::clock::SystemClock;
use crate::config::{Config, ConfigError, OutputConfig};
use crate::predict::OpenNotifyPassSource;
use crate::shutdown::{self, Shutdown};
use crate::signal::{GpioOutput, LogOutput, OutputSink, SharedIntensity, SignalLoop};
use crate::tracker::{
    HttpReportSink, LatestReport, LogReportSink, OpenNotifyPositionSource, ReportFanout,
    TrackerEngine,
};
use crate::web::{self, AppState};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

type RunnerResult<T> = Result<T, RunnerError>;

/// Starts the tracker, the signal loop and the optional status server, and
/// runs them until Ctrl-C.
pub async fn run(config: Config) -> RunnerResult<()> {
    let settings = config.tracker_settings()?;
    let period = config.signal_period()?;

    let client = reqwest::Client::builder()
        .timeout(config.source_timeout()?)
        .build()?;

    let intensity = SharedIntensity::new();
    let latest = LatestReport::new();
    let (trigger, shutdown) = shutdown::channel();

    let mut reports = ReportFanout::new().with(latest.clone());
    if config.report.log {
        reports = reports.with(LogReportSink);
    }
    if let Some(url) = &config.report.http_url {
        log::info!("Publishing reports to {}", url);
        reports = reports.with(HttpReportSink::new(client.clone(), url.clone()));
    }

    let engine = TrackerEngine::new(
        settings,
        OpenNotifyPositionSource::new(client.clone(), config.sources.position_url.clone()),
        OpenNotifyPassSource::new(client, config.sources.passes_url.clone()),
        reports,
        SystemClock,
        intensity.clone(),
    );
    let signal = SignalLoop::new(intensity.clone(), build_output(&config.signal.output), period);

    let mut tasks: Vec<JoinHandle<()>> = vec![
        tokio::spawn(engine.run(shutdown.clone())),
        tokio::spawn(signal.run(shutdown.clone())),
    ];

    if let Some(web_config) = &config.web {
        let state = AppState {
            latest,
            intensity,
        };
        tasks.push(spawn_server(web_config.bind.clone(), state, shutdown));
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Shutdown requested"),
        Err(e) => log::error!("Unable to listen for Ctrl-C, stopping: {}", e),
    }
    trigger.trigger();

    for task in tasks {
        task.await?;
    }
    Ok(())
}

fn build_output(config: &OutputConfig) -> Box<dyn OutputSink> {
    match config {
        OutputConfig::Log => Box::new(LogOutput::new()),
        OutputConfig::Gpio { pin, base_path } => {
            log::info!("Driving GPIO {} under {}", pin, base_path.display());
            Box::new(GpioOutput::new(base_path, *pin))
        }
    }
}

fn spawn_server(bind: String, state: AppState, shutdown: Shutdown) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = web::run_server(bind, state, shutdown).await {
            log::error!("Status server failed: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_output_variants() {
        let mut log_output = build_output(&OutputConfig::Log);
        log_output.set_intensity(100);

        let base = std::env::temp_dir().join(format!("iss-beacon-runner-{}", std::process::id()));
        fs::create_dir_all(base.join("gpio21")).unwrap();
        let mut gpio = build_output(&OutputConfig::Gpio {
            pin: 21,
            base_path: base.clone(),
        });
        gpio.set_intensity(100);
        assert_eq!(fs::read_to_string(base.join("gpio21/value")).unwrap(), "1");
        let _ = fs::remove_dir_all(&base);
    }
}
