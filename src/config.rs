use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::geo::{GeoError, GeoPosition, EARTH_RADIUS_KM, LOW_ORBIT_RADIUS_KM};
use crate::tracker::{IntensityMapper, TrackerSettings};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid observer position: {0}")]
    Observer(#[from] GeoError),
    #[error("far threshold ({far_km} km) must exceed close threshold ({close_km} km)")]
    Thresholds { close_km: f64, far_km: f64 },
    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub observer: ObserverConfig,
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub signal: SignalConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub report: ReportConfig,
    pub web: Option<WebConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObserverConfig {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_observer_radius")]
    pub radius_km: f64,
}

fn default_observer_radius() -> f64 {
    EARTH_RADIUS_KM
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_target_radius")]
    pub radius_km: f64,
}

fn default_target_radius() -> f64 {
    LOW_ORBIT_RADIUS_KM
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            radius_km: default_target_radius(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: f64,
    #[serde(default = "default_close_threshold")]
    pub close_threshold_km: f64,
    #[serde(default = "default_far_threshold")]
    pub far_threshold_km: f64,
    #[serde(default = "default_collaborator_timeout")]
    pub collaborator_timeout_seconds: f64,
}

fn default_poll_interval() -> f64 {
    5.0
}

fn default_close_threshold() -> f64 {
    500.0
}

fn default_far_threshold() -> f64 {
    4000.0
}

fn default_collaborator_timeout() -> f64 {
    10.0
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
            close_threshold_km: default_close_threshold(),
            far_threshold_km: default_far_threshold(),
            collaborator_timeout_seconds: default_collaborator_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignalConfig {
    #[serde(default = "default_signal_period")]
    pub period_seconds: f64,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_signal_period() -> f64 {
    crate::signal::DEFAULT_PERIOD.as_secs_f64()
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            period_seconds: default_signal_period(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutputConfig {
    #[default]
    Log,
    Gpio {
        pin: u32,
        #[serde(default = "default_gpio_base")]
        base_path: PathBuf,
    },
}

fn default_gpio_base() -> PathBuf {
    PathBuf::from("/sys/class/gpio")
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_position_url")]
    pub position_url: String,
    #[serde(default = "default_passes_url")]
    pub passes_url: String,
}

fn default_position_url() -> String {
    "http://api.open-notify.org/iss-now.json".to_string()
}

fn default_passes_url() -> String {
    "http://api.open-notify.org/iss-pass.json".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            position_url: default_position_url(),
            passes_url: default_passes_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_log_reports")]
    pub log: bool,
    pub http_url: Option<String>,
}

fn default_log_reports() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            log: default_log_reports(),
            http_url: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Checks everything startup depends on; any error here is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracker_settings()?;
        self.signal_period()?;
        Ok(())
    }

    pub fn tracker_settings(&self) -> Result<TrackerSettings, ConfigError> {
        let observer = GeoPosition::new(self.observer.latitude, self.observer.longitude)?;
        let observer_radius_km = positive("observer.radius_km", self.observer.radius_km)?;
        let target_radius_km = positive("target.radius_km", self.target.radius_km)?;
        let mapper = IntensityMapper::new(
            self.tracking.close_threshold_km,
            self.tracking.far_threshold_km,
        )?;

        Ok(TrackerSettings {
            observer,
            observer_radius_km,
            target_radius_km,
            mapper,
            poll_interval: positive_duration(
                "tracking.poll_interval_seconds",
                self.tracking.poll_interval_seconds,
            )?,
            source_timeout: positive_duration(
                "tracking.collaborator_timeout_seconds",
                self.tracking.collaborator_timeout_seconds,
            )?,
        })
    }

    pub fn signal_period(&self) -> Result<Duration, ConfigError> {
        positive_duration("signal.period_seconds", self.signal.period_seconds)
    }

    pub fn source_timeout(&self) -> Result<Duration, ConfigError> {
        positive_duration(
            "tracking.collaborator_timeout_seconds",
            self.tracking.collaborator_timeout_seconds,
        )
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn positive_duration(name: &'static str, seconds: f64) -> Result<Duration, ConfigError> {
    positive(name, seconds).map(Duration::from_secs_f64)
}
