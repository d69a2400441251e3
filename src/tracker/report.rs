use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};
use utoipa::ToSchema;

use crate::geo::{GeoPosition, Heading};
use crate::predict::{PassWindow, TimeToEvent, WindowState};

/// Outcome of one poll cycle.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VisibilityReport {
    pub timestamp: DateTime<Utc>,
    pub position: GeoPosition,
    pub distance_km: f64,
    pub elevation_deg: f64,
    pub azimuth_deg: f64,
    pub heading: Heading,
    pub intensity_percent: u8,
    pub window_state: WindowState,
    pub window: PassWindow,
    pub time_to_event: TimeToEvent,
}

impl VisibilityReport {
    pub fn summary(&self) -> String {
        format!(
            "distance {:.2} km, elevation {:.2}°, azimuth {:.2}° ({}), intensity {}%, {}: {}",
            self.distance_km,
            self.elevation_deg,
            self.azimuth_deg,
            self.heading,
            self.intensity_percent,
            self.time_to_event.label(),
            humantime::format_duration(self.time_to_event.remaining()),
        )
    }
}

/// Consumer of per-cycle reports. Publishing never fails the caller.
pub trait ReportSink: Send + Sync {
    fn publish(&self, report: &VisibilityReport);
}

impl<S: ReportSink + ?Sized> ReportSink for Arc<S> {
    fn publish(&self, report: &VisibilityReport) {
        (**self).publish(report)
    }
}

#[derive(Debug, Default)]
pub struct LogReportSink;

impl ReportSink for LogReportSink {
    fn publish(&self, report: &VisibilityReport) {
        log::info!("{}", report.summary());
    }
}

/// Keeps the most recent report for the status API.
#[derive(Debug, Clone, Default)]
pub struct LatestReport {
    inner: Arc<RwLock<Option<VisibilityReport>>>,
}

impl LatestReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<VisibilityReport> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ReportSink for LatestReport {
    fn publish(&self, report: &VisibilityReport) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(report.clone());
    }
}

/// POSTs each report as JSON on a detached task so a slow receiver never
/// holds up the poll loop.
pub struct HttpReportSink {
    client: reqwest::Client,
    url: String,
}

impl HttpReportSink {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl ReportSink for HttpReportSink {
    fn publish(&self, report: &VisibilityReport) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::debug!("No runtime, dropping report for {}", self.url);
            return;
        };

        let request = self.client.post(&self.url).json(report);
        let url = self.url.clone();
        runtime.spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => log::trace!("Report delivered to {}", url),
                Err(e) => log::debug!("Report to {} failed: {}", url, e),
            }
        });
    }
}

#[derive(Default)]
pub struct ReportFanout {
    sinks: Vec<Box<dyn ReportSink>>,
}

impl ReportFanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }
}

impl ReportSink for ReportFanout {
    fn publish(&self, report: &VisibilityReport) {
        for sink in &self.sinks {
            sink.publish(report);
        }
    }
}
