use std::future::Future;
use std::time::Duration;

use crate::clock::Clock;
use crate::geo::{self, CartesianVector, GeoPosition};
use crate::predict::{PassPredictionSource, WindowState};
use crate::shutdown::Shutdown;
use crate::signal::SharedIntensity;

use super::error::SourceError;
use super::intensity::IntensityMapper;
use super::position::PositionSource;
use super::report::{ReportSink, VisibilityReport};

/// Validated tracking parameters.
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    pub observer: GeoPosition,
    pub observer_radius_km: f64,
    pub target_radius_km: f64,
    pub mapper: IntensityMapper,
    pub poll_interval: Duration,
    pub source_timeout: Duration,
}

pub struct TrackerEngine<P, Q, R, C> {
    settings: TrackerSettings,
    observer_ecef: CartesianVector,
    positions: P,
    passes: Q,
    reports: R,
    clock: C,
    intensity: SharedIntensity,
    last_state: Option<WindowState>,
}

impl<P, Q, R, C> TrackerEngine<P, Q, R, C>
where
    P: PositionSource,
    Q: PassPredictionSource,
    R: ReportSink,
    C: Clock,
{
    pub fn new(
        settings: TrackerSettings,
        positions: P,
        passes: Q,
        reports: R,
        clock: C,
        intensity: SharedIntensity,
    ) -> Self {
        let observer_ecef = settings
            .observer
            .to_cartesian(settings.observer_radius_km);
        Self {
            settings,
            observer_ecef,
            positions,
            passes,
            reports,
            clock,
            intensity,
            last_state: None,
        }
    }

    /// Runs one poll cycle: fetch, compute, update the shared intensity and
    /// publish. On error nothing is written or published.
    pub async fn poll_once(&mut self) -> Result<VisibilityReport, SourceError> {
        let limit = self.settings.source_timeout;

        let position = bounded(limit, self.positions.current()).await?;
        let target_ecef = position.to_cartesian(self.settings.target_radius_km);
        let distance_km = geo::distance(&self.observer_ecef, &target_ecef);
        let elevation_deg = geo::elevation(&self.observer_ecef, &target_ecef);
        let azimuth_deg = geo::azimuth(&self.settings.observer, &position);

        let window = bounded(limit, self.passes.next(self.settings.observer)).await?;

        let timestamp = self.clock.now();
        let now = timestamp.timestamp();
        let window_state = window.state(now);
        let intensity_percent = match window_state {
            WindowState::InPass => self.settings.mapper.map(distance_km),
            WindowState::AwaitingRise => 0,
        };
        self.intensity.set(intensity_percent);

        if self.last_state != Some(window_state) {
            match window_state {
                WindowState::InPass => log::info!(
                    "Pass in progress, falls at {}",
                    window.fall_at().map(|t| t.to_rfc3339()).unwrap_or_default()
                ),
                WindowState::AwaitingRise => log::info!(
                    "Waiting for next pass, rises at {}",
                    window.rise_at().map(|t| t.to_rfc3339()).unwrap_or_default()
                ),
            }
            self.last_state = Some(window_state);
        }

        let report = VisibilityReport {
            timestamp,
            position,
            distance_km: round2(distance_km),
            elevation_deg: round2(elevation_deg),
            azimuth_deg: round2(azimuth_deg) % 360.0,
            heading: geo::heading_letter(azimuth_deg),
            intensity_percent,
            window_state,
            window,
            time_to_event: window.time_to_event(now),
        };
        self.reports.publish(&report);

        Ok(report)
    }

    /// Polls at the configured interval until `shutdown` fires. Failed cycles
    /// are skipped and leave the shared intensity untouched.
    pub async fn run(mut self, mut shutdown: Shutdown) {
        log::info!(
            "Tracking from {:.6}, {:.6} every {:?}, full intensity within {} km, floor beyond {} km",
            self.settings.observer.latitude_deg,
            self.settings.observer.longitude_deg,
            self.settings.poll_interval,
            self.settings.mapper.close_km(),
            self.settings.mapper.far_km()
        );

        loop {
            let outcome = tokio::select! {
                result = self.poll_once() => Some(result),
                _ = shutdown.requested() => None,
            };
            match outcome {
                Some(Ok(_)) => {}
                Some(Err(e)) => log::warn!("Skipping poll cycle: {}", e),
                None => break,
            }

            if shutdown.sleep(self.settings.poll_interval).await {
                break;
            }
        }

        self.intensity.set(0);
        log::info!("Tracker stopped");
    }
}

async fn bounded<T>(
    limit: Duration,
    request: impl Future<Output = Result<T, SourceError>>,
) -> Result<T, SourceError> {
    tokio::time::timeout(limit, request)
        .await
        .map_err(|_| SourceError::Timeout(limit))?
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
