use crate::signal::SharedIntensity;
use crate::tracker::LatestReport;

#[derive(Clone)]
pub struct AppState {
    pub latest: LatestReport,
    pub intensity: SharedIntensity,
}
