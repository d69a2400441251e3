use crate::config::ConfigError;
use crate::signal::MAX_INTENSITY;

/// Lowest intensity reported while a pass is in progress; zero is reserved
/// for "no pass".
pub const MIN_ACTIVE_INTENSITY: u8 = 1;

/// Linear falloff from full intensity at `close_km` to the floor at `far_km`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityMapper {
    close_km: f64,
    far_km: f64,
}

impl IntensityMapper {
    pub fn new(close_km: f64, far_km: f64) -> Result<Self, ConfigError> {
        if !close_km.is_finite() || !far_km.is_finite() || far_km <= close_km {
            return Err(ConfigError::Thresholds { close_km, far_km });
        }
        Ok(Self { close_km, far_km })
    }

    pub fn close_km(&self) -> f64 {
        self.close_km
    }

    pub fn far_km(&self) -> f64 {
        self.far_km
    }

    pub fn map(&self, distance_km: f64) -> u8 {
        intensity_from_distance(distance_km, self.close_km, self.far_km)
    }
}

/// Percent in `[1, 100]`. Thresholds are validated by [`IntensityMapper::new`].
pub fn intensity_from_distance(distance_km: f64, close_km: f64, far_km: f64) -> u8 {
    let fault = distance_km - close_km;
    if fault <= 0.0 {
        return MAX_INTENSITY;
    }

    let max = f64::from(MAX_INTENSITY);
    let percent = max - max * (fault / (far_km - close_km));
    if percent.is_nan() {
        return MIN_ACTIVE_INTENSITY;
    }
    percent
        .round()
        .clamp(f64::from(MIN_ACTIVE_INTENSITY), max) as u8
}
