use serde::Serialize;
use strum_macros::Display;

use super::frame::{CartesianVector, GeoPosition};

/// Straight-line distance between two Earth-centred points, in km.
pub fn distance(a: &CartesianVector, b: &CartesianVector) -> f64 {
    b.sub(a).norm()
}

/// Angle of `target` above the local horizon at `observer`, in degrees.
///
/// The observer's position vector doubles as its local "up", so the
/// elevation is the complement of the angle between up and the line of
/// sight. The cosine is clamped into [-1, 1] before `acos`: rounding can push
/// it just outside for targets straight overhead or straight below.
pub fn elevation(observer: &CartesianVector, target: &CartesianVector) -> f64 {
    let line_of_sight = target.sub(observer);
    let denominator = observer.norm() * line_of_sight.norm();
    if denominator == 0.0 {
        return 0.0;
    }

    let cos_angle = (observer.dot(&line_of_sight) / denominator).clamp(-1.0, 1.0);
    90.0 - cos_angle.acos().to_degrees()
}

/// Initial great-circle bearing from `observer` to `target`, in [0, 360).
pub fn azimuth(observer: &GeoPosition, target: &GeoPosition) -> f64 {
    let phi1 = observer.lat_rad();
    let phi2 = target.lat_rad();
    let delta_lambda = target.lon_rad() - observer.lon_rad();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, utoipa::ToSchema)]
pub enum Heading {
    #[strum(serialize = "N")]
    #[serde(rename = "N")]
    North,
    #[strum(serialize = "NE")]
    #[serde(rename = "NE")]
    NorthEast,
    #[strum(serialize = "E")]
    #[serde(rename = "E")]
    East,
    #[strum(serialize = "SE")]
    #[serde(rename = "SE")]
    SouthEast,
    #[strum(serialize = "S")]
    #[serde(rename = "S")]
    South,
    #[strum(serialize = "SW")]
    #[serde(rename = "SW")]
    SouthWest,
    #[strum(serialize = "W")]
    #[serde(rename = "W")]
    West,
    #[strum(serialize = "NW")]
    #[serde(rename = "NW")]
    NorthWest,
}

const HEADINGS: [Heading; 8] = [
    Heading::North,
    Heading::NorthEast,
    Heading::East,
    Heading::SouthEast,
    Heading::South,
    Heading::SouthWest,
    Heading::West,
    Heading::NorthWest,
];

/// Buckets an azimuth into eight 45° sectors, `[0, 45)` being north.
pub fn heading_letter(azimuth_deg: f64) -> Heading {
    if !azimuth_deg.is_finite() {
        return Heading::North;
    }
    let sector = (azimuth_deg.rem_euclid(360.0) / 45.0).floor() as usize;
    HEADINGS[sector % HEADINGS.len()]
}
