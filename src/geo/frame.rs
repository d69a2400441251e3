use serde::Serialize;

use super::error::GeoError;

/// Mean Earth radius used for the observer's position.
pub const EARTH_RADIUS_KM: f64 = 6400.0;

/// Radius of an object orbiting roughly 400 km above the mean radius.
pub const LOW_ORBIT_RADIUS_KM: f64 = 6808.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct GeoPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoPosition {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude_deg) {
            return Err(GeoError::LatitudeOutOfRange(latitude_deg));
        }
        if !(-180.0..=180.0).contains(&longitude_deg) {
            return Err(GeoError::LongitudeOutOfRange(longitude_deg));
        }
        Ok(Self {
            latitude_deg,
            longitude_deg,
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn to_cartesian(&self, radius_km: f64) -> CartesianVector {
        to_cartesian(self.latitude_deg, self.longitude_deg, radius_km)
    }
}

/// Earth-centred position in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianVector {
    pub fn sub(&self, other: &CartesianVector) -> CartesianVector {
        CartesianVector {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    pub fn dot(&self, other: &CartesianVector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }
}

/// Spherical conversion; latitude is measured from the equatorial plane.
pub fn to_cartesian(lat_deg: f64, lon_deg: f64, radius_km: f64) -> CartesianVector {
    let theta = lat_deg.to_radians();
    let phi = lon_deg.to_radians();
    CartesianVector {
        x: radius_km * theta.cos() * phi.cos(),
        y: radius_km * theta.cos() * phi.sin(),
        z: radius_km * theta.sin(),
    }
}
