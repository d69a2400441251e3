mod error;
mod frame;
mod visibility;

pub use error::GeoError;
pub use frame::{CartesianVector, GeoPosition, EARTH_RADIUS_KM, LOW_ORBIT_RADIUS_KM};
pub use visibility::{azimuth, distance, elevation, heading_letter, Heading};
