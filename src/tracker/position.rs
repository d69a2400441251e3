use serde::Deserialize;
use std::future::Future;

use crate::geo::GeoPosition;
use crate::tracker::SourceError;

/// Supplies the tracked object's current sub-satellite point.
pub trait PositionSource: Send + Sync {
    fn current(&self) -> impl Future<Output = Result<GeoPosition, SourceError>> + Send;
}

#[derive(Debug, Deserialize)]
struct NowResponse {
    iss_position: RawPosition,
}

// The service sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct RawPosition {
    latitude: String,
    longitude: String,
}

impl RawPosition {
    fn parse(&self) -> Result<GeoPosition, SourceError> {
        let lat = parse_coordinate("latitude", &self.latitude)?;
        let lon = parse_coordinate("longitude", &self.longitude)?;
        GeoPosition::new(lat, lon).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

fn parse_coordinate(field: &str, raw: &str) -> Result<f64, SourceError> {
    raw.trim()
        .parse()
        .map_err(|_| SourceError::Malformed(format!("{} '{}' is not a number", field, raw)))
}

/// Current position from an `iss-now.json` style endpoint.
pub struct OpenNotifyPositionSource {
    client: reqwest::Client,
    url: String,
}

impl OpenNotifyPositionSource {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl PositionSource for OpenNotifyPositionSource {
    async fn current(&self) -> Result<GeoPosition, SourceError> {
        let body: NowResponse = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body.iss_position.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_now_response() {
        let json = r#"{
            "timestamp": 1600000000,
            "message": "success",
            "iss_position": {"latitude": "56.1087", "longitude": "-15.6610"}
        }"#;
        let body: NowResponse = serde_json::from_str(json).unwrap();
        let position = body.iss_position.parse().unwrap();
        assert_eq!(position.latitude_deg, 56.1087);
        assert_eq!(position.longitude_deg, -15.6610);
    }

    #[test]
    fn test_rejects_garbage_coordinates() {
        let raw = RawPosition {
            latitude: "north-ish".into(),
            longitude: "0".into(),
        };
        assert!(matches!(raw.parse(), Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let raw = RawPosition {
            latitude: "91.0".into(),
            longitude: "0".into(),
        };
        assert!(matches!(raw.parse(), Err(SourceError::Malformed(_))));
    }
}
