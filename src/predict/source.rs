use chrono::Utc;
use serde::Deserialize;
use std::future::Future;

use crate::geo::GeoPosition;
use crate::predict::PassWindow;
use crate::tracker::SourceError;

/// Supplies the next pass over an observer that has not fully elapsed yet.
pub trait PassPredictionSource: Send + Sync {
    fn next(
        &self,
        observer: GeoPosition,
    ) -> impl Future<Output = Result<PassWindow, SourceError>> + Send;
}

#[derive(Debug, Deserialize)]
struct PassResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    response: Vec<PassWindow>,
}

/// Pass predictions from an `iss-pass.json` style endpoint.
pub struct OpenNotifyPassSource {
    client: reqwest::Client,
    url: String,
}

impl OpenNotifyPassSource {
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

impl PassPredictionSource for OpenNotifyPassSource {
    async fn next(&self, observer: GeoPosition) -> Result<PassWindow, SourceError> {
        let body: PassResponse = self
            .client
            .get(&self.url)
            .query(&[
                ("lat", observer.latitude_deg),
                ("lon", observer.longitude_deg),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(message) = body.message.as_deref() {
            if message != "success" {
                return Err(SourceError::Malformed(format!(
                    "prediction service replied '{}'",
                    message
                )));
            }
        }

        next_relevant(&body.response, Utc::now().timestamp()).ok_or(SourceError::NoUpcomingPass)
    }
}

/// Skips windows that have already closed at `now`, or whose times are out
/// of range, and returns the earliest remaining one.
pub fn next_relevant(passes: &[PassWindow], now: i64) -> Option<PassWindow> {
    passes
        .iter()
        .filter(|pass| {
            if !pass.is_representable() {
                log::warn!("Ignoring out-of-range pass window {:?}", pass);
                return false;
            }
            !pass.has_elapsed(now)
        })
        .min_by_key(|pass| pass.rise_time)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_relevant_skips_elapsed() {
        let passes = [
            PassWindow::new(1000, 300),
            PassWindow::new(7000, 450),
            PassWindow::new(13000, 600),
        ];

        assert_eq!(next_relevant(&passes, 500), Some(passes[0]));
        assert_eq!(next_relevant(&passes, 1200), Some(passes[0]));
        assert_eq!(next_relevant(&passes, 1300), Some(passes[1]));
        assert_eq!(next_relevant(&passes, 8000), Some(passes[2]));
        assert_eq!(next_relevant(&passes, 13600), None);
    }

    #[test]
    fn test_next_relevant_unordered_input() {
        let passes = [PassWindow::new(9000, 300), PassWindow::new(4000, 300)];
        assert_eq!(next_relevant(&passes, 0), Some(passes[1]));
    }

    #[test]
    fn test_out_of_range_risetime_ignored() {
        let json = r#"{"response": [
            {"duration": 600, "risetime": 9223372036854775807},
            {"duration": 300, "risetime": 1600003000}
        ]}"#;
        let body: PassResponse = serde_json::from_str(json).unwrap();

        assert_eq!(
            next_relevant(&body.response, 1_600_000_000),
            Some(PassWindow::new(1_600_003_000, 300))
        );
        assert_eq!(next_relevant(&body.response[..1], 1_600_000_000), None);
    }

    #[test]
    fn test_parse_pass_response() {
        let json = r#"{
            "message": "success",
            "request": {"altitude": 100, "datetime": 1600000000, "latitude": 56.1, "longitude": 15.6, "passes": 2},
            "response": [
                {"duration": 623, "risetime": 1600003000},
                {"duration": 410, "risetime": 1600009000}
            ]
        }"#;
        let body: PassResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.message.as_deref(), Some("success"));
        assert_eq!(body.response[0], PassWindow::new(1_600_003_000, 623));
        assert_eq!(body.response[1].fall_time(), 1_600_009_410);
    }
}
