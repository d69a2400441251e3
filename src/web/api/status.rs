use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::signal::SignalState;
use crate::tracker::VisibilityReport;
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct IntensityResponse {
    /// Current indicator intensity, 0-100.
    pub intensity: u8,
    /// `idle`, `steady_on` or `modulating`.
    pub state: String,
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Latest visibility report, null before the first successful poll", body = Option<VisibilityReport>)
    ),
    tag = "status"
)]
pub async fn status(State(state): State<AppState>) -> Json<Option<VisibilityReport>> {
    Json(state.latest.get())
}

#[utoipa::path(
    get,
    path = "/api/intensity",
    responses(
        (status = 200, description = "Current shared intensity", body = IntensityResponse)
    ),
    tag = "status"
)]
pub async fn intensity(State(state): State<AppState>) -> Json<IntensityResponse> {
    let intensity = state.intensity.get();
    Json(IntensityResponse {
        intensity,
        state: SignalState::from_intensity(intensity).to_string(),
    })
}
