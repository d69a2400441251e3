use utoipa::OpenApi;

use super::api::status::IntensityResponse;
use crate::geo::{GeoPosition, Heading};
use crate::predict::{PassEvent, PassWindow, TimeToEvent, WindowState};
use crate::tracker::VisibilityReport;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::status::status,
        super::api::status::intensity,
    ),
    components(
        schemas(
            VisibilityReport,
            GeoPosition,
            Heading,
            PassWindow,
            PassEvent,
            TimeToEvent,
            WindowState,
            IntensityResponse,
        )
    ),
    info(
        title = "ISS Beacon Status API",
        description = "Live visibility of the tracked object from the configured observer",
        version = "0.1.0"
    ),
    tags(
        (name = "status", description = "Tracker and indicator status")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/status"));
        assert!(doc.paths.paths.contains_key("/api/intensity"));
    }
}
