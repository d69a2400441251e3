use thiserror::Error;

/// A collaborator could not deliver a snapshot this cycle.
///
/// Every variant is recoverable: the engine logs it, skips the cycle and
/// polls again after the regular interval.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no upcoming pass in prediction")]
    NoUpcomingPass,
}
