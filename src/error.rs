/// Error types shared by both report paths
///
/// Configuration and context problems, malformed results and adapter
/// failures all surface through `ReportError` so `main` can decide the
/// exit status per report path.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Debug, Error)]
pub enum ReportError {
    /// A required input or piece of CI context is unavailable
    #[error("missing context: {0}")]
    MissingContext(String),

    /// The triggering event carries no pull request number
    #[error("cannot find the pull request number for this event")]
    NotInPullRequestContext,

    /// The result file violates the data model (producer bug)
    #[error("invalid result: {0}")]
    InvalidResult(String),

    /// The host platform rejected an operation
    #[error("{operation} failed{}: {detail}", .status.map(|s| format!(" with status {}", s)).unwrap_or_default())]
    Publish { operation: String, status: Option<u16>, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn publish(operation: &str, status: Option<u16>, detail: impl Into<String>) -> Self {
        ReportError::Publish { operation: operation.to_string(), status, detail: detail.into() }
    }
}
