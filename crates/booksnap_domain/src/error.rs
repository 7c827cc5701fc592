/// Failure taxonomy for a summarization request.
///
/// `BookNotFound`, `Parse` and `IncompleteSummary` are recovered inside the
/// orchestration facade and never escape it; the provider variants surface to
/// the HTTP layer so it can map each to a distinct status and message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("the model reported that the book does not exist")]
    BookNotFound,

    #[error("no JSON object could be recovered from the model reply")]
    Parse {
        /// Original reply text, kept for diagnostics.
        raw: String,
    },

    #[error("summary payload is incomplete: {field}")]
    IncompleteSummary { field: String },

    #[error("provider rejected the API credential")]
    Auth,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("provider request timed out")]
    Timeout,

    #[error("provider request failed: {message}")]
    Provider {
        /// HTTP status of the failed call, when a response was received.
        status: Option<u16>,
        message: String,
    },
}

impl Error {
    /// Status code of the underlying provider failure, when there is one.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            Error::Auth => Some(401),
            Error::RateLimited => Some(429),
            Error::Provider { status, .. } => *status,
            _ => None,
        }
    }

    /// True for transient provider failures that are worth retrying.
    pub fn is_retryable(&self, retry_status_codes: &[u16]) -> bool {
        match self {
            Error::Provider { status: Some(status), .. } => retry_status_codes.contains(status),
            _ => false,
        }
    }
}
