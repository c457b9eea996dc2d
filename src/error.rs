//! Error types shared across the pipeline.

/// Problems with the incoming feedback batch. These are raised while the batch
/// is being validated, before any inference runs.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: rating {value:?} is not an integer")]
    InvalidRating { row: usize, value: String },

    #[error("row {row}: date_submitted {value:?} is not a date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: course must be a non-empty string")]
    InvalidCourse { row: usize },

    #[error("The 'feedback' list cannot be empty.")]
    EmptyFeedback,

    #[error("malformed batch: {0}")]
    Malformed(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised by an inference backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("text generation is not configured")]
    Unavailable,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("backend returned an empty completion")]
    EmptyCompletion,

    #[error("unknown sentiment label '{0}'")]
    UnknownLabel(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("clustering failed: {0}")]
    Clustering(String),

    #[error("{0}")]
    Other(String),
}

impl BackendError {
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Client errors will not succeed on retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Status { status, .. } => !(400..500).contains(status) || *status == 429,
            Self::Http(_) | Self::Timeout | Self::EmptyCompletion => true,
            _ => false,
        }
    }
}
