use thiserror::Error;

/// Error type surfaced by the transport and resource clients.
///
/// `Display` for `Http` is the normalized message alone, so callers matching
/// on message text see exactly the server's wording; the status code is
/// carried alongside for programmatic handling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error(transparent)]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// The form an error takes once stored in the query cache.
///
/// Cached errors are replayed to every reader of a failed key until the key
/// is invalidated, so they must be cheap to clone.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct QueryError {
    pub status: Option<u16>,
    pub message: String,
}

impl From<ApiError> for QueryError {
    fn from(err: ApiError) -> Self {
        QueryError {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl QueryError {
    /// An error that originated inside the cache itself rather than from a
    /// request (e.g. a cached value failed to deserialize).
    pub fn internal(message: impl Into<String>) -> Self {
        QueryError {
            status: None,
            message: message.into(),
        }
    }
}
