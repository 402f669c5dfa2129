//! RATP client error types.

/// Errors that can occur when fetching data from the RATP API.
#[derive(Debug, thiserror::Error)]
pub enum RatpError {
    /// No response at all (connection refused, DNS, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Line id cannot be expressed as a single URL path segment
    #[error("invalid line ID {0:?}")]
    InvalidLine(String),

    /// Client could not be built from its configuration
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl RatpError {
    /// HTTP status returned by the API, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            RatpError::Api { status, .. } => Some(*status),
            RatpError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
