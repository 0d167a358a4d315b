use std::fmt;

/// Error type for service calls.
#[derive(Debug)]
pub enum ApiError {
    /// Could not reach the service at all. Retryable by the user.
    Network(String),
    /// Non-2xx response. The body is plain text and shown verbatim;
    /// the server does not promise any structured error schema.
    Http(u16, String),
    /// Response body did not match the expected shape.
    Parse(String),
    /// Local file I/O while preparing an upload or saving a download.
    Io(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error (retry when online): {msg}"),
            ApiError::Http(code, body) => write!(f, "HTTP {code}: {body}"),
            ApiError::Parse(msg) => write!(f, "Unexpected response: {msg}"),
            ApiError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
