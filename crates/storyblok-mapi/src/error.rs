use std::fmt;

/// Error from a Management API call.
///
/// There is no retry layer: the first error aborts the call and, through
/// the migration driver, the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection-level failure before an HTTP status was received.
    Transport(String),
    /// The server answered with a non-success status. The body is kept
    /// verbatim; Storyblok puts its diagnostics there.
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The response body was not the expected JSON shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Status { status, body } => write!(f, "server returned {status}: {body}"),
            Self::Decode(msg) => write!(f, "response decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
