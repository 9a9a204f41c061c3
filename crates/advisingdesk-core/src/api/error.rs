use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No response at all: refused connection, DNS failure, reset, timeout.
    #[error("Cannot connect to server: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// The body was not the JSON shape the endpoint promises.
    #[error("Invalid response from {endpoint}: {reason}")]
    Parse { endpoint: String, reason: String },

    /// Single-student lookup found nothing.
    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl ApiError {
    /// Build the error for a non-success response.
    ///
    /// The server's `error` (or `message`) field wins; otherwise the message
    /// is the generic `HTTP error <status>`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message =
            Self::message_from_body(body).unwrap_or_else(|| format!("HTTP error {}", status));
        ApiError::HttpStatus { status, message }
    }

    /// Pull a message out of an error body.
    ///
    /// Only the first JSON value in the body is read, so a stray trailing
    /// brace or newline-delimited junk does not hide the server's message.
    fn message_from_body(body: &str) -> Option<String> {
        let mut values = serde_json::Deserializer::from_str(body).into_iter::<serde_json::Value>();
        let value = values.next()?.ok()?;
        value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(|m| m.as_str())
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(Self::truncate_message)
    }

    fn truncate_message(message: &str) -> String {
        if message.chars().count() <= MAX_ERROR_BODY_LENGTH {
            message.to_string()
        } else {
            let truncated: String = message.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}...", truncated)
        }
    }

    pub fn parse(endpoint: &str, err: impl std::fmt::Display) -> Self {
        ApiError::Parse {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_)) || self.status() == Some(404)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}
