use std::fmt;

#[derive(Debug)]
pub enum RelayError {
    ApiError {
        status: u16,
        message: String,
    },
    ConfigError(String),
    MalformedResponse(String),
    NetworkError(reqwest::Error),
    Timeout,
    JsonError(serde_json::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::ApiError { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            RelayError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RelayError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            RelayError::NetworkError(e) => write!(f, "Network error: {}", e),
            RelayError::Timeout => write!(f, "Request timeout"),
            RelayError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for RelayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RelayError::NetworkError(e) => Some(e),
            RelayError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Timeout
        } else {
            RelayError::NetworkError(err)
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::JsonError(err)
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
