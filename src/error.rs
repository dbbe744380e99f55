//! Error types for arXiv search operations.

/// Errors that can occur while building, issuing, or reading an arXiv search
#[derive(Debug, thiserror::Error)]
pub enum ArxivError {
    /// Malformed search input, rejected before any network I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request completed but the status code indicates failure
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// Transport-level failure (unreachable host, broken connection, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body is not well-formed XML
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration file or environment could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ArxivError {
    /// Shorthand for a [`ArxivError::Validation`] error
    pub fn validation(message: impl Into<String>) -> Self {
        ArxivError::Validation(message.into())
    }

    /// Whether this error was raised by input validation
    pub fn is_validation(&self) -> bool {
        matches!(self, ArxivError::Validation(_))
    }

    /// HTTP status code, if this is an [`ArxivError::Http`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            ArxivError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for ArxivError {
    fn from(err: quick_xml::Error) -> Self {
        ArxivError::Parse(format!("XML: {}", err))
    }
}

impl From<serde_json::Error> for ArxivError {
    fn from(err: serde_json::Error) -> Self {
        ArxivError::Validation(format!("invalid search query: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ArxivError>;
