use thiserror::Error;

/// The payload did not match the feed schema. The whole response is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feed payload rejected: {reason}")]
pub struct ValidationError {
    reason: String,
}

impl ValidationError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,
    #[error("request cancelled")]
    Cancelled,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport: {0}")]
    Other(String),
}

/// Why a live feed fetch was abandoned in favour of the mock dataset.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("BFF answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum ReportingError {
    #[error("event API failed ({0})")]
    Status(u16),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("could not encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ReportingError {
    /// HTTP status of the rejected post, when the BFF answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ReportingError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("draft is missing a {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Invalid(String),
}
