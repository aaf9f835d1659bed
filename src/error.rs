//! Client error types

use thiserror::Error;

/// Errors raised by the conveyor client
#[derive(Error, Debug)]
pub enum ConveyorError {
    /// Argument shape rejected before any request was sent
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Value outside a fixed enumeration (sort key, sort direction)
    #[error("{0}")]
    InvalidValue(String),

    #[error("{0}")]
    Command(String),

    #[error("API request failed: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Response is missing the '{0}' field")]
    MissingField(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConveyorError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn command(msg: impl Into<String>) -> Self {
        Self::Command(msg.into())
    }

    /// HTTP status of a failed API call, if this error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConveyorError>;
