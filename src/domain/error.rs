use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum ImportError {
    Internal(String),
    ValidationError(String),
    ParseError(String),
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ImportError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ImportError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ImportError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            ImportError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
