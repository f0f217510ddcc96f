//! Error types shared across crates.

use thiserror::Error;

/// A malformed route file. Every variant carries the 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unrecognised ship type \"{token}\" at line {line}")]
    UnknownShipKind { token: String, line: usize },

    #[error("Invalid location at line {line}")]
    InvalidLocation { line: usize },

    #[error("Empty route at line {line}")]
    EmptyRoute { line: usize },

    #[error("Route with only one location at line {line}")]
    SingleWaypoint { line: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnknownShipKind { line, .. }
            | ParseError::InvalidLocation { line }
            | ParseError::EmptyRoute { line }
            | ParseError::SingleWaypoint { line } => *line,
        }
    }
}

/// Failure loading a `SimConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
