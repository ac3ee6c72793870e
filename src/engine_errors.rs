//! # Engine Error Types Module
//!
//! This module defines the error type used internally by the ingredient engine.
//! Public operations are fail-soft and never surface these to callers; they are
//! returned by table constructors, configuration loading and file input, and are
//! converted into fallback records inside the parser.

/// Internal error types for ingredient engine operations
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A vocabulary table (fractions, units, name rules) contains malformed data
    InvalidTable(String),
    /// A strategy regex could not be compiled
    InvalidPattern(String),
    /// A strategy matched but an expected capture group was absent
    MissingCapture(String),
    /// A configuration value could not be parsed or is out of range
    Config(String),
    /// Recipe input could not be read
    Io(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidTable(msg) => write!(f, "Invalid table: {msg}"),
            EngineError::InvalidPattern(msg) => write!(f, "Invalid pattern: {msg}"),
            EngineError::MissingCapture(msg) => write!(f, "Missing capture: {msg}"),
            EngineError::Config(msg) => write!(f, "Configuration error: {msg}"),
            EngineError::Io(msg) => write!(f, "Input error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<regex::Error> for EngineError {
    fn from(err: regex::Error) -> Self {
        EngineError::InvalidPattern(err.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}
