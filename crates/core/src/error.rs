//! Error types for the querygate domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.
//!
//! Note that the two public entry points of the engine — classification and
//! context building — never surface these errors to callers: dependency
//! failures degrade to safe defaults instead (conservative routing, fewer
//! context components). The error types below are for the load-time and
//! adapter seams where a caller can actually act on the failure.

use thiserror::Error;

/// The top-level error type for all querygate operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Dictionary errors ---
    #[error("Dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    // --- Complexity analysis errors ---
    #[error("Complexity analysis error: {0}")]
    Complexity(#[from] ComplexityError),

    // --- Configuration errors ---
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum DictionaryError {
    #[error("Failed to read dictionary source {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse dictionary source {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid rule '{key}': {reason}")]
    InvalidRule { key: String, reason: String },
}

#[derive(Debug, Clone, Error)]
pub enum ComplexityError {
    #[error("Analysis request failed: {0}")]
    Failed(String),

    #[error("Analysis timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Analyzer not configured: {0}")]
    NotConfigured(String),
}

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionary_error_displays_correctly() {
        let err = Error::Dictionary(DictionaryError::Parse {
            path: "01-basic-queries.json".into(),
            message: "expected value at line 3".into(),
        });
        assert!(err.to_string().contains("01-basic-queries.json"));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn complexity_timeout_displays_correctly() {
        let err = Error::Complexity(ComplexityError::Timeout { timeout_secs: 10 });
        assert!(err.to_string().contains("10s"));
    }

    #[test]
    fn config_error_displays_correctly() {
        let err = Error::Config(ConfigError::Invalid("cache TTL must be positive".into()));
        assert!(err.to_string().contains("cache TTL"));
    }
}
