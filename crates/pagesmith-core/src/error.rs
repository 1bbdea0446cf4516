//! Error types for pagesmith-core

use thiserror::Error;

use crate::tree::StructuralError;

/// Result type alias for pagesmith-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pagesmith-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML configuration or snapshot
    #[error("failed to parse YAML: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Snapshot file has an unsupported extension
    #[error("unsupported snapshot format: {path} (expected .json, .yaml or .yml)")]
    SnapshotFormat {
        /// Offending file
        path: String,
    },

    /// Two snapshot files resolve to the same design name
    #[error("design '{name}' is defined twice: {first} and {second}")]
    DuplicateDesign {
        /// Shared design name
        name: String,
        /// File found first
        first: String,
        /// File found second
        second: String,
    },

    /// Components cannot form a page tree
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
