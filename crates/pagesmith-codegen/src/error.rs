//! Error types for code generation

use pagesmith_core::{ComponentId, StructuralError};
use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// A component whose attributes cannot be translated into output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmissionError {
    /// `kind` names no known element variant
    #[error("component {id}: unknown kind '{kind}'")]
    UnknownKind {
        /// Offending component
        id: ComponentId,
        /// The unrecognized kind
        kind: String,
    },

    /// A required field is absent
    #[error("component {id}: missing required field `{field}`")]
    MissingField {
        /// Offending component
        id: ComponentId,
        /// Field path, e.g. `appearance.text`
        field: String,
    },

    /// A field is present but malformed
    #[error("component {id}: invalid `{field}`: {message}")]
    InvalidField {
        /// Offending component
        id: ComponentId,
        /// Field path, e.g. `geometry.width`
        field: String,
        /// What is wrong with it
        message: String,
    },
}

impl EmissionError {
    /// The offending component
    pub fn component_id(&self) -> ComponentId {
        match self {
            Self::UnknownKind { id, .. }
            | Self::MissingField { id, .. }
            | Self::InvalidField { id, .. } => *id,
        }
    }

    /// The offending field path
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownKind { .. } => "kind",
            Self::MissingField { field, .. } | Self::InvalidField { field, .. } => field,
        }
    }

    pub(crate) fn invalid(id: ComponentId, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            id,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while compiling pages
#[derive(Error, Debug)]
pub enum Error {
    /// Components cannot form a page tree
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    /// A component cannot be emitted
    #[error("emission error: {0}")]
    Emission(#[from] EmissionError),

    /// Snapshot or configuration failure
    #[error(transparent)]
    Core(#[from] pagesmith_core::Error),

    /// Document template failed to render
    #[error("invalid template: {0}")]
    InvalidTemplate(#[from] minijinja::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
