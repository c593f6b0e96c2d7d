//! Engine error types.

use std::path::PathBuf;

/// Errors raised by the engine's fallible helpers.
///
/// Public lifecycle operations never surface these directly: they log the
/// error and fall back to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A config or scene file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON document did not match the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An entity entry in a scene description could not be parsed.
    #[error("invalid entity config: {0}")]
    InvalidEntity(String),

    /// A component rejected the data it was initialised with.
    #[error("invalid data for component '{component}': {message}")]
    ComponentData {
        /// The component key.
        component: String,
        /// What was wrong with the data.
        message: String,
    },

    /// A resource resolved to a payload of the wrong kind.
    #[error("resource '{id}' is not a {expected}")]
    ResourceKind {
        /// The resource identifier.
        id: String,
        /// The kind the caller asked for.
        expected: &'static str,
    },
}

impl EngineError {
    /// Convenience constructor for [`EngineError::ComponentData`].
    pub fn component_data(component: impl Into<String>, message: impl ToString) -> Self {
        Self::ComponentData {
            component: component.into(),
            message: message.to_string(),
        }
    }
}
