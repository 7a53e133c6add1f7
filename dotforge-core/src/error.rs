//! Error types for editor operations.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in the editing core.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Layer not found in the session.
    #[error("Layer not found: {0}")]
    LayerNotFound(String),

    /// A persisted state snapshot carries a type tag no layer kind claims.
    #[error("Unknown layer type tag: {0}")]
    UnknownLayerType(String),

    /// Font name not present in the registry.
    #[error("Unknown font: {0}")]
    UnknownFont(String),

    /// A persisted snapshot failed validation on load.
    #[error("Malformed layer state: {0}")]
    MalformedState(String),

    /// Color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// The layer has no modifier with the given name (or the platform
    /// feature gating removed it).
    #[error("Unknown modifier `{name}` on {kind} layer")]
    UnknownModifier {
        /// Modifier name that was requested.
        name: String,
        /// Type tag of the layer the request hit.
        kind: &'static str,
    },

    /// A modifier value had the wrong shape for the target property.
    #[error("Invalid value for modifier `{name}`: {reason}")]
    InvalidModifierValue {
        /// Modifier name that rejected the value.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
