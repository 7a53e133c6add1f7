//! Error types for code generation.

use thiserror::Error;

/// Result type for code generation.
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Errors that can occur while generating platform source.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// No platform is registered under the given id.
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    /// Rendering the scene for a raw-frame platform failed.
    #[error("Scene render failed: {0}")]
    Render(#[from] dotforge_core::EditorError),
}
