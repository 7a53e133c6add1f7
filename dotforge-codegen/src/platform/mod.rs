//! Code-generation platform implementations.

pub mod adafruit;
pub mod uint32_raw;

pub use adafruit::AdafruitGfxPlatform;
pub use uint32_raw::Uint32RawPlatform;

use dotforge_core::{EditorSession, Layer, PlatformFeatures};

use crate::error::{CodegenError, CodegenResult};
use crate::source::SourceBuffer;

/// Trait for code-generation targets.
///
/// A platform binds a display driver API to a color encoding and a
/// capability set. Layer kinds the platform cannot draw emit nothing
/// rather than erroring, so one scene can target several platforms.
pub trait Platform {
    /// Stable platform id, used in documents and on the command line.
    fn id(&self) -> &'static str;

    /// Human-readable platform name.
    fn display_name(&self) -> &'static str;

    /// Capability flags a session targeting this platform should use.
    fn features(&self) -> PlatformFeatures;

    /// Emit the statements (and any data declarations) drawing one layer.
    ///
    /// # Errors
    ///
    /// Returns an error if scene rendering fails.
    fn generate_layer(&self, layer: &Layer, buffer: &mut SourceBuffer) -> CodegenResult<()>;

    /// Generate source for a whole session, walking layers lowest z index
    /// first so statement order matches paint order.
    ///
    /// # Errors
    ///
    /// Returns an error if scene rendering fails.
    fn generate(&self, session: &EditorSession) -> CodegenResult<SourceBuffer> {
        let mut buffer = SourceBuffer::new();
        let mut layers: Vec<&Layer> = session.layers().iter().collect();
        layers.sort_by_key(|l| l.index());
        for layer in layers {
            self.generate_layer(layer, &mut buffer)?;
        }
        Ok(buffer)
    }
}

/// All built-in platforms, in presentation order.
#[must_use]
pub fn platforms() -> Vec<Box<dyn Platform>> {
    vec![
        Box::new(AdafruitGfxPlatform::new()),
        Box::new(Uint32RawPlatform::new()),
    ]
}

/// Look up a platform by id.
///
/// # Errors
///
/// Returns [`CodegenError::UnknownPlatform`] when no platform has the id.
pub fn platform_by_id(id: &str) -> CodegenResult<Box<dyn Platform>> {
    platforms()
        .into_iter()
        .find(|p| p.id() == id)
        .ok_or_else(|| CodegenError::UnknownPlatform(id.to_string()))
}
