//! Whole-frame emission as a raw `uint32_t` pixel array.

use dotforge_core::{EditorSession, Layer, PlatformFeatures, Rgba};

use crate::bitmap;
use crate::error::CodegenResult;
use crate::source::SourceBuffer;

use super::Platform;

/// Generator that skips drawing statements entirely and emits the
/// composited frame as a single array, one `0xAARRGGBB` word per pixel
/// in row-major order. Useful for firmware that blits a prebuilt frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uint32RawPlatform;

impl Uint32RawPlatform {
    /// Create the platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Platform for Uint32RawPlatform {
    fn id(&self) -> &'static str {
        "uint32"
    }

    fn display_name(&self) -> &'static str {
        "Uint32 Bitmap"
    }

    fn features(&self) -> PlatformFeatures {
        // The frame carries full ARGB, but the editor treats this target
        // like a fixed-palette display: layers keep the default color.
        PlatformFeatures::monochrome()
    }

    fn generate_layer(&self, _layer: &Layer, _buffer: &mut SourceBuffer) -> CodegenResult<()> {
        // Per-layer statements do not exist here; generate renders the
        // whole scene at once.
        Ok(())
    }

    fn generate(&self, session: &EditorSession) -> CodegenResult<SourceBuffer> {
        let frame = session.render_frame()?;
        let words: Vec<String> = frame
            .pixels()
            .chunks_exact(4)
            .map(|px| {
                let word = bitmap::argb8888(Rgba([px[0], px[1], px[2], px[3]]));
                format!("0x{word:08x}")
            })
            .collect();
        tracing::debug!(
            "Rendered {}x{} frame into {} words",
            frame.width(),
            frame.height(),
            words.len()
        );

        let mut buffer = SourceBuffer::new();
        buffer.push_declaration(format!(
            "const uint32_t image_frame[{}] = {{ {} }};",
            words.len(),
            words.join(", ")
        ));
        Ok(buffer)
    }
}
