//! # Dotforge Codegen
//!
//! Turns an edited scene into source code for embedded display drivers.
//!
//! ## Generation Platforms
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │             Platform Trait                  │
//! ├──────────────────────┬──────────────────────┤
//! │ Adafruit GFX         │ Raw uint32 frame     │
//! │ (per-layer calls)    │ (whole-frame array)  │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Each platform walks the scene's layers in z order and emits drawing
//! statements plus any data declarations (packed bitmaps, frame buffers)
//! those statements reference.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bitmap;
pub mod error;
pub mod platform;
pub mod source;

pub use error::{CodegenError, CodegenResult};
pub use platform::{
    platform_by_id, platforms, AdafruitGfxPlatform, Platform, Uint32RawPlatform,
};
pub use source::SourceBuffer;

/// Code generator version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
