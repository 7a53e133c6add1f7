//! # Dotforge Core
//!
//! Editing model for pixel scenes on small embedded displays.
//! Everything here is plain state and synchronous calls, so the same core
//! drives a GUI shell, a CLI, or tests without change.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                dotforge-core                │
//! ├─────────────────────────────────────────────┤
//! │  Layers          │  Tools                   │
//! │  - Typed kinds   │  - Select / drag / nudge │
//! │  - Edit cycle    │  - One creator per kind  │
//! │  - Modifiers     │  - Keyboard handling     │
//! ├─────────────────────────────────────────────┤
//! │  Session         │  Rendering               │
//! │  - Layer stack   │  - RGBA surface          │
//! │  - History       │  - 5x7 bitmap font       │
//! │  - Persistence   │  - Selection overlay     │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod error;
pub mod features;
pub mod font;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layer;
pub mod overlay;
pub mod project;
pub mod session;
pub mod surface;
pub mod tool;

pub use color::{parse_color, Rgba};
pub use error::{EditorError, EditorResult};
pub use features::PlatformFeatures;
pub use font::{BitmapFont, Font, FontRegistry, BUILTIN_FONT};
pub use geometry::{Point, Rect};
pub use history::History;
pub use input::{Key, KeyModifiers};
pub use layer::{
    EditMode, Layer, LayerKind, LayerState, LayerType, ModifierDescriptor, ModifierKind,
};
pub use overlay::{paint_outlines, selection_outlines, Outline, OutlineStyle};
pub use project::{ProjectDocument, FORMAT_VERSION};
pub use session::EditorSession;
pub use surface::{ImageData, Surface};
pub use tool::{CreateTool, SelectTool, Tool, ToolRegistry};

/// Editing core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
