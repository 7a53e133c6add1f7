//! Project documents: the on-disk form of an editing session.
//!
//! A document carries the display resolution, the codegen platform id, and
//! every layer's persisted state. Layer geometry inside the document uses
//! the short-keyed wire format from [`LayerState`]; the document envelope
//! itself keeps readable keys.

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::features::PlatformFeatures;
use crate::font::FontRegistry;
use crate::geometry::Point;
use crate::layer::{Layer, LayerState};
use crate::session::EditorSession;

/// Current document format version.
pub const FORMAT_VERSION: u32 = 1;

/// A saved project: display, target platform, and all layer states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    /// Format version, for forward-compatibility checks.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Project name.
    pub name: String,
    /// Display resolution as `[width, height]` in device units.
    pub display: [f32; 2],
    /// Code-generation platform id the project targets.
    pub platform: String,
    /// Layer states, lowest z index first.
    pub layers: Vec<LayerState>,
}

const fn default_version() -> u32 {
    FORMAT_VERSION
}

impl ProjectDocument {
    /// Snapshot a session into a document, layers ordered by z index.
    #[must_use]
    pub fn from_session(
        name: impl Into<String>,
        platform: impl Into<String>,
        session: &EditorSession,
    ) -> Self {
        let mut layers: Vec<&Layer> = session.layers().iter().collect();
        layers.sort_by_key(|l| l.index());
        Self {
            version: FORMAT_VERSION,
            name: name.into(),
            display: session.display().xy(),
            platform: platform.into(),
            layers: layers.into_iter().map(Layer::save_state).collect(),
        }
    }

    /// Rebuild an editing session from the document.
    ///
    /// The whole document is validated: any malformed layer fails the load
    /// instead of producing a partial session.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MalformedState`] for an unsupported format
    /// version, or any layer restore error from [`Layer::from_state`].
    pub fn to_session(
        &self,
        features: PlatformFeatures,
        fonts: FontRegistry,
    ) -> EditorResult<EditorSession> {
        if self.version > FORMAT_VERSION {
            return Err(EditorError::MalformedState(format!(
                "document format version {} is newer than supported version {FORMAT_VERSION}",
                self.version
            )));
        }
        let mut session = EditorSession::new(Point::from(self.display), features);
        *session.fonts_mut() = fonts;
        for state in &self.layers {
            session.restore_layer(state)?;
        }
        Ok(session)
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Serialization)
    }
}
