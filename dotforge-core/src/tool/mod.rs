//! Pointer tools: the translation from input events to layer edit cycles.
//!
//! Tools never own layer geometry beyond a transient grab offset. They
//! address layers by uid through the [`EditorSession`] passed into every
//! call, so a tool can be swapped mid-session without leaving references
//! behind.

mod create;
mod select;

pub use create::CreateTool;
pub use select::SelectTool;

use crate::error::EditorResult;
use crate::geometry::Point;
use crate::input::{Key, KeyModifiers};
use crate::layer::LayerType;
use crate::session::EditorSession;

/// Trait for pointer tools.
pub trait Tool {
    /// Tool identifier, unique within a registry.
    fn name(&self) -> &str;

    /// Whether the tool creates or modifies layer content. Hover
    /// highlighting is suppressed while a modifier tool is active.
    fn is_modifier(&self) -> bool;

    /// Begin a pointer interaction at `point`, in model space.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the edit.
    fn start_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()>;

    /// Continue the interaction at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the edit.
    fn edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()>;

    /// Finish the interaction at `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the edit.
    fn stop_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()>;

    /// Handle a key press. Returns whether the key was consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the resulting edit.
    fn on_key_down(
        &mut self,
        _session: &mut EditorSession,
        _key: Key,
        _modifiers: KeyModifiers,
    ) -> EditorResult<bool> {
        Ok(false)
    }
}

/// Tools available to an editor, looked up by name.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// The standard toolset: selection plus one creation tool per layer
    /// kind.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SelectTool::new()));
        for ty in LayerType::ALL {
            registry.register(Box::new(CreateTool::new(ty)));
        }
        registry
    }

    /// Add a tool. A tool with the same name replaces the existing one.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if let Some(slot) = self.tools.iter_mut().find(|t| t.name() == tool.name()) {
            *slot = tool;
        } else {
            self.tools.push(tool);
        }
    }

    /// Look up a tool by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut dyn Tool> {
        self.tools
            .iter_mut()
            .find(|t| t.name() == name)
            .map(|t| &mut **t as &mut dyn Tool)
    }

    /// Names of all registered tools, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
