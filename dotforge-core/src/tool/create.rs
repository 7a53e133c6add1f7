//! Creation tools: one per layer kind, placing and dragging out new layers.

use uuid::Uuid;

use crate::error::EditorResult;
use crate::geometry::Point;
use crate::layer::{EditMode, Layer, LayerType};
use crate::session::EditorSession;

use super::Tool;

/// Tool that creates a layer of one kind and drags out its geometry.
///
/// Press places the layer at the pointer so it is visible immediately,
/// drag runs the CREATING edit cycle, and release commits the state and
/// selects the new layer.
#[derive(Debug, Clone)]
pub struct CreateTool {
    layer_type: LayerType,
    creating: Option<Uuid>,
}

impl CreateTool {
    /// Create a tool producing layers of the given kind.
    #[must_use]
    pub const fn new(layer_type: LayerType) -> Self {
        Self {
            layer_type,
            creating: None,
        }
    }

    /// The kind of layer this tool produces.
    #[must_use]
    pub const fn layer_type(&self) -> LayerType {
        self.layer_type
    }
}

impl Tool for CreateTool {
    fn name(&self) -> &str {
        self.layer_type.tag()
    }

    fn is_modifier(&self) -> bool {
        true
    }

    fn start_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let layer = Layer::new(self.layer_type, session.features(), session.fonts())?;
        let uid = session.add_layer(layer);
        session.start_layer_edit(uid, EditMode::Creating, point)?;
        self.creating = Some(uid);
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let Some(uid) = self.creating else {
            return Ok(());
        };
        session.continue_layer_edit(uid, point)
    }

    fn stop_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let Some(uid) = self.creating.take() else {
            return Ok(());
        };
        session.continue_layer_edit(uid, point)?;
        session.finish_layer_edit(uid)?;
        session.select_only(uid)?;
        Ok(())
    }
}
