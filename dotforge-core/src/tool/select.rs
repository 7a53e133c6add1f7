//! Selection, dragging, resizing, and keyboard nudging of existing layers.

use crate::error::EditorResult;
use crate::geometry::{Point, Rect};
use crate::input::{Key, KeyModifiers};
use crate::layer::EditMode;
use crate::session::EditorSession;

use super::Tool;

/// What the pointer is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        offset: Point,
        origin: Point,
        origin_size: Point,
    },
    Resizing,
}

/// Tool that selects layers and drags, resizes, or nudges them.
///
/// A drag preserves the grab point: the offset between the pointer and the
/// layer position at press time is subtracted from every subsequent
/// pointer position, so the layer does not snap its origin to the cursor.
#[derive(Debug, Default)]
pub struct SelectTool {
    state: DragState,
}

impl SelectTool {
    /// Create the tool in the idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The position and size the active layer had when the current drag
    /// began. Recorded at press time so callers can build cancel behavior
    /// on top; the tool itself never rolls a drag back.
    #[must_use]
    pub fn drag_origin(&self) -> Option<(Point, Point)> {
        match self.state {
            DragState::Dragging {
                origin,
                origin_size,
                ..
            } => Some((origin, origin_size)),
            DragState::Idle | DragState::Resizing => None,
        }
    }

    /// Begin dragging the active layer's secondary geometry (size, radius,
    /// or line end). Callers decide when the pointer is on a resize handle;
    /// without an active layer this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the session rejects the edit.
    pub fn start_resize(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let Some(uid) = session.active() else {
            return Ok(());
        };
        session.start_layer_edit(uid, EditMode::Resizing, point)?;
        self.state = DragState::Resizing;
        Ok(())
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &str {
        "select"
    }

    fn is_modifier(&self) -> bool {
        true
    }

    fn start_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let Some(uid) = session.layer_at(point) else {
            session.clear_selection();
            self.state = DragState::Idle;
            return Ok(());
        };
        let Some((position, size)) = session.layer(uid).map(|l| (l.position(), l.size())) else {
            return Ok(());
        };
        session.select_only(uid)?;
        self.state = DragState::Dragging {
            offset: point.subtract(position),
            origin: position,
            origin_size: size,
        };
        Ok(())
    }

    fn edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let Some(uid) = session.active() else {
            return Ok(());
        };
        match self.state {
            DragState::Idle => Ok(()),
            DragState::Dragging { offset, .. } => {
                session.move_layer_to(uid, point.subtract(offset))
            }
            DragState::Resizing => session.continue_layer_edit(uid, point),
        }
    }

    fn stop_edit(&mut self, session: &mut EditorSession, point: Point) -> EditorResult<()> {
        let state = std::mem::take(&mut self.state);
        let Some(uid) = session.active() else {
            return Ok(());
        };
        match state {
            DragState::Idle => {}
            DragState::Dragging { offset, .. } => {
                session.move_layer_to(uid, point.subtract(offset))?;
                session.finish_layer_edit(uid)?;
            }
            DragState::Resizing => {
                session.continue_layer_edit(uid, point)?;
                session.finish_layer_edit(uid)?;
            }
        }
        Ok(())
    }

    fn on_key_down(
        &mut self,
        session: &mut EditorSession,
        key: Key,
        modifiers: KeyModifiers,
    ) -> EditorResult<bool> {
        let Some(uid) = session.active() else {
            return Ok(false);
        };
        match key {
            Key::Escape => {
                session.clear_selection();
                Ok(true)
            }
            Key::Backspace | Key::Delete => {
                session.remove_layer(uid)?;
                session.clear_selection();
                Ok(true)
            }
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                let step = if modifiers.shift { 5.0 } else { 1.0 };
                let delta = match key {
                    Key::ArrowUp => Point::new(0.0, -step),
                    Key::ArrowDown => Point::new(0.0, step),
                    Key::ArrowLeft => Point::new(-step, 0.0),
                    _ => Point::new(step, 0.0),
                };
                let Some(layer) = session.layer(uid) else {
                    return Ok(false);
                };
                let limit = session.display().subtract(layer.size());
                let target = layer
                    .position()
                    .add(delta)
                    .bound_to(Rect::new(Point::ZERO, limit));
                session.move_layer_to(uid, target)?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PlatformFeatures;
    use crate::layer::{Layer, LayerType};
    use serde_json::json;
    use uuid::Uuid;

    fn session_with_rect() -> (EditorSession, Uuid) {
        let mut session =
            EditorSession::new(Point::new(128.0, 64.0), PlatformFeatures::rgb());
        let layer =
            Layer::new(LayerType::Rect, session.features(), session.fonts()).expect("layer");
        let uid = session.add_layer(layer);
        session
            .set_layer_modifier(uid, "w", &json!(10))
            .expect("w");
        session
            .set_layer_modifier(uid, "h", &json!(10))
            .expect("h");
        (session, uid)
    }

    #[test]
    fn test_select_is_a_modifier_tool() {
        // Moving and deleting layers counts as modification, so hosts
        // suppress hover outlines while select is active.
        assert!(SelectTool::new().is_modifier());
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let (mut session, uid) = session_with_rect();
        session.select_only(uid).expect("select");

        let mut tool = SelectTool::new();
        tool.start_edit(&mut session, Point::new(100.0, 50.0))
            .expect("start");
        assert_eq!(session.active(), None);
        assert_eq!(session.selected_layers().count(), 0);
    }

    #[test]
    fn test_drag_preserves_grab_offset() {
        let (mut session, uid) = session_with_rect();
        session
            .move_layer_to(uid, Point::new(10.0, 10.0))
            .expect("place");

        let mut tool = SelectTool::new();
        // Grab at (12, 13), two units right and three down of the origin.
        tool.start_edit(&mut session, Point::new(12.0, 13.0))
            .expect("start");
        assert_eq!(tool.drag_origin(), Some((Point::new(10.0, 10.0), Point::new(10.0, 10.0))));
        tool.edit(&mut session, Point::new(30.0, 31.0)).expect("edit");
        tool.stop_edit(&mut session, Point::new(30.0, 31.0))
            .expect("stop");

        let layer = session.layer(uid).expect("layer");
        assert_eq!(layer.position(), Point::new(28.0, 28.0));
        assert_eq!(session.history().len(), 1);
        assert_eq!(tool.drag_origin(), None);
    }

    #[test]
    fn test_shift_down_nudges_five_and_clamps() {
        let (mut session, uid) = session_with_rect();
        session
            .move_layer_to(uid, Point::new(0.0, 50.0))
            .expect("place");
        session.select_only(uid).expect("select");

        let mut tool = SelectTool::new();
        let consumed = tool
            .on_key_down(&mut session, Key::ArrowDown, KeyModifiers::SHIFT)
            .expect("key");
        assert!(consumed);
        // 50 + 5 would leave the 10-high layer past the 64-row display.
        assert_eq!(
            session.layer(uid).expect("layer").position(),
            Point::new(0.0, 54.0)
        );
    }

    #[test]
    fn test_plain_nudge_moves_one_unit() {
        let (mut session, uid) = session_with_rect();
        session
            .move_layer_to(uid, Point::new(20.0, 20.0))
            .expect("place");
        session.select_only(uid).expect("select");

        let mut tool = SelectTool::new();
        tool.on_key_down(&mut session, Key::ArrowRight, KeyModifiers::NONE)
            .expect("key");
        assert_eq!(
            session.layer(uid).expect("layer").position(),
            Point::new(21.0, 20.0)
        );
    }

    #[test]
    fn test_delete_removes_active_layer() {
        let (mut session, uid) = session_with_rect();
        session.select_only(uid).expect("select");

        let mut tool = SelectTool::new();
        let consumed = tool
            .on_key_down(&mut session, Key::Delete, KeyModifiers::NONE)
            .expect("key");
        assert!(consumed);
        assert!(session.is_empty());
        assert_eq!(session.active(), None);
    }

    #[test]
    fn test_keys_without_active_layer_are_noops() {
        let (mut session, _) = session_with_rect();
        let mut tool = SelectTool::new();
        let consumed = tool
            .on_key_down(&mut session, Key::Backspace, KeyModifiers::NONE)
            .expect("key");
        assert!(!consumed);
        assert_eq!(session.layer_count(), 1);
    }

    #[test]
    fn test_resize_drag_commits_once() {
        let (mut session, uid) = session_with_rect();
        session.select_only(uid).expect("select");

        let mut tool = SelectTool::new();
        tool.start_resize(&mut session, Point::new(10.0, 10.0))
            .expect("resize");
        tool.edit(&mut session, Point::new(16.0, 14.0)).expect("edit");
        tool.stop_edit(&mut session, Point::new(16.0, 14.0))
            .expect("stop");

        let layer = session.layer(uid).expect("layer");
        // 10x10 grown by the (6, 4) drag delta.
        assert_eq!(layer.size(), Point::new(16.0, 14.0));
        assert_eq!(session.history().len(), 1);
    }
}
