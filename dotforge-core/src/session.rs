//! Editing session: the layer collection and everything an edit touches.
//!
//! [`EditorSession`] owns the ordered layer list, the active-layer handle,
//! the shared preview surface lent to layer draws, the undo history, and
//! the platform/font collaborators. Tools never hold layer references;
//! they address layers by uid through the session so all mutation funnels
//! through one place.

use serde_json::Value;
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};
use crate::features::PlatformFeatures;
use crate::font::FontRegistry;
use crate::geometry::Point;
use crate::history::History;
use crate::layer::{EditMode, Layer, LayerState, ModifierDescriptor};
use crate::surface::{ImageData, Surface};

/// Mutable editing state for one open document.
#[derive(Debug)]
pub struct EditorSession {
    layers: Vec<Layer>,
    active: Option<Uuid>,
    display: Point,
    scale: f32,
    features: PlatformFeatures,
    fonts: FontRegistry,
    history: History,
    preview: Surface,
    needs_redraw: bool,
}

impl EditorSession {
    /// Create a session for a display of the given resolution.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Display resolutions are small positive integers
    pub fn new(display: Point, features: PlatformFeatures) -> Self {
        let display = display.round().max(Point::new(1.0, 1.0));
        Self {
            layers: Vec::new(),
            active: None,
            display,
            scale: 1.0,
            features,
            fonts: FontRegistry::default(),
            history: History::new(),
            preview: Surface::new(display.x as u32, display.y as u32),
            needs_redraw: false,
        }
    }

    /// Display resolution in device units.
    #[must_use]
    pub const fn display(&self) -> Point {
        self.display
    }

    /// Change the display resolution, rebuilding the preview surface.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Display resolutions are small positive integers
    pub fn set_display(&mut self, display: Point) {
        let display = display.round().max(Point::new(1.0, 1.0));
        self.display = display;
        self.preview = Surface::new(display.x as u32, display.y as u32);
        self.needs_redraw = true;
    }

    /// Current zoom factor applied between model and screen space.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the zoom factor.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale.max(0.125);
        self.needs_redraw = true;
    }

    /// Capability flags of the target platform.
    #[must_use]
    pub const fn features(&self) -> &PlatformFeatures {
        &self.features
    }

    /// Registered font faces.
    #[must_use]
    pub const fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    /// Mutable access to the font registry, for registering extra faces.
    pub fn fonts_mut(&mut self) -> &mut FontRegistry {
        &mut self.fonts
    }

    /// The undo history of committed edit states.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// All layers, in insertion order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers in the session.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Whether the session has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Get a layer by uid.
    #[must_use]
    pub fn layer(&self, uid: Uuid) -> Option<&Layer> {
        self.layers.iter().find(|l| l.uid() == uid)
    }

    /// Get a mutable layer by uid.
    pub fn layer_mut(&mut self, uid: Uuid) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.uid() == uid)
    }

    /// Uid of the active layer, if any.
    #[must_use]
    pub const fn active(&self) -> Option<Uuid> {
        self.active
    }

    /// The active layer, if any.
    #[must_use]
    pub fn active_layer(&self) -> Option<&Layer> {
        self.active.and_then(|uid| self.layer(uid))
    }

    /// Add a layer on top of the stack, assigning the next z index.
    pub fn add_layer(&mut self, mut layer: Layer) -> Uuid {
        layer.set_index(self.next_index());
        let uid = layer.uid();
        self.layers.push(layer);
        self.needs_redraw = true;
        uid
    }

    /// Rebuild a layer from persisted state, keeping its saved z index.
    ///
    /// # Errors
    ///
    /// As [`Layer::from_state`].
    pub fn restore_layer(&mut self, state: &LayerState) -> EditorResult<Uuid> {
        let layer = Layer::from_state(state, &self.fonts)?;
        let uid = layer.uid();
        self.layers.push(layer);
        self.needs_redraw = true;
        Ok(uid)
    }

    /// Remove a layer from the session.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid.
    pub fn remove_layer(&mut self, uid: Uuid) -> EditorResult<Layer> {
        let i = self.position_of(uid)?;
        if self.active == Some(uid) {
            self.active = None;
        }
        self.needs_redraw = true;
        Ok(self.layers.remove(i))
    }

    /// Select exactly one layer and make it active.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid.
    pub fn select_only(&mut self, uid: Uuid) -> EditorResult<()> {
        self.position_of(uid)?;
        for layer in &mut self.layers {
            layer.set_selected(layer.uid() == uid);
        }
        self.active = Some(uid);
        self.needs_redraw = true;
        Ok(())
    }

    /// Deselect every layer and clear the active handle.
    pub fn clear_selection(&mut self) {
        for layer in &mut self.layers {
            layer.set_selected(false);
        }
        self.active = None;
        self.needs_redraw = true;
    }

    /// Layers currently marked selected.
    pub fn selected_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.selected())
    }

    /// Find the topmost (highest z index) layer whose bounds contain the
    /// point, in model space.
    #[must_use]
    pub fn layer_at(&self, point: Point) -> Option<Uuid> {
        let mut hits: Vec<_> = self.layers.iter().filter(|l| l.contains(point)).collect();
        hits.sort_by(|a, b| b.index().cmp(&a.index()));
        hits.first().map(|l| l.uid())
    }

    /// Begin an edit cycle on a layer, drawing it onto the preview surface.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own draw errors.
    pub fn start_layer_edit(
        &mut self,
        uid: Uuid,
        mode: EditMode,
        point: Point,
    ) -> EditorResult<()> {
        let i = self.position_of(uid)?;
        self.layers[i].start_edit(mode, point, &self.fonts, &mut self.preview)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Apply one pointer step of a layer's active edit.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own draw errors.
    pub fn continue_layer_edit(&mut self, uid: Uuid, point: Point) -> EditorResult<()> {
        let i = self.position_of(uid)?;
        self.layers[i].edit(point, &self.fonts, &mut self.preview)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// End a layer's edit cycle, committing the resulting state to history.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid.
    pub fn finish_layer_edit(&mut self, uid: Uuid) -> EditorResult<LayerState> {
        let i = self.position_of(uid)?;
        let state = self.layers[i].stop_edit(&mut self.history);
        self.needs_redraw = true;
        Ok(state)
    }

    /// Move a layer directly to `position`: set it, redraw the layer, then
    /// recompute bounds. The select tool's drag path, which redraws before
    /// the bounds update instead of after.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own draw errors.
    pub fn move_layer_to(&mut self, uid: Uuid, position: Point) -> EditorResult<()> {
        let i = self.position_of(uid)?;
        let layer = &mut self.layers[i];
        layer.set_position(position);
        layer.draw(&mut self.preview, &self.fonts)?;
        layer.update_bounds(&self.fonts)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// Enumerate a layer's modifiers under this session's platform.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid.
    pub fn layer_modifiers(&self, uid: Uuid) -> EditorResult<Vec<ModifierDescriptor>> {
        let layer = self
            .layer(uid)
            .ok_or_else(|| EditorError::LayerNotFound(uid.to_string()))?;
        Ok(layer.modifiers(&self.features))
    }

    /// Read one modifier value from a layer.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own modifier errors.
    pub fn layer_modifier(&self, uid: Uuid, name: &str) -> EditorResult<Value> {
        let layer = self
            .layer(uid)
            .ok_or_else(|| EditorError::LayerNotFound(uid.to_string()))?;
        layer.modifier_value(&self.features, name)
    }

    /// Apply one modifier value to a layer and return its saved state. The
    /// full cycle runs before returning: mutate, recompute bounds, save the
    /// state, redraw the layer.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own modifier errors.
    pub fn set_layer_modifier(
        &mut self,
        uid: Uuid,
        name: &str,
        value: &Value,
    ) -> EditorResult<LayerState> {
        let i = self.position_of(uid)?;
        let state = self.layers[i].set_modifier(&self.features, name, value, &self.fonts)?;
        self.layers[i].draw(&mut self.preview, &self.fonts)?;
        self.needs_redraw = true;
        Ok(state)
    }

    /// Replace the raster content of an icon or paint layer.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::LayerNotFound`] if no layer has the uid, or
    /// the layer's own raster errors.
    pub fn set_layer_raster(&mut self, uid: Uuid, image: ImageData) -> EditorResult<()> {
        let i = self.position_of(uid)?;
        self.layers[i].set_raster(image, &self.fonts)?;
        self.layers[i].draw(&mut self.preview, &self.fonts)?;
        self.needs_redraw = true;
        Ok(())
    }

    /// The preview surface holding the most recent single-layer draw.
    #[must_use]
    pub const fn preview(&self) -> &Surface {
        &self.preview
    }

    /// Composite every layer in z order onto a fresh frame.
    ///
    /// # Errors
    ///
    /// Propagates layer draw errors.
    pub fn render_frame(&self) -> EditorResult<Surface> {
        let mut frame = Surface::new(self.preview.width(), self.preview.height());
        let mut scratch = Surface::new(self.preview.width(), self.preview.height());
        let mut order: Vec<&Layer> = self.layers.iter().collect();
        order.sort_by_key(|l| l.index());
        for layer in order {
            layer.draw(&mut scratch, &self.fonts)?;
            frame.blend(&scratch);
        }
        Ok(frame)
    }

    /// Ask for a full-screen repaint on the next frame.
    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Consume the pending redraw request, if one is set.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn next_index(&self) -> u32 {
        self.layers
            .iter()
            .map(Layer::index)
            .max()
            .map_or(0, |i| i + 1)
    }

    fn position_of(&self, uid: Uuid) -> EditorResult<usize> {
        self.layers
            .iter()
            .position(|l| l.uid() == uid)
            .ok_or_else(|| EditorError::LayerNotFound(uid.to_string()))
    }
}
