//! Typed layers and their edit-mode state machine.
//!
//! A [`Layer`] pairs identity and appearance with a [`LayerKind`] carrying
//! variant geometry. Pointer interaction runs through the edit cycle:
//! `start_edit` captures a snapshot and (for CREATING) places the layer,
//! `edit` reinterprets the pointer against that snapshot, and `stop_edit`
//! ends the cycle and appends exactly one history entry. Bounds are always
//! derived from the kind, never persisted, and are recomputed after every
//! geometric or content mutation.

mod kind;
mod modifiers;
mod state;

pub use kind::{LayerKind, LayerType};
pub use modifiers::{ModifierDescriptor, ModifierKind};
pub use state::LayerState;

use uuid::Uuid;

use crate::color::{parse_color, Rgba};
use crate::error::{EditorError, EditorResult};
use crate::features::PlatformFeatures;
use crate::font::FontRegistry;
use crate::geometry::{Point, Rect};
use crate::history::History;
use crate::surface::{ImageData, Surface};

/// Phase of an in-progress pointer edit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
    /// No edit in progress.
    #[default]
    None,
    /// The layer is being placed and dragged out for the first time.
    Creating,
    /// The layer is being translated.
    Moving,
    /// The layer's secondary geometry is being dragged.
    Resizing,
}

/// Pre-edit geometry captured by `start_edit` and consumed by `edit`.
///
/// `extent` holds the variant's secondary geometry (size, radius pair, or
/// line end). `last_point` chains freehand paint strokes between calls.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EditSnapshot {
    first_point: Point,
    position: Point,
    extent: Point,
    last_point: Point,
}

/// One drawable scene element with persisted state and derived bounds.
#[derive(Debug, Clone)]
pub struct Layer {
    uid: Uuid,
    name: String,
    index: u32,
    group: Option<String>,
    color: String,
    selected: bool,
    mode: EditMode,
    bounds: Rect,
    kind: LayerKind,
    snapshot: Option<EditSnapshot>,
}

impl Layer {
    /// Construct a layer of the given type with default geometry, the
    /// platform's default color, and freshly computed bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when a text layer is created
    /// against a registry that lacks its default face.
    pub fn new(
        ty: LayerType,
        features: &PlatformFeatures,
        fonts: &FontRegistry,
    ) -> EditorResult<Self> {
        let mut layer = Self {
            uid: Uuid::new_v4(),
            name: ty.display_name().to_string(),
            index: 0,
            group: None,
            color: features.default_color.clone(),
            selected: false,
            mode: EditMode::None,
            bounds: Rect::default(),
            kind: LayerKind::new_default(ty, fonts),
            snapshot: None,
        };
        layer.update_bounds(fonts)?;
        Ok(layer)
    }

    /// Rebuild a layer from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownLayerType`] for an unclaimed type tag,
    /// [`EditorError::InvalidColor`] for an unparseable color, and
    /// [`EditorError::MalformedState`] or [`EditorError::UnknownFont`] when
    /// variant validation fails (missing fields, scale below 1, undecodable
    /// raster data, unregistered font).
    pub fn from_state(state: &LayerState, fonts: &FontRegistry) -> EditorResult<Self> {
        let ty = LayerType::from_tag(&state.kind)
            .ok_or_else(|| EditorError::UnknownLayerType(state.kind.clone()))?;
        parse_color(&state.color)?;
        let mut layer = Self {
            uid: state.uid,
            name: state.name.clone(),
            index: state.index,
            group: state.group.clone(),
            color: state.color.clone(),
            selected: false,
            mode: EditMode::None,
            bounds: Rect::default(),
            kind: kind_from_state(ty, state, fonts)?,
            snapshot: None,
        };
        layer.update_bounds(fonts)?;
        Ok(layer)
    }

    /// Stable identity, assigned once.
    #[must_use]
    pub const fn uid(&self) -> Uuid {
        self.uid
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the layer.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Z-order index.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Reassign the z-order index.
    pub fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    /// Optional logical group id.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Assign or clear the group id.
    pub fn set_group(&mut self, group: Option<String>) {
        self.group = group;
    }

    /// Color string as entered.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether the layer is part of the current selection.
    #[must_use]
    pub const fn selected(&self) -> bool {
        self.selected
    }

    /// Mark or unmark the layer as selected.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Current edit phase.
    #[must_use]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Variant geometry and content.
    #[must_use]
    pub const fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// The variant discriminant.
    #[must_use]
    pub const fn layer_type(&self) -> LayerType {
        self.kind.layer_type()
    }

    /// The derived bounding box, valid since the last recompute.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The variant anchor position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.kind.anchor()
    }

    /// Size of the derived bounds.
    #[must_use]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Move the anchor directly, without touching bounds.
    ///
    /// Used by the select tool, which redraws first and recomputes bounds
    /// afterwards; everything else should go through the edit cycle.
    pub fn set_position(&mut self, position: Point) {
        self.kind.set_anchor(position);
    }

    /// Whether the point (model space) falls inside the current bounds.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point)
    }

    /// Recompute `bounds` from the variant geometry. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when a text layer references an
    /// unregistered face.
    pub fn update_bounds(&mut self, fonts: &FontRegistry) -> EditorResult<()> {
        self.bounds = self.kind.bounds(fonts)?;
        Ok(())
    }

    /// Render the layer onto `surface`, treating it as the layer's private
    /// plane: the surface is cleared, the content drawn in the layer color,
    /// and an invisible coverage stamp applied over the full bounds so the
    /// surface records the complete region even where no visible pixel
    /// lands.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when a text layer references an
    /// unregistered face.
    pub fn draw(&self, surface: &mut Surface, fonts: &FontRegistry) -> EditorResult<()> {
        surface.clear();
        let color = parse_color(&self.color).unwrap_or(Rgba::WHITE);
        self.kind.paint(surface, color, fonts)?;
        surface.stamp_coverage(self.bounds);
        Ok(())
    }

    /// Begin an edit cycle.
    ///
    /// Captures the pre-edit snapshot and, for CREATING, relocates the
    /// layer to `point` first so it is visible before the drag begins.
    /// Bounds are recomputed and the layer redrawn before returning.
    /// Starting with [`EditMode::None`] is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when a text layer references an
    /// unregistered face.
    pub fn start_edit(
        &mut self,
        mode: EditMode,
        point: Point,
        fonts: &FontRegistry,
        surface: &mut Surface,
    ) -> EditorResult<()> {
        if mode == EditMode::None {
            return Ok(());
        }
        if mode == EditMode::Creating {
            let color = parse_color(&self.color).unwrap_or(Rgba::WHITE);
            self.kind.place_at(point, color);
        }
        self.snapshot = Some(EditSnapshot {
            first_point: point,
            position: self.kind.anchor(),
            extent: self.kind.extent(),
            last_point: point.round(),
        });
        self.mode = mode;
        self.update_bounds(fonts)?;
        self.draw(surface, fonts)?;
        tracing::debug!("Layer {} started {mode:?} edit", self.uid);
        Ok(())
    }

    /// Apply one pointer step of the active edit, then recompute bounds and
    /// redraw. A call without an active edit is a no-op.
    ///
    /// MOVING sets the anchor to `snapshot position + (point - first)`,
    /// rounded to device units. CREATING and RESIZING apply the variant
    /// formulas.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when a text layer references an
    /// unregistered face.
    pub fn edit(
        &mut self,
        point: Point,
        fonts: &FontRegistry,
        surface: &mut Surface,
    ) -> EditorResult<()> {
        let Some(snapshot) = self.snapshot else {
            return Ok(());
        };
        match self.mode {
            EditMode::None => return Ok(()),
            EditMode::Creating => {
                let color = parse_color(&self.color).unwrap_or(Rgba::WHITE);
                self.kind
                    .apply_creating(snapshot.first_point, snapshot.last_point, point, color);
                if let Some(active) = self.snapshot.as_mut() {
                    active.last_point = point.round();
                }
            }
            EditMode::Moving => {
                let delta = point.subtract(snapshot.first_point);
                self.kind.set_anchor(snapshot.position.add(delta).round());
            }
            EditMode::Resizing => {
                self.kind
                    .apply_resizing(snapshot.first_point, snapshot.extent, point);
            }
        }
        self.update_bounds(fonts)?;
        self.draw(surface, fonts)?;
        Ok(())
    }

    /// End the edit cycle: reset the mode, discard the snapshot, save the
    /// state, and append it to `history`. This is the only point at which
    /// history grows.
    pub fn stop_edit(&mut self, history: &mut History) -> LayerState {
        self.mode = EditMode::None;
        self.snapshot = None;
        let state = self.save_state();
        history.push(state.clone());
        tracing::debug!("Layer {} stopped edit", self.uid);
        state
    }

    /// Project the layer into its persisted snapshot form.
    #[must_use]
    pub fn save_state(&self) -> LayerState {
        let mut state = LayerState::common(
            self.kind.layer_type().tag(),
            self.uid,
            &self.name,
            self.index,
            self.group.as_deref(),
            &self.color,
            self.kind.anchor(),
        );
        match &self.kind {
            LayerKind::Text {
                text, font, scale, ..
            } => {
                state.data = Some(text.clone());
                state.font = Some(font.clone());
                state.scale = Some(*scale);
            }
            LayerKind::Dot { .. } => {}
            LayerKind::Line { start, end } => {
                state.position = start.xy();
                state.end = Some(end.xy());
            }
            LayerKind::Rect { size, fill, .. } => {
                state.size = Some(size.xy());
                state.fill = Some(*fill);
            }
            LayerKind::Circle { radius, fill, .. } => {
                state.radius = Some(*radius);
                state.fill = Some(*fill);
            }
            LayerKind::Ellipse {
                radius_x,
                radius_y,
                fill,
                ..
            } => {
                state.radius_x = Some(*radius_x);
                state.radius_y = Some(*radius_y);
                state.fill = Some(*fill);
            }
            LayerKind::Icon { size, data, .. } | LayerKind::Paint { size, data, .. } => {
                state.size = Some(size.xy());
                if let Some(image) = data {
                    state.data = Some(state::encode_raster(image));
                }
            }
        }
        state
    }

    /// Replace this layer's contents from a persisted snapshot of the same
    /// kind. Resets the edit mode, discards any snapshot, and recomputes
    /// bounds. Selection survives the reload.
    ///
    /// # Errors
    ///
    /// As [`Layer::from_state`], plus [`EditorError::MalformedState`] when
    /// the snapshot's type tag does not match this layer's kind.
    pub fn load_state(&mut self, state: &LayerState, fonts: &FontRegistry) -> EditorResult<()> {
        let loaded = Self::from_state(state, fonts)?;
        if loaded.layer_type() != self.layer_type() {
            return Err(EditorError::MalformedState(format!(
                "state tag `{}` does not match a {} layer",
                state.kind,
                self.layer_type().display_name()
            )));
        }
        let selected = self.selected;
        *self = loaded;
        self.selected = selected;
        Ok(())
    }

    /// Replace the raster content of an icon or paint layer, resizing its
    /// bounds to the raster dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownModifier`] for variants that carry no
    /// raster.
    #[allow(clippy::cast_precision_loss)]
    pub fn set_raster(&mut self, image: ImageData, fonts: &FontRegistry) -> EditorResult<()> {
        match &mut self.kind {
            LayerKind::Icon { size, data, .. } | LayerKind::Paint { size, data, .. } => {
                *size = Point::new(image.width as f32, image.height as f32);
                *data = Some(image);
            }
            _ => {
                return Err(EditorError::UnknownModifier {
                    name: "data".to_string(),
                    kind: self.kind.layer_type().tag(),
                })
            }
        }
        self.update_bounds(fonts)
    }
}

/// Validate and build variant geometry from a snapshot. Pure: the caller
/// commits the result only after every field has passed.
fn kind_from_state(
    ty: LayerType,
    state: &LayerState,
    fonts: &FontRegistry,
) -> EditorResult<LayerKind> {
    let position = state.position_point();
    let kind = match ty {
        LayerType::Text => {
            let font = state::require(state.font.clone(), "text", "f")?;
            if !fonts.contains(&font) {
                return Err(EditorError::UnknownFont(font));
            }
            let scale = state::require(state.scale, "text", "z")?;
            if scale < 1 {
                return Err(EditorError::MalformedState(
                    "text scale factor must be at least 1".to_string(),
                ));
            }
            LayerKind::Text {
                position,
                text: state::require(state.data.clone(), "text", "d")?,
                font,
                scale,
            }
        }
        LayerType::Dot => LayerKind::Dot { position },
        LayerType::Line => LayerKind::Line {
            start: position,
            end: state::require(state.end, "line", "e")?.into(),
        },
        LayerType::Rect => {
            let size = Point::from(state::require(state.size, "rect", "s")?);
            if size.x < 0.0 || size.y < 0.0 {
                return Err(EditorError::MalformedState(
                    "rect size must be non-negative".to_string(),
                ));
            }
            LayerKind::Rect {
                position,
                size,
                fill: state.fill.unwrap_or(false),
            }
        }
        LayerType::Circle => {
            let radius = state::require(state.radius, "circle", "r")?;
            if radius < 1.0 {
                return Err(EditorError::MalformedState(
                    "circle radius must be at least 1".to_string(),
                ));
            }
            LayerKind::Circle {
                position,
                radius,
                fill: state.fill.unwrap_or(false),
            }
        }
        LayerType::Ellipse => {
            let radius_x = state::require(state.radius_x, "ellipse", "rx")?;
            let radius_y = state::require(state.radius_y, "ellipse", "ry")?;
            if radius_x < 1.0 || radius_y < 1.0 {
                return Err(EditorError::MalformedState(
                    "ellipse radii must be at least 1".to_string(),
                ));
            }
            LayerKind::Ellipse {
                position,
                radius_x,
                radius_y,
                fill: state.fill.unwrap_or(false),
            }
        }
        LayerType::Icon | LayerType::Paint => {
            let size = Point::from(state::require(state.size, ty.tag(), "s")?);
            if size.x < 0.0 || size.y < 0.0 {
                return Err(EditorError::MalformedState(format!(
                    "{} size must be non-negative",
                    ty.tag()
                )));
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let data = match &state.data {
                Some(encoded) => Some(state::decode_raster(
                    encoded,
                    size.x.round() as u32,
                    size.y.round() as u32,
                )?),
                None => None,
            };
            if ty == LayerType::Icon {
                LayerKind::Icon {
                    position,
                    size,
                    data,
                }
            } else {
                LayerKind::Paint {
                    position,
                    size,
                    data,
                }
            }
        }
    };
    Ok(kind)
}
