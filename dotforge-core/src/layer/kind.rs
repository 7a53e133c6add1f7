//! Layer variant data: geometry, content, and per-kind formulas.
//!
//! [`LayerKind`] carries only the persisted geometry/content of a variant.
//! Transient editing state, identity, and appearance live on the wrapping
//! [`Layer`](super::Layer); the state machine there drives the per-kind
//! formulas defined here.

use crate::color::Rgba;
use crate::error::EditorResult;
use crate::font::{FontRegistry, BUILTIN_FONT};
use crate::geometry::{Point, Rect};
use crate::surface::{line_points, ImageData, Surface};

/// Discriminant for the eight layer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// A single line of text anchored at its baseline.
    Text,
    /// A single pixel.
    Dot,
    /// A straight line between two endpoints.
    Line,
    /// An axis-aligned rectangle, stroked or filled.
    Rect,
    /// A circle described by the top-left of its bounding square.
    Circle,
    /// An axis-aligned ellipse with independent radii.
    Ellipse,
    /// A placed raster image.
    Icon,
    /// A freehand raster painted with pointer strokes.
    Paint,
}

impl LayerType {
    /// All variants, in the order creation tools list them.
    pub const ALL: [Self; 8] = [
        Self::Text,
        Self::Dot,
        Self::Line,
        Self::Rect,
        Self::Circle,
        Self::Ellipse,
        Self::Icon,
        Self::Paint,
    ];

    /// Stable wire tag written to the `t` field.
    ///
    /// Text layers keep the historical `"string"` tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Text => "string",
            Self::Dot => "dot",
            Self::Line => "line",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Icon => "icon",
            Self::Paint => "paint",
        }
    }

    /// Resolve a wire tag back to a variant.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.tag() == tag)
    }

    /// Human-readable name, also the default layer name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Dot => "Dot",
            Self::Line => "Line",
            Self::Rect => "Rect",
            Self::Circle => "Circle",
            Self::Ellipse => "Ellipse",
            Self::Icon => "Icon",
            Self::Paint => "Paint",
        }
    }
}

/// Geometry and content of one layer variant.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    /// Text anchored so the baseline sits at `position`.
    Text {
        /// Baseline-left anchor.
        position: Point,
        /// Line of text to render.
        text: String,
        /// Registry name of the face.
        font: String,
        /// Integer glyph scale factor, at least 1.
        scale: u32,
    },
    /// A single pixel at `position`.
    Dot {
        /// Pixel position.
        position: Point,
    },
    /// A line from `start` to `end`, endpoints inclusive.
    Line {
        /// First endpoint, pinned while creating.
        start: Point,
        /// Second endpoint, dragged while creating or resizing.
        end: Point,
    },
    /// A rectangle at `position` spanning `size` pixels.
    Rect {
        /// Top-left corner.
        position: Point,
        /// Width and height, at least 1x1 once placed.
        size: Point,
        /// Filled rather than stroked.
        fill: bool,
    },
    /// A circle inside the square at `position` with side `2 * radius + 1`.
    Circle {
        /// Top-left of the bounding square.
        position: Point,
        /// Radius in pixels, at least 1.
        radius: f32,
        /// Filled rather than stroked.
        fill: bool,
    },
    /// An ellipse inside the box at `position` spanning
    /// `2 * radius_x + 1` by `2 * radius_y + 1`.
    Ellipse {
        /// Top-left of the bounding box.
        position: Point,
        /// Horizontal radius, at least 1.
        radius_x: f32,
        /// Vertical radius, at least 1.
        radius_y: f32,
        /// Filled rather than stroked.
        fill: bool,
    },
    /// A placed raster image.
    Icon {
        /// Top-left corner.
        position: Point,
        /// Displayed size; matches the raster dimensions when data is set.
        size: Point,
        /// Raster content. Absent data draws and exports nothing.
        data: Option<ImageData>,
    },
    /// A freehand raster; strokes grow the extents box as they go.
    Paint {
        /// Top-left corner of the painted extents.
        position: Point,
        /// Extents of the painted region.
        size: Point,
        /// Raster content, always sized to `size`.
        data: Option<ImageData>,
    },
}

impl LayerKind {
    /// Default geometry/content for a freshly constructed variant.
    #[must_use]
    pub fn new_default(ty: LayerType, fonts: &FontRegistry) -> Self {
        match ty {
            LayerType::Text => Self::Text {
                position: Point::ZERO,
                text: "Text".to_string(),
                font: fonts.default_font_name().unwrap_or(BUILTIN_FONT).to_string(),
                scale: 1,
            },
            LayerType::Dot => Self::Dot {
                position: Point::ZERO,
            },
            LayerType::Line => Self::Line {
                start: Point::ZERO,
                end: Point::ZERO,
            },
            LayerType::Rect => Self::Rect {
                position: Point::ZERO,
                size: Point::new(1.0, 1.0),
                fill: false,
            },
            LayerType::Circle => Self::Circle {
                position: Point::ZERO,
                radius: 1.0,
                fill: false,
            },
            LayerType::Ellipse => Self::Ellipse {
                position: Point::ZERO,
                radius_x: 1.0,
                radius_y: 1.0,
                fill: false,
            },
            LayerType::Icon => Self::Icon {
                position: Point::ZERO,
                size: Point::new(8.0, 8.0),
                data: None,
            },
            LayerType::Paint => Self::Paint {
                position: Point::ZERO,
                size: Point::ZERO,
                data: None,
            },
        }
    }

    /// The variant's discriminant.
    #[must_use]
    pub const fn layer_type(&self) -> LayerType {
        match self {
            Self::Text { .. } => LayerType::Text,
            Self::Dot { .. } => LayerType::Dot,
            Self::Line { .. } => LayerType::Line,
            Self::Rect { .. } => LayerType::Rect,
            Self::Circle { .. } => LayerType::Circle,
            Self::Ellipse { .. } => LayerType::Ellipse,
            Self::Icon { .. } => LayerType::Icon,
            Self::Paint { .. } => LayerType::Paint,
        }
    }

    /// The variant's primary anchor.
    ///
    /// For lines this is the top-left of the two endpoints, so moving by
    /// anchor keeps the whole segment rigid.
    #[must_use]
    pub fn anchor(&self) -> Point {
        match self {
            Self::Text { position, .. }
            | Self::Dot { position }
            | Self::Rect { position, .. }
            | Self::Circle { position, .. }
            | Self::Ellipse { position, .. }
            | Self::Icon { position, .. }
            | Self::Paint { position, .. } => *position,
            Self::Line { start, end } => start.min(*end),
        }
    }

    /// Move the variant's anchor, translating rigidly.
    pub fn set_anchor(&mut self, target: Point) {
        match self {
            Self::Text { position, .. }
            | Self::Dot { position }
            | Self::Rect { position, .. }
            | Self::Circle { position, .. }
            | Self::Ellipse { position, .. }
            | Self::Icon { position, .. }
            | Self::Paint { position, .. } => *position = target,
            Self::Line { start, end } => {
                let delta = target.subtract(start.min(*end));
                *start = start.add(delta);
                *end = end.add(delta);
            }
        }
    }

    /// Secondary geometry captured in edit snapshots: size, radius pair,
    /// or the line's second endpoint.
    #[must_use]
    pub fn extent(&self) -> Point {
        match self {
            Self::Text { .. } | Self::Dot { .. } => Point::ZERO,
            Self::Line { end, .. } => *end,
            Self::Rect { size, .. } | Self::Icon { size, .. } | Self::Paint { size, .. } => *size,
            Self::Circle { radius, .. } => Point::new(*radius, *radius),
            Self::Ellipse {
                radius_x, radius_y, ..
            } => Point::new(*radius_x, *radius_y),
        }
    }

    /// The axis-aligned box the variant occupies.
    ///
    /// Text bounds are anchored so `bounds.y + bounds.h == position.y`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`](crate::error::EditorError::UnknownFont)
    /// when a text layer references an unregistered face.
    pub fn bounds(&self, fonts: &FontRegistry) -> EditorResult<Rect> {
        let rect = match self {
            Self::Text {
                position,
                text,
                font,
                scale,
            } => {
                let measured = fonts.get(font)?.measure(text, *scale);
                Rect::new(
                    Point::new(position.x, position.y - measured.y),
                    measured,
                )
            }
            Self::Dot { position } => Rect::new(*position, Point::new(1.0, 1.0)),
            Self::Line { start, end } => {
                Rect::from_points(*start, *end).adjust(0.0, 0.0, 1.0, 1.0)
            }
            Self::Rect { position, size, .. } => Rect::new(*position, *size),
            Self::Circle {
                position, radius, ..
            } => Rect::new(
                *position,
                Point::new(2.0 * radius + 1.0, 2.0 * radius + 1.0),
            ),
            Self::Ellipse {
                position,
                radius_x,
                radius_y,
                ..
            } => Rect::new(
                *position,
                Point::new(2.0 * radius_x + 1.0, 2.0 * radius_y + 1.0),
            ),
            Self::Icon { position, size, .. } | Self::Paint { position, size, .. } => {
                Rect::new(*position, *size)
            }
        };
        Ok(rect)
    }

    /// Render the variant's visible content onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`](crate::error::EditorError::UnknownFont)
    /// when a text layer references an unregistered face.
    pub fn paint(
        &self,
        surface: &mut Surface,
        color: Rgba,
        fonts: &FontRegistry,
    ) -> EditorResult<()> {
        match self {
            Self::Text {
                position,
                text,
                font,
                scale,
            } => {
                let face = fonts.get(font)?;
                let measured = face.measure(text, *scale);
                let top_left = Point::new(position.x, position.y - measured.y);
                face.draw_text(surface, text, top_left, *scale, color);
            }
            Self::Dot { position } => surface.draw_pixel(*position, color),
            Self::Line { start, end } => surface.line(*start, *end, color),
            Self::Rect {
                position,
                size,
                fill,
            } => {
                let rect = Rect::new(*position, *size);
                if *fill {
                    surface.fill_rect(rect, color);
                } else {
                    surface.stroke_rect(rect, color);
                }
            }
            Self::Circle {
                position,
                radius,
                fill,
            } => {
                let center = position.add(Point::new(*radius, *radius));
                if *fill {
                    surface.fill_circle(center, *radius, color);
                } else {
                    surface.stroke_circle(center, *radius, color);
                }
            }
            Self::Ellipse {
                position,
                radius_x,
                radius_y,
                fill,
            } => {
                let center = position.add(Point::new(*radius_x, *radius_y));
                if *fill {
                    surface.fill_ellipse(center, *radius_x, *radius_y, color);
                } else {
                    surface.stroke_ellipse(center, *radius_x, *radius_y, color);
                }
            }
            Self::Icon { position, data, .. } | Self::Paint { position, data, .. } => {
                if let Some(image) = data {
                    surface.draw_image(*position, image);
                }
            }
        }
        Ok(())
    }

    /// Relocate to the creation anchor when a CREATING edit starts, so the
    /// layer is visible at the pointer before any drag happens.
    pub fn place_at(&mut self, point: Point, color: Rgba) {
        let point = point.round();
        match self {
            Self::Text { position, .. }
            | Self::Dot { position }
            | Self::Icon { position, .. } => *position = point,
            Self::Line { start, end } => {
                *start = point;
                *end = point;
            }
            Self::Rect { position, size, .. } => {
                *position = point;
                *size = Point::new(1.0, 1.0);
            }
            Self::Circle {
                position, radius, ..
            } => {
                *position = point;
                *radius = 1.0;
            }
            Self::Ellipse {
                position,
                radius_x,
                radius_y,
                ..
            } => {
                *position = point;
                *radius_x = 1.0;
                *radius_y = 1.0;
            }
            Self::Paint {
                position,
                size,
                data,
            } => {
                let mut raster = ImageData::new(1, 1);
                raster.set_pixel(0, 0, color);
                *position = point;
                *size = Point::new(1.0, 1.0);
                *data = Some(raster);
            }
        }
    }

    /// Apply one CREATING drag step.
    pub fn apply_creating(&mut self, first: Point, last: Point, point: Point, color: Rgba) {
        let point = point.round();
        match self {
            Self::Text { position, .. }
            | Self::Dot { position }
            | Self::Icon { position, .. } => *position = point,
            Self::Line { end, .. } => *end = point,
            Self::Rect { position, size, .. } => {
                *position = first.min(point).round();
                *size = point.subtract(first).abs().round().max(Point::new(1.0, 1.0));
            }
            Self::Circle {
                position, radius, ..
            } => {
                let d = point.subtract(first).abs();
                *radius = (d.x.max(d.y) / 2.0).round().max(1.0);
                *position = first.min(point).round();
            }
            Self::Ellipse {
                position,
                radius_x,
                radius_y,
                ..
            } => {
                let d = point.subtract(first).abs();
                *radius_x = (d.x / 2.0).round().max(1.0);
                *radius_y = (d.y / 2.0).round().max(1.0);
                *position = first.min(point).round();
            }
            Self::Paint {
                position,
                size,
                data,
            } => paint_stroke(position, size, data, last, point, color),
        }
    }

    /// Apply one RESIZING drag step. Text, dot, and raster layers do not
    /// resize; for them this is a no-op.
    pub fn apply_resizing(&mut self, first: Point, snapshot_extent: Point, point: Point) {
        let point = point.round();
        match self {
            Self::Text { .. } | Self::Dot { .. } | Self::Icon { .. } | Self::Paint { .. } => {}
            Self::Line { end, .. } => *end = point,
            Self::Rect { size, .. } => {
                let delta = point.subtract(first);
                *size = snapshot_extent
                    .add(delta)
                    .round()
                    .max(Point::new(1.0, 1.0));
            }
            Self::Circle { radius, .. } => {
                let delta = point.subtract(first);
                *radius = (snapshot_extent.x + delta.x.max(delta.y)).round().max(1.0);
            }
            Self::Ellipse {
                radius_x, radius_y, ..
            } => {
                let delta = point.subtract(first);
                *radius_x = (snapshot_extent.x + delta.x).round().max(1.0);
                *radius_y = (snapshot_extent.y + delta.y).round().max(1.0);
            }
        }
    }

    /// Raster content, when the variant carries one.
    #[must_use]
    pub const fn raster(&self) -> Option<&ImageData> {
        match self {
            Self::Icon { data, .. } | Self::Paint { data, .. } => data.as_ref(),
            _ => None,
        }
    }
}

/// Plot a stroke segment into the paint raster, growing the extents box to
/// fit. The raster dimensions always match `size` afterwards.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn paint_stroke(
    position: &mut Point,
    size: &mut Point,
    data: &mut Option<ImageData>,
    from: Point,
    to: Point,
    color: Rgba,
) {
    let points = line_points(from, to);
    let (mut min_x, mut min_y) = (i32::MAX, i32::MAX);
    let (mut max_x, mut max_y) = (i32::MIN, i32::MIN);
    for (x, y) in &points {
        min_x = min_x.min(*x);
        min_y = min_y.min(*y);
        max_x = max_x.max(*x);
        max_y = max_y.max(*y);
    }
    let (old_x, old_y) = (position.x.round() as i32, position.y.round() as i32);
    if let Some(existing) = data.as_ref() {
        min_x = min_x.min(old_x);
        min_y = min_y.min(old_y);
        max_x = max_x.max(old_x + existing.width as i32 - 1);
        max_y = max_y.max(old_y + existing.height as i32 - 1);
    }
    let new_w = (max_x - min_x + 1) as u32;
    let new_h = (max_y - min_y + 1) as u32;
    let mut grown = ImageData::new(new_w, new_h);
    if let Some(existing) = data.as_ref() {
        grown.blit((old_x - min_x) as u32, (old_y - min_y) as u32, existing);
    }
    for (x, y) in points {
        grown.set_pixel((x - min_x) as u32, (y - min_y) as u32, color);
    }
    *position = Point::new(min_x as f32, min_y as f32);
    *size = Point::new(new_w as f32, new_h as f32);
    *data = Some(grown);
}
