//! Selection and hover outlines drawn above the composited frame.
//!
//! Read-only over the layer list: computing outlines mutates nothing, so
//! the overlay can run on every frame or pointer move. Rects come back in
//! screen space, scaled by the current zoom and snapped by half a pixel so
//! a 1px stroke lands crisply on the pixel grid.

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::layer::Layer;
use crate::surface::Surface;

/// Dash length of the selected outline, in screen pixels.
const DASH: u32 = 5;

/// Visual style of one outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineStyle {
    /// Dashed box around a selected layer.
    Selected,
    /// Lighter solid box around the hovered, unselected layer.
    Hover,
}

impl OutlineStyle {
    const fn color(self) -> Rgba {
        match self {
            Self::Selected => Rgba([255, 255, 255, 230]),
            Self::Hover => Rgba([255, 255, 255, 128]),
        }
    }
}

/// One outline to stroke, in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    /// Box to stroke.
    pub rect: Rect,
    /// How to stroke it.
    pub style: OutlineStyle,
}

/// Compute the outlines for the current frame.
///
/// Every selected layer gets a dashed outline. When `pointer` (screen
/// space) is supplied, it is mapped to the nearest model pixel and the
/// topmost unselected layer under it gets a hover outline; a layer that is
/// both selected and hovered shows only the selected style. Callers pass
/// `None` while a modifier tool is active, which suppresses hover entirely.
#[must_use]
pub fn selection_outlines(layers: &[Layer], scale: f32, pointer: Option<Point>) -> Vec<Outline> {
    let mut outlines: Vec<Outline> = layers
        .iter()
        .filter(|l| l.selected())
        .map(|l| Outline {
            rect: snap(l.bounds(), scale),
            style: OutlineStyle::Selected,
        })
        .collect();
    if let Some(pointer) = pointer {
        let model = pointer.divide(scale).round();
        let hovered = layers
            .iter()
            .filter(|l| !l.selected() && l.contains(model))
            .max_by_key(|l| l.index());
        if let Some(layer) = hovered {
            outlines.push(Outline {
                rect: snap(layer.bounds(), scale),
                style: OutlineStyle::Hover,
            });
        }
    }
    outlines
}

/// Stroke the outlines onto a screen-space surface.
pub fn paint_outlines(surface: &mut Surface, outlines: &[Outline]) {
    for outline in outlines {
        let color = outline.style.color();
        match outline.style {
            OutlineStyle::Selected => surface.dashed_stroke_rect(outline.rect, DASH, color),
            OutlineStyle::Hover => surface.stroke_rect(outline.rect, color),
        }
    }
}

/// Scale model bounds to screen space and snap for a crisp 1px stroke.
fn snap(bounds: Rect, scale: f32) -> Rect {
    bounds.multiply(scale).round().adjust(-0.5, -0.5, 1.0, 1.0)
}
