//! Direct property editing through named modifiers.
//!
//! Each layer exposes a set of [`ModifierDescriptor`]s describing which
//! properties an inspector can bind to. Platform capabilities filter the
//! set at enumeration time; a gated modifier is simply absent, and both
//! reads and writes against it fail with `UnknownModifier`. Numeric writes
//! accept JSON numbers or numeric strings and clamp to the property's
//! minimum instead of erroring.

use serde_json::Value;

use crate::color::parse_color;
use crate::error::{EditorError, EditorResult};
use crate::features::PlatformFeatures;
use crate::font::FontRegistry;

use super::{Layer, LayerKind, LayerState};

/// Input widget class a modifier binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKind {
    /// Numeric field.
    Number,
    /// Free-form text field.
    Text,
    /// Boolean toggle.
    Flag,
    /// Choice from the registered font faces.
    Font,
    /// Color string field.
    Color,
}

/// One directly editable property of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierDescriptor {
    /// Property name as used over the wire and in the inspector.
    pub name: &'static str,
    /// How the value is entered and validated.
    pub kind: ModifierKind,
}

impl ModifierDescriptor {
    const fn new(name: &'static str, kind: ModifierKind) -> Self {
        Self { name, kind }
    }
}

impl Layer {
    /// Enumerate the modifiers applicable to this layer on the given
    /// platform. Capabilities the platform lacks remove entries here; the
    /// returned set is what `modifier_value` and `set_modifier` accept.
    #[must_use]
    pub fn modifiers(&self, features: &PlatformFeatures) -> Vec<ModifierDescriptor> {
        let mut list = vec![
            ModifierDescriptor::new("x", ModifierKind::Number),
            ModifierDescriptor::new("y", ModifierKind::Number),
        ];
        if features.has_rgb_support {
            list.push(ModifierDescriptor::new("color", ModifierKind::Color));
        }
        match &self.kind {
            LayerKind::Text { .. } => {
                list.push(ModifierDescriptor::new("text", ModifierKind::Text));
                list.push(ModifierDescriptor::new("font", ModifierKind::Font));
                if features.has_custom_font_size {
                    list.push(ModifierDescriptor::new("fontSize", ModifierKind::Number));
                }
            }
            LayerKind::Dot { .. } | LayerKind::Icon { .. } | LayerKind::Paint { .. } => {}
            LayerKind::Line { .. } => {
                list.push(ModifierDescriptor::new("x2", ModifierKind::Number));
                list.push(ModifierDescriptor::new("y2", ModifierKind::Number));
            }
            LayerKind::Rect { .. } => {
                list.push(ModifierDescriptor::new("w", ModifierKind::Number));
                list.push(ModifierDescriptor::new("h", ModifierKind::Number));
                list.push(ModifierDescriptor::new("fill", ModifierKind::Flag));
            }
            LayerKind::Circle { .. } => {
                list.push(ModifierDescriptor::new("radius", ModifierKind::Number));
                list.push(ModifierDescriptor::new("fill", ModifierKind::Flag));
            }
            LayerKind::Ellipse { .. } => {
                list.push(ModifierDescriptor::new("radiusX", ModifierKind::Number));
                list.push(ModifierDescriptor::new("radiusY", ModifierKind::Number));
                list.push(ModifierDescriptor::new("fill", ModifierKind::Flag));
            }
        }
        list
    }

    /// Read the current value of a modifier.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownModifier`] when the name is not in the
    /// enumerated set for this layer and platform.
    pub fn modifier_value(
        &self,
        features: &PlatformFeatures,
        name: &str,
    ) -> EditorResult<Value> {
        self.descriptor(features, name)?;
        let value = match (name, &self.kind) {
            ("x", LayerKind::Line { start, .. }) => Value::from(start.x),
            ("y", LayerKind::Line { start, .. }) => Value::from(start.y),
            ("x", kind) => Value::from(kind.anchor().x),
            ("y", kind) => Value::from(kind.anchor().y),
            ("color", _) => Value::String(self.color.clone()),
            ("text", LayerKind::Text { text, .. }) => Value::String(text.clone()),
            ("font", LayerKind::Text { font, .. }) => Value::String(font.clone()),
            ("fontSize", LayerKind::Text { scale, .. }) => Value::from(*scale),
            ("x2", LayerKind::Line { end, .. }) => Value::from(end.x),
            ("y2", LayerKind::Line { end, .. }) => Value::from(end.y),
            ("w", LayerKind::Rect { size, .. }) => Value::from(size.x),
            ("h", LayerKind::Rect { size, .. }) => Value::from(size.y),
            (
                "fill",
                LayerKind::Rect { fill, .. }
                | LayerKind::Circle { fill, .. }
                | LayerKind::Ellipse { fill, .. },
            ) => Value::Bool(*fill),
            ("radius", LayerKind::Circle { radius, .. }) => Value::from(*radius),
            ("radiusX", LayerKind::Ellipse { radius_x, .. }) => Value::from(*radius_x),
            ("radiusY", LayerKind::Ellipse { radius_y, .. }) => Value::from(*radius_y),
            _ => return Err(self.unknown_modifier(name)),
        };
        Ok(value)
    }

    /// Validate and apply a modifier value, recompute bounds, and return
    /// the saved state for persistence. History is not touched here.
    ///
    /// Numeric geometry floors at 1 device unit where a smaller value would
    /// degenerate the layer (sizes, radii, font scale); positions are
    /// unclamped.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownModifier`] for names outside the
    /// enumerated set, [`EditorError::InvalidModifierValue`] for values of
    /// the wrong shape, [`EditorError::UnknownFont`] for an unregistered
    /// face, and [`EditorError::InvalidColor`] for an unparseable color.
    pub fn set_modifier(
        &mut self,
        features: &PlatformFeatures,
        name: &str,
        value: &Value,
        fonts: &FontRegistry,
    ) -> EditorResult<LayerState> {
        let descriptor = self.descriptor(features, name)?;
        match descriptor.kind {
            ModifierKind::Number => {
                let number = number_value(name, value)?;
                self.apply_number(name, number)?;
            }
            ModifierKind::Text => {
                let text = string_value(name, value)?;
                if let LayerKind::Text { text: field, .. } = &mut self.kind {
                    *field = text;
                }
            }
            ModifierKind::Flag => {
                let flag = flag_value(name, value)?;
                if let LayerKind::Rect { fill, .. }
                | LayerKind::Circle { fill, .. }
                | LayerKind::Ellipse { fill, .. } = &mut self.kind
                {
                    *fill = flag;
                }
            }
            ModifierKind::Font => {
                let face = string_value(name, value)?;
                if !fonts.contains(&face) {
                    return Err(EditorError::UnknownFont(face));
                }
                if let LayerKind::Text { font, .. } = &mut self.kind {
                    *font = face;
                }
            }
            ModifierKind::Color => {
                let color = string_value(name, value)?;
                parse_color(&color)?;
                self.color = color;
            }
        }
        self.update_bounds(fonts)?;
        Ok(self.save_state())
    }

    fn descriptor(
        &self,
        features: &PlatformFeatures,
        name: &str,
    ) -> EditorResult<ModifierDescriptor> {
        self.modifiers(features)
            .into_iter()
            .find(|m| m.name == name)
            .ok_or_else(|| self.unknown_modifier(name))
    }

    fn unknown_modifier(&self, name: &str) -> EditorError {
        EditorError::UnknownModifier {
            name: name.to_string(),
            kind: self.kind.layer_type().tag(),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Scale is clamped non-negative first
    fn apply_number(&mut self, name: &str, number: f32) -> EditorResult<()> {
        let rounded = number.round();
        match (name, &mut self.kind) {
            ("x", LayerKind::Line { start, .. }) => start.x = rounded,
            ("y", LayerKind::Line { start, .. }) => start.y = rounded,
            ("x", kind) => {
                let mut anchor = kind.anchor();
                anchor.x = rounded;
                kind.set_anchor(anchor);
            }
            ("y", kind) => {
                let mut anchor = kind.anchor();
                anchor.y = rounded;
                kind.set_anchor(anchor);
            }
            ("x2", LayerKind::Line { end, .. }) => end.x = rounded,
            ("y2", LayerKind::Line { end, .. }) => end.y = rounded,
            ("w", LayerKind::Rect { size, .. }) => size.x = rounded.max(1.0),
            ("h", LayerKind::Rect { size, .. }) => size.y = rounded.max(1.0),
            ("radius", LayerKind::Circle { radius, .. }) => *radius = rounded.max(1.0),
            ("radiusX", LayerKind::Ellipse { radius_x, .. }) => *radius_x = rounded.max(1.0),
            ("radiusY", LayerKind::Ellipse { radius_y, .. }) => *radius_y = rounded.max(1.0),
            ("fontSize", LayerKind::Text { scale, .. }) => *scale = rounded.max(1.0) as u32,
            _ => return Err(self.unknown_modifier(name)),
        }
        Ok(())
    }
}

fn number_value(name: &str, value: &Value) -> EditorResult<f32> {
    #[allow(clippy::cast_possible_truncation)] // Device coordinates are far below f32 limits
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(EditorError::InvalidModifierValue {
            name: name.to_string(),
            reason: format!("expected a number, got {value}"),
        }),
    }
}

fn string_value(name: &str, value: &Value) -> EditorResult<String> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| EditorError::InvalidModifierValue {
            name: name.to_string(),
            reason: format!("expected a string, got {value}"),
        })
}

fn flag_value(name: &str, value: &Value) -> EditorResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| EditorError::InvalidModifierValue {
            name: name.to_string(),
            reason: format!("expected a boolean, got {value}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layer::LayerType;
    use serde_json::json;

    fn text_layer(features: &PlatformFeatures) -> (Layer, FontRegistry) {
        let fonts = FontRegistry::default();
        let layer = Layer::new(LayerType::Text, features, &fonts).expect("layer");
        (layer, fonts)
    }

    #[test]
    fn test_font_size_clamps_non_positive_input() {
        let features = PlatformFeatures::rgb();
        let (mut layer, fonts) = text_layer(&features);
        for raw in [json!("0"), json!("-5"), json!(0), json!(-2.4)] {
            layer
                .set_modifier(&features, "fontSize", &raw, &fonts)
                .expect("set");
            assert_eq!(
                layer.modifier_value(&features, "fontSize").expect("get"),
                json!(1),
                "input {raw}"
            );
        }
    }

    #[test]
    fn test_monochrome_platform_has_no_color_modifier() {
        let features = PlatformFeatures::monochrome();
        let (mut layer, fonts) = text_layer(&features);
        assert!(layer
            .modifiers(&features)
            .iter()
            .all(|m| m.name != "color"));
        let err = layer
            .set_modifier(&features, "color", &json!("#FF0000"), &fonts)
            .expect_err("gated");
        assert!(matches!(err, EditorError::UnknownModifier { .. }));
    }

    #[test]
    fn test_position_accepts_numeric_string() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let mut layer = Layer::new(LayerType::Dot, &features, &fonts).expect("layer");
        layer
            .set_modifier(&features, "x", &json!("12"), &fonts)
            .expect("set x");
        layer
            .set_modifier(&features, "y", &json!(7.4), &fonts)
            .expect("set y");
        assert_eq!(layer.position(), Point::new(12.0, 7.0));
    }

    #[test]
    fn test_fill_flag_lands_in_saved_state() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let mut layer = Layer::new(LayerType::Rect, &features, &fonts).expect("layer");
        let state = layer
            .set_modifier(&features, "fill", &json!(true), &fonts)
            .expect("set");
        assert_eq!(state.fill, Some(true));
        assert_eq!(
            layer.modifier_value(&features, "fill").expect("get"),
            json!(true)
        );
    }

    #[test]
    fn test_fill_rejects_non_boolean() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let mut layer = Layer::new(LayerType::Rect, &features, &fonts).expect("layer");
        let err = layer
            .set_modifier(&features, "fill", &json!("yes"), &fonts)
            .expect_err("shape");
        assert!(matches!(err, EditorError::InvalidModifierValue { .. }));
    }

    #[test]
    fn test_unknown_font_is_rejected() {
        let features = PlatformFeatures::rgb();
        let (mut layer, fonts) = text_layer(&features);
        let err = layer
            .set_modifier(&features, "font", &json!("nonexistent"), &fonts)
            .expect_err("font");
        assert!(matches!(err, EditorError::UnknownFont(name) if name == "nonexistent"));
    }

    #[test]
    fn test_radius_floors_at_one() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let mut layer = Layer::new(LayerType::Circle, &features, &fonts).expect("layer");
        layer
            .set_modifier(&features, "radius", &json!(-3), &fonts)
            .expect("set");
        assert_eq!(
            layer.modifier_value(&features, "radius").expect("get"),
            json!(1.0)
        );
    }

    #[test]
    fn test_text_change_widens_bounds() {
        let features = PlatformFeatures::rgb();
        let (mut layer, fonts) = text_layer(&features);
        let before = layer.bounds().w;
        layer
            .set_modifier(&features, "text", &json!("A much longer line"), &fonts)
            .expect("set");
        assert!(layer.bounds().w > before);
    }

    #[test]
    fn test_line_endpoint_modifier_leaves_start_alone() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let mut layer = Layer::new(LayerType::Line, &features, &fonts).expect("layer");
        layer
            .set_modifier(&features, "x", &json!(4), &fonts)
            .expect("set x");
        layer
            .set_modifier(&features, "y", &json!(5), &fonts)
            .expect("set y");
        layer
            .set_modifier(&features, "x2", &json!(30), &fonts)
            .expect("set x2");
        assert_eq!(
            layer.modifier_value(&features, "x").expect("x"),
            json!(4.0)
        );
        assert_eq!(
            layer.modifier_value(&features, "x2").expect("x2"),
            json!(30.0)
        );
    }

    #[test]
    fn test_unknown_modifier_names_layer_kind() {
        let features = PlatformFeatures::rgb();
        let fonts = FontRegistry::default();
        let layer = Layer::new(LayerType::Dot, &features, &fonts).expect("layer");
        let err = layer
            .modifier_value(&features, "volume")
            .expect_err("unknown");
        assert!(matches!(
            err,
            EditorError::UnknownModifier { name, kind } if name == "volume" && kind == "dot"
        ));
    }
}
