//! Statement generation for the Adafruit GFX C++ API.

use dotforge_core::{parse_color, Layer, LayerKind, PlatformFeatures, Rgba};

use crate::bitmap;
use crate::error::CodegenResult;
use crate::source::SourceBuffer;

use super::Platform;

/// Generator targeting Adafruit GFX displays.
///
/// Positions round to whole pixels and colors pack to RGB565. Raster
/// layers become `PROGMEM` bitmap declarations plus a `drawBitmap` call;
/// identical pixel content shares one declaration. GFX has no ellipse
/// primitive, so ellipse layers emit nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdafruitGfxPlatform;

impl AdafruitGfxPlatform {
    /// Create the platform.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn color_of(layer: &Layer) -> u16 {
        bitmap::rgb565(parse_color(layer.color()).unwrap_or(Rgba::WHITE))
    }
}

impl Platform for AdafruitGfxPlatform {
    fn id(&self) -> &'static str {
        "adafruit_gfx"
    }

    fn display_name(&self) -> &'static str {
        "Adafruit GFX"
    }

    fn features(&self) -> PlatformFeatures {
        PlatformFeatures::rgb()
    }

    #[allow(clippy::cast_possible_truncation)] // Device coordinates are far below i32 limits
    fn generate_layer(&self, layer: &Layer, buffer: &mut SourceBuffer) -> CodegenResult<()> {
        let color = Self::color_of(layer);
        let at = layer.position().round();
        let (x, y) = (at.x as i32, at.y as i32);
        match layer.kind() {
            LayerKind::Dot { .. } => {
                buffer.push_code(format!("display.drawPixel({x}, {y}, 0x{color:04x});"));
            }
            LayerKind::Line { start, end } => {
                let (a, b) = (start.round(), end.round());
                buffer.push_code(format!(
                    "display.drawLine({}, {}, {}, {}, 0x{color:04x});",
                    a.x as i32, a.y as i32, b.x as i32, b.y as i32
                ));
            }
            LayerKind::Rect { size, fill, .. } => {
                let verb = if *fill { "fillRect" } else { "drawRect" };
                let s = size.round();
                buffer.push_code(format!(
                    "display.{verb}({x}, {y}, {}, {}, 0x{color:04x});",
                    s.x as i32, s.y as i32
                ));
            }
            LayerKind::Circle { radius, fill, .. } => {
                let verb = if *fill { "fillCircle" } else { "drawCircle" };
                let r = radius.round() as i32;
                buffer.push_code(format!(
                    "display.{verb}({}, {}, {r}, 0x{color:04x});",
                    x + r,
                    y + r
                ));
            }
            LayerKind::Ellipse { .. } => {
                // GFX has no ellipse primitive.
            }
            LayerKind::Text { text, scale, .. } => {
                let top = layer.bounds().round();
                buffer.push_code(format!("display.setTextColor(0x{color:04x});"));
                buffer.push_code(format!("display.setTextSize({scale});"));
                buffer.push_code(format!(
                    "display.setCursor({}, {});",
                    top.x as i32, top.y as i32
                ));
                buffer.push_code("display.setTextWrap(false);");
                buffer.push_code(format!(
                    "display.print(\"{}\");",
                    bitmap::escape_c_string(text)
                ));
            }
            LayerKind::Icon { size, data, .. } | LayerKind::Paint { size, data, .. } => {
                let Some(image) = data else {
                    tracing::debug!("Skipping raster layer {} with no image data", layer.uid());
                    return Ok(());
                };
                let name = bitmap::image_identifier(image);
                let packed = bitmap::pack_msb_bitmap(image);
                buffer.push_declaration(format!(
                    "static const unsigned char PROGMEM {name}[] = {{ {} }};",
                    bitmap::bytes_to_c_array(&packed)
                ));
                let s = size.round();
                buffer.push_code(format!(
                    "display.drawBitmap({x}, {y}, {name}, {}, {}, 0x{color:04x});",
                    s.x as i32, s.y as i32
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotforge_core::{EditorSession, LayerType, Point};
    use serde_json::json;
    use uuid::Uuid;

    fn session() -> EditorSession {
        EditorSession::new(Point::new(128.0, 64.0), PlatformFeatures::rgb())
    }

    fn add(session: &mut EditorSession, ty: LayerType) -> Uuid {
        let layer = Layer::new(ty, session.features(), session.fonts()).expect("layer");
        session.add_layer(layer)
    }

    #[test]
    fn test_rect_statement() {
        let mut session = session();
        let uid = add(&mut session, LayerType::Rect);
        session
            .set_layer_modifier(uid, "x", &json!(3))
            .expect("x");
        session
            .set_layer_modifier(uid, "y", &json!(4))
            .expect("y");
        session
            .set_layer_modifier(uid, "w", &json!(10))
            .expect("w");
        session
            .set_layer_modifier(uid, "h", &json!(5))
            .expect("h");
        session
            .set_layer_modifier(uid, "fill", &json!(true))
            .expect("fill");
        session
            .set_layer_modifier(uid, "color", &json!("#ff0000"))
            .expect("color");

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        assert_eq!(buffer.code(), ["display.fillRect(3, 4, 10, 5, 0xf800);"]);
        assert!(buffer.declarations().is_empty());
    }

    #[test]
    fn test_circle_centers_on_bounding_square() {
        let mut session = session();
        let uid = add(&mut session, LayerType::Circle);
        session
            .set_layer_modifier(uid, "x", &json!(10))
            .expect("x");
        session
            .set_layer_modifier(uid, "y", &json!(20))
            .expect("y");
        session
            .set_layer_modifier(uid, "radius", &json!(4))
            .expect("radius");

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        assert_eq!(buffer.code(), ["display.drawCircle(14, 24, 4, 0xffff);"]);
    }

    #[test]
    fn test_text_block_escapes_content() {
        let mut session = session();
        let uid = add(&mut session, LayerType::Text);
        session
            .set_layer_modifier(uid, "x", &json!(2))
            .expect("x");
        session
            .set_layer_modifier(uid, "y", &json!(20))
            .expect("y");
        session
            .set_layer_modifier(uid, "text", &json!("say \"hi\""))
            .expect("text");

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        let code = buffer.code();
        assert_eq!(code[0], "display.setTextColor(0xffff);");
        assert_eq!(code[1], "display.setTextSize(1);");
        assert_eq!(code[2], "display.setCursor(2, 13);");
        assert_eq!(code[3], "display.setTextWrap(false);");
        assert_eq!(code[4], "display.print(\"say \\\"hi\\\"\");");
    }

    #[test]
    fn test_ellipse_emits_nothing() {
        let mut session = session();
        add(&mut session, LayerType::Ellipse);

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_icon_without_data_is_skipped() {
        let mut session = session();
        add(&mut session, LayerType::Icon);

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_statements_follow_z_order() {
        let mut session = session();
        let below = add(&mut session, LayerType::Dot);
        let above = add(&mut session, LayerType::Dot);
        session
            .set_layer_modifier(above, "x", &json!(9))
            .expect("x");
        session
            .set_layer_modifier(below, "x", &json!(1))
            .expect("x");

        let buffer = AdafruitGfxPlatform::new()
            .generate(&session)
            .expect("generate");
        assert_eq!(
            buffer.code(),
            [
                "display.drawPixel(1, 0, 0xffff);",
                "display.drawPixel(9, 0, 0xffff);"
            ]
        );
    }
}
