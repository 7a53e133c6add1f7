//! Integration tests for source generation (dotforge-codegen).
//!
//! Builds live editing sessions and checks the emitted source across
//! platforms: statement content, declaration dedup, and frame output.

use dotforge_codegen::{platform_by_id, AdafruitGfxPlatform, Platform, Uint32RawPlatform};
use dotforge_core::{EditorSession, ImageData, Layer, LayerType, PlatformFeatures, Point, Rgba};
use serde_json::json;
use uuid::Uuid;

fn rgb_session(w: f32, h: f32) -> EditorSession {
    EditorSession::new(Point::new(w, h), PlatformFeatures::rgb())
}

fn add(session: &mut EditorSession, ty: LayerType) -> Uuid {
    let layer = Layer::new(ty, session.features(), session.fonts()).expect("layer");
    session.add_layer(layer)
}

/// A 3x2 raster with two lit pixels.
fn sprite() -> ImageData {
    let mut image = ImageData::new(3, 2);
    image.set_pixel(0, 0, Rgba::WHITE);
    image.set_pixel(2, 1, Rgba::WHITE);
    image
}

#[test]
fn test_mixed_scene_assembles_declarations_before_code() {
    let mut session = rgb_session(64.0, 32.0);
    let icon = add(&mut session, LayerType::Icon);
    session.set_layer_raster(icon, sprite()).expect("raster");
    let dot = add(&mut session, LayerType::Dot);
    session.set_layer_modifier(dot, "x", &json!(5)).expect("x");

    let platform = AdafruitGfxPlatform::new();
    let source = platform.generate(&session).expect("generate").assemble();

    let declaration_at = source
        .find("static const unsigned char PROGMEM")
        .expect("declaration");
    let statement_at = source.find("display.drawBitmap").expect("statement");
    assert!(declaration_at < statement_at);
    assert!(source.contains("display.drawPixel(5, 0, 0xffff);"));
}

#[test]
fn test_identical_rasters_share_one_declaration() {
    let mut session = rgb_session(64.0, 32.0);
    let first = add(&mut session, LayerType::Icon);
    let second = add(&mut session, LayerType::Icon);
    session.set_layer_raster(first, sprite()).expect("raster");
    session.set_layer_raster(second, sprite()).expect("raster");
    session
        .set_layer_modifier(second, "x", &json!(20))
        .expect("x");

    let buffer = AdafruitGfxPlatform::new()
        .generate(&session)
        .expect("generate");
    assert_eq!(buffer.declarations().len(), 1);
    let statements: Vec<&String> = buffer
        .code()
        .iter()
        .filter(|line| line.contains("drawBitmap"))
        .collect();
    assert_eq!(statements.len(), 2);

    // Both statements reference the single shared identifier.
    let identifier = buffer.declarations()[0]
        .split_whitespace()
        .find(|word| word.starts_with("image_"))
        .expect("identifier")
        .trim_end_matches("[]");
    assert!(identifier.ends_with("_bits"), "{identifier}");
    assert!(statements.iter().all(|s| s.contains(identifier)));
}

#[test]
fn test_different_rasters_keep_their_own_declarations() {
    let mut session = rgb_session(64.0, 32.0);
    let first = add(&mut session, LayerType::Icon);
    let second = add(&mut session, LayerType::Icon);
    session.set_layer_raster(first, sprite()).expect("raster");
    let mut other = sprite();
    other.set_pixel(1, 0, Rgba::WHITE);
    session.set_layer_raster(second, other).expect("raster");

    let buffer = AdafruitGfxPlatform::new()
        .generate(&session)
        .expect("generate");
    assert_eq!(buffer.declarations().len(), 2);
    assert_ne!(buffer.declarations()[0], buffer.declarations()[1]);
}

#[test]
fn test_uint32_platform_ignores_layers_and_sizes_the_frame() {
    let mut session = rgb_session(8.0, 4.0);
    add(&mut session, LayerType::Rect);

    let buffer = Uint32RawPlatform::new()
        .generate(&session)
        .expect("generate");
    assert!(buffer.code().is_empty());
    assert_eq!(buffer.declarations().len(), 1);
    assert!(buffer.declarations()[0].starts_with("const uint32_t image_frame[32] = {"));
    assert_eq!(buffer.declarations()[0].matches("0x").count(), 32);
}

#[test]
fn test_registry_resolves_and_generates() {
    let session = rgb_session(2.0, 2.0);
    let platform = platform_by_id("uint32").expect("platform");
    let buffer = platform.generate(&session).expect("generate");
    assert_eq!(buffer.declarations().len(), 1);

    let err = match platform_by_id("commodore64") {
        Err(err) => err,
        Ok(_) => panic!("Expected unknown platform error"),
    };
    assert_eq!(err.to_string(), "Unknown platform: commodore64");
}
