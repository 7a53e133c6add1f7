//! Persisted layer snapshots.
//!
//! A [`LayerState`] is the plain-data projection of a layer that history and
//! project files store. Field names are single short codes, stable across
//! versions; every variant writes the common keys and whichever variant keys
//! apply. Bounds and edit mode are derived at load time and never persisted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};
use crate::geometry::Point;
use crate::surface::ImageData;

/// One serialized layer snapshot, keyed by short field codes.
///
/// Common keys: `t` type tag, `u` uid, `n` name, `i` z-index, `g` group,
/// `c` color, `p` position pair. Variant keys: `s` size pair, `e` line end
/// pair, `r` circle radius, `rx`/`ry` ellipse radii, `fl` fill flag,
/// `f` font name, `z` text scale factor, `d` content (text string, or
/// base64 RGBA for raster layers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerState {
    /// Type tag (`"string"`, `"dot"`, `"line"`, `"rect"`, `"circle"`,
    /// `"ellipse"`, `"icon"`, `"paint"`).
    #[serde(rename = "t")]
    pub kind: String,
    /// Stable layer identity.
    #[serde(rename = "u")]
    pub uid: Uuid,
    /// Display name.
    #[serde(rename = "n")]
    pub name: String,
    /// Z-order index.
    #[serde(rename = "i")]
    pub index: u32,
    /// Optional logical group id.
    #[serde(rename = "g", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Color string as the user entered it.
    #[serde(rename = "c")]
    pub color: String,
    /// Anchor position pair.
    #[serde(rename = "p")]
    pub position: [f32; 2],
    /// Size pair (rect and raster layers).
    #[serde(rename = "s", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 2]>,
    /// Second endpoint pair (line layers).
    #[serde(rename = "e", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<[f32; 2]>,
    /// Radius (circle layers).
    #[serde(rename = "r", default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    /// Horizontal radius (ellipse layers).
    #[serde(rename = "rx", default, skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f32>,
    /// Vertical radius (ellipse layers).
    #[serde(rename = "ry", default, skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f32>,
    /// Filled rather than stroked (rect, circle, ellipse).
    #[serde(rename = "fl", default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    /// Font name (text layers).
    #[serde(rename = "f", default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Glyph scale factor (text layers).
    #[serde(rename = "z", default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Variant content: the text string, or base64 RGBA raster bytes.
    #[serde(rename = "d", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl LayerState {
    /// A snapshot carrying only the common fields; variant fields start
    /// empty and are filled in by the owning layer's `save_state`.
    #[must_use]
    pub fn common(
        kind: &str,
        uid: Uuid,
        name: &str,
        index: u32,
        group: Option<&str>,
        color: &str,
        position: Point,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            uid,
            name: name.to_string(),
            index,
            group: group.map(ToString::to_string),
            color: color.to_string(),
            position: position.xy(),
            size: None,
            end: None,
            radius: None,
            radius_x: None,
            radius_y: None,
            fill: None,
            font: None,
            scale: None,
            data: None,
        }
    }

    /// Anchor position as a [`Point`].
    #[must_use]
    pub fn position_point(&self) -> Point {
        Point::from(self.position)
    }
}

/// Unwrap a variant field that the given layer kind requires.
pub(crate) fn require<T>(field: Option<T>, kind: &str, code: &str) -> EditorResult<T> {
    field.ok_or_else(|| EditorError::MalformedState(format!("{kind} layer is missing `{code}`")))
}

/// Encode raster bytes for the `d` field.
#[must_use]
pub(crate) fn encode_raster(data: &ImageData) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(&data.rgba)
}

/// Decode a `d` field back into raster data of the given dimensions.
pub(crate) fn decode_raster(encoded: &str, width: u32, height: u32) -> EditorResult<ImageData> {
    use base64::Engine;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| EditorError::MalformedState(format!("undecodable raster data: {e}")))?;
    ImageData::from_rgba(width, height, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_codes_on_the_wire() {
        let state = LayerState::common(
            "dot",
            Uuid::new_v4(),
            "Dot",
            3,
            None,
            "#FFFFFF",
            Point::new(4.0, 5.0),
        );
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["t"], "dot");
        assert_eq!(json["n"], "Dot");
        assert_eq!(json["i"], 3);
        assert_eq!(json["p"][0], 4.0);
        // Unused variant fields never appear.
        assert!(json.get("s").is_none());
        assert!(json.get("g").is_none());
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut state = LayerState::common(
            "rect",
            Uuid::new_v4(),
            "Rect",
            0,
            Some("hud"),
            "#FF0000",
            Point::new(1.0, 2.0),
        );
        state.size = Some([10.0, 6.0]);
        state.fill = Some(true);
        let text = serde_json::to_string(&state).expect("serialize");
        let back: LayerState = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, state);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let json = r##"{"t":"dot","u":"6a0f39c2-2d38-4b2a-9a3b-5e8c6d9f1a2b","n":"Dot","i":0,"c":"#FFFFFF","p":[1.0,2.0],"future":"field"}"##;
        let state: LayerState = serde_json::from_str(json).expect("deserialize");
        assert_eq!(state.kind, "dot");
    }

    #[test]
    fn test_raster_codec_round_trip() {
        let mut data = ImageData::new(3, 2);
        data.set_pixel(1, 1, crate::color::Rgba::WHITE);
        let encoded = encode_raster(&data);
        let decoded = decode_raster(&encoded, 3, 2).expect("decode");
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_raster_codec_rejects_bad_input() {
        assert!(matches!(
            decode_raster("not base64!!!", 2, 2),
            Err(EditorError::MalformedState(_))
        ));
        // Valid base64, wrong length for the dimensions.
        let short = {
            use base64::Engine;
            base64::engine::general_purpose::STANDARD.encode([0u8; 4])
        };
        assert!(matches!(
            decode_raster(&short, 2, 2),
            Err(EditorError::MalformedState(_))
        ));
    }

    #[test]
    fn test_require_reports_kind_and_code() {
        let err = require::<f32>(None, "rect", "s").expect_err("must fail");
        let message = err.to_string();
        assert!(message.contains("rect"));
        assert!(message.contains('s'));
    }
}
