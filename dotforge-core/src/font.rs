//! Font abstraction and the built-in 5x7 bitmap face.
//!
//! Text layers never rasterize glyphs themselves; they measure and draw
//! through a [`Font`] looked up by name in the [`FontRegistry`]. The built-in
//! face is the classic 5x7 monospaced ASCII font found on small OLED and LCD
//! modules, drawn at integer scale factors with a one-column inter-glyph gap.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::{EditorError, EditorResult};
use crate::geometry::{Point, Rect};
use crate::surface::Surface;

/// Name of the built-in 5x7 face present in every default registry.
pub const BUILTIN_FONT: &str = "adafruit5x7";

/// A monospaced bitmap font usable by text layers.
pub trait Font: Send + Sync {
    /// Registry name of the face.
    fn name(&self) -> &str;

    /// Size of the tight box around `text` at the given integer scale.
    ///
    /// The trailing inter-glyph gap is not counted, so a four character
    /// string at scale 1 in a 5x7 face measures 23x7.
    fn measure(&self, text: &str, scale: u32) -> Point;

    /// Draw `text` with its top-left corner at `anchor`.
    fn draw_text(&self, surface: &mut Surface, text: &str, anchor: Point, scale: u32, color: Rgba);
}

/// A face backed by a column-major glyph table.
///
/// Each glyph is `width` bytes, one byte per column, bit 0 the top row.
/// Characters outside the table render as a filled box.
pub struct BitmapFont {
    name: String,
    glyph_width: u32,
    glyph_height: u32,
    first_char: u8,
    glyphs: &'static [u8],
}

impl BitmapFont {
    /// The classic 5x7 ASCII face (printable range `0x20..=0x7E`).
    #[must_use]
    pub fn classic_5x7() -> Self {
        Self {
            name: BUILTIN_FONT.to_string(),
            glyph_width: 5,
            glyph_height: 7,
            first_char: 0x20,
            glyphs: CLASSIC_5X7,
        }
    }

    /// Column advance per glyph (glyph width plus the 1px gap).
    #[must_use]
    pub const fn advance(&self) -> u32 {
        self.glyph_width + 1
    }

    #[allow(clippy::cast_possible_truncation)] // Table length fits in u32
    fn glyph(&self, ch: char) -> Option<&[u8]> {
        let code = u32::from(ch);
        let first = u32::from(self.first_char);
        let count = self.glyphs.len() as u32 / self.glyph_width;
        if code < first || code >= first + count {
            return None;
        }
        let start = ((code - first) * self.glyph_width) as usize;
        Some(&self.glyphs[start..start + self.glyph_width as usize])
    }
}

impl Font for BitmapFont {
    fn name(&self) -> &str {
        &self.name
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn measure(&self, text: &str, scale: u32) -> Point {
        let scale = scale.max(1);
        let count = text.chars().count() as u32;
        if count == 0 {
            return Point::ZERO;
        }
        let width = (count * self.advance() - 1) * scale;
        Point::new(width as f32, (self.glyph_height * scale) as f32)
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn draw_text(&self, surface: &mut Surface, text: &str, anchor: Point, scale: u32, color: Rgba) {
        let scale = scale.max(1);
        let cell = scale as f32;
        for (slot, ch) in text.chars().enumerate() {
            let glyph_x = anchor.x + (slot as u32 * self.advance() * scale) as f32;
            match self.glyph(ch) {
                Some(columns) => {
                    for (col, bits) in columns.iter().enumerate() {
                        for row in 0..self.glyph_height {
                            if bits >> row & 1 == 1 {
                                let block = Point::new(
                                    glyph_x + col as f32 * cell,
                                    anchor.y + row as f32 * cell,
                                );
                                surface.fill_rect(Rect::new(block, Point::new(cell, cell)), color);
                            }
                        }
                    }
                }
                None => {
                    // Tofu box for anything the table does not cover.
                    let size = Point::new(
                        (self.glyph_width * scale) as f32,
                        (self.glyph_height * scale) as f32,
                    );
                    surface.fill_rect(Rect::new(Point::new(glyph_x, anchor.y), size), color);
                }
            }
        }
    }
}

/// Named fonts available to a session, in registration order.
#[derive(Clone)]
pub struct FontRegistry {
    fonts: Vec<Arc<dyn Font>>,
}

impl FontRegistry {
    /// An empty registry.
    #[must_use]
    pub const fn empty() -> Self {
        Self { fonts: Vec::new() }
    }

    /// A registry holding only the built-in 5x7 face.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(BitmapFont::classic_5x7()));
        registry
    }

    /// Add a face. A face with a duplicate name replaces the earlier entry.
    pub fn register(&mut self, font: Arc<dyn Font>) {
        self.fonts.retain(|f| f.name() != font.name());
        self.fonts.push(font);
    }

    /// Look a face up by name.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownFont`] when no face has that name.
    pub fn get(&self, name: &str) -> EditorResult<Arc<dyn Font>> {
        self.fonts
            .iter()
            .find(|f| f.name() == name)
            .cloned()
            .ok_or_else(|| EditorError::UnknownFont(name.to_string()))
    }

    /// Whether a face with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fonts.iter().any(|f| f.name() == name)
    }

    /// Name of the face new text layers start with (the first registered).
    #[must_use]
    pub fn default_font_name(&self) -> Option<&str> {
        self.fonts.first().map(|f| f.name())
    }

    /// Registered face names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fonts.iter().map(|f| f.name()).collect()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for FontRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRegistry")
            .field("fonts", &self.names())
            .finish()
    }
}

/// Column-major glyph table for the classic 5x7 face, ASCII `0x20..=0x7E`.
/// Five bytes per glyph, bit 0 of each byte is the top row.
#[rustfmt::skip]
const CLASSIC_5X7: &[u8] = &[
    0x00, 0x00, 0x00, 0x00, 0x00, // ' '
    0x00, 0x00, 0x5F, 0x00, 0x00, // '!'
    0x00, 0x07, 0x00, 0x07, 0x00, // '"'
    0x14, 0x7F, 0x14, 0x7F, 0x14, // '#'
    0x24, 0x2A, 0x7F, 0x2A, 0x12, // '$'
    0x23, 0x13, 0x08, 0x64, 0x62, // '%'
    0x36, 0x49, 0x55, 0x22, 0x50, // '&'
    0x00, 0x05, 0x03, 0x00, 0x00, // '''
    0x00, 0x1C, 0x22, 0x41, 0x00, // '('
    0x00, 0x41, 0x22, 0x1C, 0x00, // ')'
    0x14, 0x08, 0x3E, 0x08, 0x14, // '*'
    0x08, 0x08, 0x3E, 0x08, 0x08, // '+'
    0x00, 0x50, 0x30, 0x00, 0x00, // ','
    0x08, 0x08, 0x08, 0x08, 0x08, // '-'
    0x00, 0x60, 0x60, 0x00, 0x00, // '.'
    0x20, 0x10, 0x08, 0x04, 0x02, // '/'
    0x3E, 0x51, 0x49, 0x45, 0x3E, // '0'
    0x00, 0x42, 0x7F, 0x40, 0x00, // '1'
    0x42, 0x61, 0x51, 0x49, 0x46, // '2'
    0x21, 0x41, 0x45, 0x4B, 0x31, // '3'
    0x18, 0x14, 0x12, 0x7F, 0x10, // '4'
    0x27, 0x45, 0x45, 0x45, 0x39, // '5'
    0x3C, 0x4A, 0x49, 0x49, 0x30, // '6'
    0x01, 0x71, 0x09, 0x05, 0x03, // '7'
    0x36, 0x49, 0x49, 0x49, 0x36, // '8'
    0x06, 0x49, 0x49, 0x29, 0x1E, // '9'
    0x00, 0x36, 0x36, 0x00, 0x00, // ':'
    0x00, 0x56, 0x36, 0x00, 0x00, // ';'
    0x08, 0x14, 0x22, 0x41, 0x00, // '<'
    0x14, 0x14, 0x14, 0x14, 0x14, // '='
    0x00, 0x41, 0x22, 0x14, 0x08, // '>'
    0x02, 0x01, 0x51, 0x09, 0x06, // '?'
    0x32, 0x49, 0x79, 0x41, 0x3E, // '@'
    0x7E, 0x11, 0x11, 0x11, 0x7E, // 'A'
    0x7F, 0x49, 0x49, 0x49, 0x36, // 'B'
    0x3E, 0x41, 0x41, 0x41, 0x22, // 'C'
    0x7F, 0x41, 0x41, 0x22, 0x1C, // 'D'
    0x7F, 0x49, 0x49, 0x49, 0x41, // 'E'
    0x7F, 0x09, 0x09, 0x09, 0x01, // 'F'
    0x3E, 0x41, 0x49, 0x49, 0x7A, // 'G'
    0x7F, 0x08, 0x08, 0x08, 0x7F, // 'H'
    0x00, 0x41, 0x7F, 0x41, 0x00, // 'I'
    0x20, 0x40, 0x41, 0x3F, 0x01, // 'J'
    0x7F, 0x08, 0x14, 0x22, 0x41, // 'K'
    0x7F, 0x40, 0x40, 0x40, 0x40, // 'L'
    0x7F, 0x02, 0x0C, 0x02, 0x7F, // 'M'
    0x7F, 0x04, 0x08, 0x10, 0x7F, // 'N'
    0x3E, 0x41, 0x41, 0x41, 0x3E, // 'O'
    0x7F, 0x09, 0x09, 0x09, 0x06, // 'P'
    0x3E, 0x41, 0x51, 0x21, 0x5E, // 'Q'
    0x7F, 0x09, 0x19, 0x29, 0x46, // 'R'
    0x46, 0x49, 0x49, 0x49, 0x31, // 'S'
    0x01, 0x01, 0x7F, 0x01, 0x01, // 'T'
    0x3F, 0x40, 0x40, 0x40, 0x3F, // 'U'
    0x1F, 0x20, 0x40, 0x20, 0x1F, // 'V'
    0x3F, 0x40, 0x38, 0x40, 0x3F, // 'W'
    0x63, 0x14, 0x08, 0x14, 0x63, // 'X'
    0x07, 0x08, 0x70, 0x08, 0x07, // 'Y'
    0x61, 0x51, 0x49, 0x45, 0x43, // 'Z'
    0x00, 0x7F, 0x41, 0x41, 0x00, // '['
    0x02, 0x04, 0x08, 0x10, 0x20, // '\'
    0x00, 0x41, 0x41, 0x7F, 0x00, // ']'
    0x04, 0x02, 0x01, 0x02, 0x04, // '^'
    0x40, 0x40, 0x40, 0x40, 0x40, // '_'
    0x00, 0x01, 0x02, 0x04, 0x00, // '`'
    0x20, 0x54, 0x54, 0x54, 0x78, // 'a'
    0x7F, 0x48, 0x44, 0x44, 0x38, // 'b'
    0x38, 0x44, 0x44, 0x44, 0x20, // 'c'
    0x38, 0x44, 0x44, 0x48, 0x7F, // 'd'
    0x38, 0x54, 0x54, 0x54, 0x18, // 'e'
    0x08, 0x7E, 0x09, 0x01, 0x02, // 'f'
    0x0C, 0x52, 0x52, 0x52, 0x3E, // 'g'
    0x7F, 0x08, 0x04, 0x04, 0x78, // 'h'
    0x00, 0x44, 0x7D, 0x40, 0x00, // 'i'
    0x20, 0x40, 0x44, 0x3D, 0x00, // 'j'
    0x7F, 0x10, 0x28, 0x44, 0x00, // 'k'
    0x00, 0x41, 0x7F, 0x40, 0x00, // 'l'
    0x7C, 0x04, 0x18, 0x04, 0x78, // 'm'
    0x7C, 0x08, 0x04, 0x04, 0x78, // 'n'
    0x38, 0x44, 0x44, 0x44, 0x38, // 'o'
    0x7C, 0x14, 0x14, 0x14, 0x08, // 'p'
    0x08, 0x14, 0x14, 0x18, 0x7C, // 'q'
    0x7C, 0x08, 0x04, 0x04, 0x08, // 'r'
    0x48, 0x54, 0x54, 0x54, 0x20, // 's'
    0x04, 0x3F, 0x44, 0x40, 0x20, // 't'
    0x3C, 0x40, 0x40, 0x20, 0x7C, // 'u'
    0x1C, 0x20, 0x40, 0x20, 0x1C, // 'v'
    0x3C, 0x40, 0x30, 0x40, 0x3C, // 'w'
    0x44, 0x28, 0x10, 0x28, 0x44, // 'x'
    0x0C, 0x50, 0x50, 0x50, 0x3C, // 'y'
    0x44, 0x64, 0x54, 0x4C, 0x44, // 'z'
    0x00, 0x08, 0x36, 0x41, 0x00, // '{'
    0x00, 0x00, 0x7F, 0x00, 0x00, // '|'
    0x00, 0x41, 0x36, 0x08, 0x00, // '}'
    0x08, 0x04, 0x08, 0x10, 0x08, // '~'
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_tight_box() {
        let font = BitmapFont::classic_5x7();
        assert_eq!(font.measure("Text", 1), Point::new(23.0, 7.0));
        assert_eq!(font.measure("Text", 2), Point::new(46.0, 14.0));
        assert_eq!(font.measure("", 3), Point::ZERO);
    }

    #[test]
    fn test_measure_clamps_zero_scale() {
        let font = BitmapFont::classic_5x7();
        assert_eq!(font.measure("A", 0), font.measure("A", 1));
    }

    #[test]
    fn test_draw_sets_pixels_inside_box() {
        let font = BitmapFont::classic_5x7();
        let mut surface = Surface::new(32, 16);
        // 'H' has a full-height first column, so the anchor pixel lights up.
        font.draw_text(&mut surface, "H", Point::new(2.0, 3.0), 1, Rgba::WHITE);
        assert_eq!(surface.pixel_at(2, 3), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(2, 9), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(2, 10), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_scales_blocks() {
        let font = BitmapFont::classic_5x7();
        let mut surface = Surface::new(32, 32);
        font.draw_text(&mut surface, "H", Point::ZERO, 2, Rgba::WHITE);
        // Top-left 2x2 block of the first column.
        assert_eq!(surface.pixel_at(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(1, 1), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(0, 13), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(0, 14), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_unknown_glyph_renders_tofu() {
        let font = BitmapFont::classic_5x7();
        let mut surface = Surface::new(16, 16);
        font.draw_text(&mut surface, "\u{1}", Point::ZERO, 1, Rgba::WHITE);
        assert_eq!(surface.pixel_at(0, 0), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(4, 6), Some(Rgba::WHITE));
        assert_eq!(surface.pixel_at(5, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = FontRegistry::default();
        assert!(registry.contains(BUILTIN_FONT));
        assert_eq!(registry.default_font_name(), Some(BUILTIN_FONT));
        assert!(registry.get(BUILTIN_FONT).is_ok());
        assert!(matches!(
            registry.get("nonexistent"),
            Err(EditorError::UnknownFont(_))
        ));
    }

    #[test]
    fn test_registry_replaces_duplicate_names() {
        let mut registry = FontRegistry::with_builtin();
        registry.register(Arc::new(BitmapFont::classic_5x7()));
        assert_eq!(registry.names().len(), 1);
    }
}
