//! Color parsing and the RGBA pixel type used by drawing surfaces.
//!
//! Layers keep their color as the original string (so `"#FFF"` persists as
//! `"#FFF"`); parsing to [`Rgba`] happens when pixels are actually written.

use crate::error::{EditorError, EditorResult};

/// An 8-bit RGBA color, byte order `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Opaque white.
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    /// Opaque black.
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);

    /// Create an opaque color from components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    /// Red component.
    #[must_use]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    /// Green component.
    #[must_use]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    /// Blue component.
    #[must_use]
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    /// Alpha component.
    #[must_use]
    pub const fn a(self) -> u8 {
        self.0[3]
    }

    /// The same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], alpha])
    }

    /// Canonical `#RRGGBB` form (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}

/// Parse a color string into an opaque [`Rgba`].
///
/// Accepts `#RGB`, `#RRGGBB` (case-insensitive) and a small set of named
/// colors (`black`, `white`, `red`, `green`, `blue`, `yellow`, `cyan`,
/// `magenta`, `gray`).
///
/// # Errors
///
/// Returns [`EditorError::InvalidColor`] for anything else.
pub fn parse_color(value: &str) -> EditorResult<Rgba> {
    let trimmed = value.trim();
    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| EditorError::InvalidColor(value.to_string()));
    }
    let named = match trimmed.to_ascii_lowercase().as_str() {
        "black" => Rgba::BLACK,
        "white" => Rgba::WHITE,
        "red" => Rgba::rgb(255, 0, 0),
        "green" => Rgba::rgb(0, 255, 0),
        "blue" => Rgba::rgb(0, 0, 255),
        "yellow" => Rgba::rgb(255, 255, 0),
        "cyan" => Rgba::rgb(0, 255, 255),
        "magenta" => Rgba::rgb(255, 0, 255),
        "gray" | "grey" => Rgba::rgb(128, 128, 128),
        _ => return Err(EditorError::InvalidColor(value.to_string())),
    };
    Ok(named)
}

#[allow(clippy::cast_possible_truncation)] // Nibbles and channel bytes fit in u8
fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let nibble = c.to_digit(16)? as u8;
                out[i] = nibble << 4 | nibble;
            }
            Some(Rgba::rgb(out[0], out[1], out[2]))
        }
        6 => {
            let packed = u32::from_str_radix(hex, 16).ok()?;
            Some(Rgba::rgb(
                (packed >> 16) as u8,
                (packed >> 8) as u8,
                packed as u8,
            ))
        }
        _ => None,
    }
}
