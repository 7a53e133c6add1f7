//! Capability flags of the display platform a session targets.

/// What the target platform can render.
///
/// Consulted when constructing layers (default color) and when enumerating
/// modifiers: capabilities filter the modifier set at enumeration time, the
/// set itself is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFeatures {
    /// Text layers may change their glyph scale factor.
    pub has_custom_font_size: bool,
    /// Layers carry a color; without it everything draws in the default.
    pub has_rgb_support: bool,
    /// The display can invert drawn pixels.
    pub has_inverted_colors: bool,
    /// Color assigned to newly created layers.
    pub default_color: String,
}

impl PlatformFeatures {
    /// A 1-bit monochrome display: no per-layer color, no font scaling.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            has_custom_font_size: false,
            has_rgb_support: false,
            has_inverted_colors: true,
            default_color: "#FFFFFF".to_string(),
        }
    }

    /// A full-color display with scalable text.
    #[must_use]
    pub fn rgb() -> Self {
        Self {
            has_custom_font_size: true,
            has_rgb_support: true,
            has_inverted_colors: true,
            default_color: "#FFFFFF".to_string(),
        }
    }
}

impl Default for PlatformFeatures {
    fn default() -> Self {
        Self::monochrome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_monochrome() {
        let features = PlatformFeatures::default();
        assert!(!features.has_rgb_support);
        assert_eq!(features.default_color, "#FFFFFF");
    }

    #[test]
    fn test_rgb_enables_font_scaling() {
        assert!(PlatformFeatures::rgb().has_custom_font_size);
    }
}
