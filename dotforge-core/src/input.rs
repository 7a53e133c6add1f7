//! Keyboard input types consumed by the editing tools.

/// Keys the tools react to. Everything else is ignored at this level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Clears the current selection.
    Escape,
    /// Deletes the active layer.
    Backspace,
    /// Deletes the active layer.
    Delete,
    /// Nudges the active layer up.
    ArrowUp,
    /// Nudges the active layer down.
    ArrowDown,
    /// Nudges the active layer left.
    ArrowLeft,
    /// Nudges the active layer right.
    ArrowRight,
}

/// Modifier keys held during a pointer or keyboard event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub ctrl: bool,
    /// Alt/option key held.
    pub alt: bool,
    /// Meta/command key held.
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Only shift held.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}
