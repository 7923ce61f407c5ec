//! Annotation color palette.
//!
//! Every annotation gets the same two swatches: one for light editor
//! backgrounds and one for dark ones. Colors are translucent so the host's
//! own line highlight shows through.

use crate::types::{Rgba, Swatch};

/// Swatch used on light backgrounds.
pub const LIGHT: Swatch = Swatch {
    background_color: Rgba::new(193, 217, 255, 0.65),
    color: Rgba::new(0, 0, 25, 0.55),
};

/// Swatch used on dark backgrounds.
pub const DARK: Swatch = Swatch {
    background_color: Rgba::new(15, 43, 89, 0.65),
    color: Rgba::new(235, 235, 255, 0.55),
};

/// Which background variant a host is drawing on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Light,
    #[default]
    Dark,
}

impl Variant {
    /// Resolves a variant name from config or the command line.
    ///
    /// Unknown names fall back to `Dark` with a warning so a typo never blocks
    /// rendering.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Variant::Light,
            "dark" => Variant::Dark,
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Variant::Dark
            }
        }
    }

    /// The swatch for this variant.
    pub fn swatch(self) -> Swatch {
        match self {
            Variant::Light => LIGHT,
            Variant::Dark => DARK,
        }
    }

    /// Opaque backdrop the translucent swatch is composited over when the
    /// host cannot blend alpha itself (terminals).
    pub fn backdrop(self) -> (u8, u8, u8) {
        match self {
            Variant::Light => (255, 255, 255),
            Variant::Dark => (30, 30, 46),
        }
    }
}
