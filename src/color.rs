//! Color model: hex-parsed RGBA values and the opacity-scaling paint
//! helper handed to motion generators.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HaloError;

/// A straight-alpha color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Color from unit-range components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels and a unit-range alpha.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Same color with the alpha replaced.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Whether drawing with this color can change any pixel.
    #[must_use]
    pub fn is_visible(self) -> bool {
        self.a > 0.0
    }
}

/// Configuration-facing color. Parses from `#rrggbb`, `#rrggbbaa`, or the
/// keyword `transparent`; serializes back to the same text form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Rgba);

impl Color {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(Rgba::TRANSPARENT);
    /// Opaque white (`#ffffff`).
    pub const WHITE: Self = Self(Rgba::WHITE);

    /// Color wrapping an already-built RGBA value.
    #[must_use]
    pub const fn from_rgba(rgba: Rgba) -> Self {
        Self(rgba)
    }

    /// The underlying RGBA value.
    #[must_use]
    pub const fn rgba(self) -> Rgba {
        self.0
    }
}

impl From<Rgba> for Color {
    fn from(rgba: Rgba) -> Self {
        Self(rgba)
    }
}

impl FromStr for Color {
    type Err = HaloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || HaloError::InvalidConfig(format!("invalid color: {s}"));
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if hex.len() != 6 && hex.len() != 8 {
            return Err(bad());
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad())
        };
        let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
        let a = if hex.len() == 8 {
            f32::from(channel(6)?) / 255.0
        } else {
            1.0
        };
        Ok(Self(Rgba::from_u8(r, g, b, a)))
    }
}

impl TryFrom<String> for Color {
    type Error = HaloError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgba { r, g, b, a } = self.0;
        if self.0 == Rgba::TRANSPARENT {
            return write!(f, "transparent");
        }
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", byte(r), byte(g), byte(b))
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                byte(r),
                byte(g),
                byte(b),
                byte(a)
            )
        }
    }
}

impl schemars::JsonSchema for Color {
    fn schema_name() -> Cow<'static, str> {
        Cow::Borrowed("Color")
    }

    fn json_schema(
        generator: &mut schemars::SchemaGenerator,
    ) -> schemars::Schema {
        String::json_schema(generator)
    }
}

/// Resolved drawing color for one animation instance: the configured color
/// plus the global opacity multiplier.
///
/// Generators request per-element alphas through [`shade`](Self::shade);
/// the final alpha is `alpha * opacity`, clamped to the unit range.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    color: Rgba,
    opacity: f32,
}

impl Paint {
    /// Paint from a configured color and opacity.
    #[must_use]
    pub const fn new(color: Rgba, opacity: f32) -> Self {
        Self { color, opacity }
    }

    /// The configured color at the given element alpha.
    #[must_use]
    pub fn shade(&self, alpha: f32) -> Rgba {
        self.color
            .with_alpha((alpha * self.opacity).clamp(0.0, 1.0))
    }

    /// The configured color at full element alpha.
    #[must_use]
    pub fn solid(&self) -> Rgba {
        self.shade(1.0)
    }
}
