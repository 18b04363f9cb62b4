//! Curated presets and color themes, compiled into the crate as
//! read-only tables.
//!
//! A preset tunes the motion of a config (speed, color, opacity); a
//! theme recolors it wholesale, background included. Name lookups go
//! through lazily built maps; the tables themselves are static.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::color::{Color, Rgba};
use crate::config::AnimationConfig;
use crate::motion::MotionKind;

/// Broad use-case bucket a preset belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetCategory {
    /// Progress and busy indicators.
    Loading,
    /// Ornamental accents.
    Decorative,
    /// Data and physics visualization.
    Scientific,
    /// Expressive, gallery-leaning looks.
    Artistic,
    /// Quiet, low-presence looks.
    Minimal,
}

/// A named tuning of the base configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    /// Lookup key, kebab-case.
    pub name: &'static str,
    /// One-line human description.
    pub description: &'static str,
    /// Use-case bucket.
    pub category: PresetCategory,
    /// Free-form search tags.
    pub tags: &'static [&'static str],
    /// Time-dilation multiplier.
    pub speed: f32,
    /// Primary drawing color.
    pub color: Color,
    /// Global alpha multiplier.
    pub opacity: f32,
}

/// A named palette plus pacing defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Lookup key, kebab-case.
    pub name: &'static str,
    /// One-line human description.
    pub description: &'static str,
    /// Primary drawing color.
    pub primary: Color,
    /// Companion color for embedder chrome.
    pub secondary: Color,
    /// Highlight color for embedder chrome.
    pub accent: Color,
    /// Surface background.
    pub background: Color,
    /// Global alpha multiplier.
    pub opacity: f32,
    /// Time-dilation multiplier.
    pub speed: f32,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgba(Rgba::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        1.0,
    ))
}

static PRESETS: [Preset; 11] = [
    // Loading
    Preset {
        name: "loading-fast",
        description: "Quick, energetic loading animation",
        category: PresetCategory::Loading,
        tags: &["fast", "loading", "energetic"],
        speed: 2.0,
        color: rgb(0x4e, 0xcd, 0xc4),
        opacity: 0.9,
    },
    Preset {
        name: "loading-smooth",
        description: "Gentle, smooth loading animation",
        category: PresetCategory::Loading,
        tags: &["smooth", "loading", "gentle"],
        speed: 0.8,
        color: rgb(0x96, 0xce, 0xb4),
        opacity: 0.7,
    },
    Preset {
        name: "loading-minimal",
        description: "Simple, minimal loading animation",
        category: PresetCategory::Loading,
        tags: &["minimal", "loading", "simple"],
        speed: 1.0,
        color: Color::WHITE,
        opacity: 0.5,
    },
    // Decorative
    Preset {
        name: "decorative-elegant",
        description: "Sophisticated decorative animation",
        category: PresetCategory::Decorative,
        tags: &["elegant", "decorative", "sophisticated"],
        speed: 0.6,
        color: rgb(0xd4, 0xaf, 0x37),
        opacity: 0.8,
    },
    Preset {
        name: "decorative-playful",
        description: "Fun, colorful decorative animation",
        category: PresetCategory::Decorative,
        tags: &["playful", "decorative", "colorful"],
        speed: 1.5,
        color: rgb(0xff, 0x6b, 0x6b),
        opacity: 0.9,
    },
    // Scientific
    Preset {
        name: "scientific-precise",
        description: "Accurate, scientific visualization",
        category: PresetCategory::Scientific,
        tags: &["scientific", "precise", "data"],
        speed: 1.0,
        color: rgb(0x00, 0xd2, 0xd3),
        opacity: 0.8,
    },
    Preset {
        name: "scientific-quantum",
        description: "Quantum physics visualization",
        category: PresetCategory::Scientific,
        tags: &["quantum", "scientific", "physics"],
        speed: 1.2,
        color: rgb(0x9b, 0x59, 0xb6),
        opacity: 0.7,
    },
    // Artistic
    Preset {
        name: "artistic-abstract",
        description: "Abstract artistic expression",
        category: PresetCategory::Artistic,
        tags: &["abstract", "artistic", "creative"],
        speed: 0.4,
        color: rgb(0xe7, 0x4c, 0x3c),
        opacity: 0.6,
    },
    Preset {
        name: "artistic-organic",
        description: "Natural, organic movement",
        category: PresetCategory::Artistic,
        tags: &["organic", "artistic", "natural"],
        speed: 0.8,
        color: rgb(0x2e, 0xcc, 0x71),
        opacity: 0.8,
    },
    // Minimal
    Preset {
        name: "minimal-subtle",
        description: "Very subtle, minimal animation",
        category: PresetCategory::Minimal,
        tags: &["minimal", "subtle", "quiet"],
        speed: 0.5,
        color: rgb(0xbd, 0xc3, 0xc7),
        opacity: 0.3,
    },
    Preset {
        name: "minimal-clean",
        description: "Clean, simple minimal animation",
        category: PresetCategory::Minimal,
        tags: &["minimal", "clean", "simple"],
        speed: 1.0,
        color: rgb(0x34, 0x49, 0x5e),
        opacity: 0.5,
    },
];

static THEMES: [Theme; 6] = [
    Theme {
        name: "ocean",
        description: "Cool ocean-inspired colors",
        primary: rgb(0x4e, 0xcd, 0xc4),
        secondary: rgb(0x45, 0xb7, 0xd1),
        accent: rgb(0x96, 0xce, 0xb4),
        background: rgb(0x2c, 0x3e, 0x50),
        opacity: 0.8,
        speed: 1.0,
    },
    Theme {
        name: "sunset",
        description: "Warm sunset colors",
        primary: rgb(0xff, 0x6b, 0x6b),
        secondary: rgb(0xfe, 0xca, 0x57),
        accent: rgb(0xff, 0x9f, 0xf3),
        background: rgb(0x2c, 0x2c, 0x54),
        opacity: 0.9,
        speed: 1.2,
    },
    Theme {
        name: "forest",
        description: "Natural forest colors",
        primary: rgb(0x2e, 0xcc, 0x71),
        secondary: rgb(0x27, 0xae, 0x60),
        accent: rgb(0x96, 0xce, 0xb4),
        background: rgb(0x1e, 0x3a, 0x8a),
        opacity: 0.7,
        speed: 0.8,
    },
    Theme {
        name: "cosmic",
        description: "Space and cosmic colors",
        primary: rgb(0x9b, 0x59, 0xb6),
        secondary: rgb(0x8e, 0x44, 0xad),
        accent: rgb(0x00, 0xd2, 0xd3),
        background: rgb(0x00, 0x00, 0x00),
        opacity: 0.9,
        speed: 1.5,
    },
    Theme {
        name: "monochrome",
        description: "Black and white theme",
        primary: Color::WHITE,
        secondary: rgb(0xbd, 0xc3, 0xc7),
        accent: rgb(0x95, 0xa5, 0xa6),
        background: rgb(0x2c, 0x3e, 0x50),
        opacity: 0.8,
        speed: 1.0,
    },
    Theme {
        name: "neon",
        description: "Bright neon colors",
        primary: rgb(0x00, 0xff, 0x00),
        secondary: rgb(0xff, 0x00, 0xff),
        accent: rgb(0x00, 0xff, 0xff),
        background: rgb(0x00, 0x00, 0x00),
        opacity: 1.0,
        speed: 2.0,
    },
];

fn preset_index() -> &'static FxHashMap<&'static str, &'static Preset> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static Preset>> =
        OnceLock::new();
    INDEX.get_or_init(|| {
        PRESETS.iter().map(|preset| (preset.name, preset)).collect()
    })
}

fn theme_index() -> &'static FxHashMap<&'static str, &'static Theme> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static Theme>> =
        OnceLock::new();
    INDEX
        .get_or_init(|| THEMES.iter().map(|theme| (theme.name, theme)).collect())
}

// ── Lookups ──────────────────────────────────────────────────────────

/// Look a preset up by name.
#[must_use]
pub fn preset(name: &str) -> Option<&'static Preset> {
    preset_index().get(name).copied()
}

/// Look a theme up by name.
#[must_use]
pub fn theme(name: &str) -> Option<&'static Theme> {
    theme_index().get(name).copied()
}

/// Every built-in preset, in table order.
#[must_use]
pub const fn all_presets() -> &'static [Preset] {
    &PRESETS
}

/// Every built-in theme, in table order.
#[must_use]
pub const fn all_themes() -> &'static [Theme] {
    &THEMES
}

/// Presets in one category, in table order.
#[must_use]
pub fn presets_in(category: PresetCategory) -> Vec<&'static Preset> {
    PRESETS
        .iter()
        .filter(|preset| preset.category == category)
        .collect()
}

/// Presets carrying a tag, in table order.
#[must_use]
pub fn presets_tagged(tag: &str) -> Vec<&'static Preset> {
    PRESETS
        .iter()
        .filter(|preset| preset.tags.contains(&tag))
        .collect()
}

// ── Application ──────────────────────────────────────────────────────

/// Overwrite the config's speed, color and opacity from a preset.
pub fn apply_preset(config: &mut AnimationConfig, preset: &Preset) {
    log::info!("applying preset {}", preset.name);
    config.speed = preset.speed;
    config.color = preset.color;
    config.opacity = preset.opacity;
}

/// Recolor the config from a theme: primary color, background, opacity
/// and speed.
pub fn apply_theme(config: &mut AnimationConfig, theme: &Theme) {
    log::info!("applying theme {}", theme.name);
    config.color = theme.primary;
    config.background = theme.background;
    config.opacity = theme.opacity;
    config.speed = theme.speed;
}

/// The curated preset for a kind/use-case pair, when one exists.
#[must_use]
pub fn recommended_preset(
    kind: MotionKind,
    use_case: &str,
) -> Option<&'static str> {
    let rows: &[(&str, &str)] = match kind {
        MotionKind::RadialPulse => &[
            ("loading", "loading-fast"),
            ("decorative", "decorative-elegant"),
            ("minimal", "minimal-subtle"),
        ],
        MotionKind::SpiralGalaxy | MotionKind::QuantumField => &[
            ("scientific", "scientific-quantum"),
            ("artistic", "artistic-abstract"),
            ("decorative", "decorative-playful"),
        ],
        MotionKind::NeuralNetwork => &[
            ("scientific", "scientific-precise"),
            ("artistic", "artistic-abstract"),
            ("minimal", "minimal-clean"),
        ],
        _ => return None,
    };
    rows.iter()
        .find(|(case, _)| *case == use_case)
        .map(|(_, name)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_find_every_table_row() {
        for expected in all_presets() {
            let found = preset(expected.name).unwrap();
            assert!(std::ptr::eq(found, expected));
        }
        for expected in all_themes() {
            let found = theme(expected.name).unwrap();
            assert!(std::ptr::eq(found, expected));
        }
        assert!(preset("loading-warp").is_none());
        assert!(theme("lava").is_none());
    }

    #[test]
    fn categories_and_tags_partition_the_tables() {
        assert_eq!(all_presets().len(), 11);
        assert_eq!(all_themes().len(), 6);

        let by_category: usize = [
            PresetCategory::Loading,
            PresetCategory::Decorative,
            PresetCategory::Scientific,
            PresetCategory::Artistic,
            PresetCategory::Minimal,
        ]
        .into_iter()
        .map(|category| presets_in(category).len())
        .sum();
        assert_eq!(by_category, all_presets().len());
        assert_eq!(presets_in(PresetCategory::Loading).len(), 3);

        let minimal = presets_tagged("minimal");
        assert_eq!(minimal.len(), 3);
        assert!(minimal.iter().any(|p| p.name == "loading-minimal"));
        assert!(presets_tagged("holographic").is_empty());
    }

    #[test]
    fn applying_a_preset_leaves_untuned_fields_alone() {
        let mut config = AnimationConfig::default();
        apply_preset(&mut config, preset("loading-fast").unwrap());
        assert_eq!(config.speed, 2.0);
        assert_eq!(config.color, "#4ecdc4".parse().unwrap());
        assert_eq!(config.opacity, 0.9);
        assert_eq!(config.width, 180);
        assert_eq!(config.background, Color::TRANSPARENT);
    }

    #[test]
    fn applying_a_theme_recolors_the_background_too() {
        let mut config = AnimationConfig::default();
        apply_theme(&mut config, theme("ocean").unwrap());
        assert_eq!(config.color, "#4ecdc4".parse().unwrap());
        assert_eq!(config.background, "#2c3e50".parse().unwrap());
        assert_eq!(config.opacity, 0.8);
        assert_eq!(config.speed, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn recommendations_cover_the_curated_kinds_only() {
        let cases = [
            (MotionKind::RadialPulse, "loading", Some("loading-fast")),
            (MotionKind::RadialPulse, "scientific", None),
            (
                MotionKind::SpiralGalaxy,
                "scientific",
                Some("scientific-quantum"),
            ),
            (
                MotionKind::NeuralNetwork,
                "minimal",
                Some("minimal-clean"),
            ),
            (
                MotionKind::QuantumField,
                "decorative",
                Some("decorative-playful"),
            ),
            (MotionKind::OscillatingDots, "loading", None),
        ];
        for (kind, use_case, expected) in cases {
            assert_eq!(
                recommended_preset(kind, use_case),
                expected,
                "{kind} / {use_case}"
            );
        }

        // Every recommendation resolves to a real preset.
        for kind in MotionKind::ALL {
            for case in
                ["loading", "decorative", "scientific", "artistic", "minimal"]
            {
                if let Some(name) = recommended_preset(kind, case) {
                    assert!(preset(name).is_some(), "{name}");
                }
            }
        }
    }
}
