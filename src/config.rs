//! Animation configuration: the live base config, the shallow-merge
//! patch applied by `update_config`, and the TOML-backed options
//! container. All structs use `#[serde(default)]` so partial files work.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::canvas::MAX_DIMENSION;
use crate::color::Color;
use crate::error::HaloError;
use crate::motion::MotionParams;

/// Base configuration shared by every animation kind.
///
/// These fields stay live for the lifetime of an instance and can be
/// shallow-merged over with [`ConfigPatch`]; generator-specific parameters
/// are fixed at construction instead.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema,
)]
#[serde(default)]
pub struct AnimationConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Time-dilation multiplier applied to elapsed seconds.
    pub speed: f32,
    /// Primary drawing color.
    pub color: Color,
    /// Background the surface is cleared to each frame.
    pub background: Color,
    /// Global alpha multiplier for paint-helper colors.
    pub opacity: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            width: 180,
            height: 180,
            speed: 1.0,
            color: Color::WHITE,
            background: Color::TRANSPARENT,
            opacity: 0.9,
        }
    }
}

impl AnimationConfig {
    /// Check the boundary contract: dimensions within surface limits,
    /// finite speed and opacity. Negative speed is legal (time runs
    /// backwards).
    ///
    /// # Errors
    /// `HaloError::InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<(), HaloError> {
        for (name, value) in [("width", self.width), ("height", self.height)]
        {
            if value == 0 || value > MAX_DIMENSION {
                return Err(HaloError::InvalidConfig(format!(
                    "{name} must be between 1 and {MAX_DIMENSION} pixels, \
                     got {value}"
                )));
            }
        }
        if !self.speed.is_finite() {
            return Err(HaloError::InvalidConfig(format!(
                "speed must be finite, got {}",
                self.speed
            )));
        }
        if !self.opacity.is_finite() {
            return Err(HaloError::InvalidConfig(format!(
                "opacity must be finite, got {}",
                self.opacity
            )));
        }
        Ok(())
    }

    /// Copy with opacity clamped to the unit range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self
    }

    /// Shallow merge: fields present in the patch overwrite, the rest
    /// stay.
    #[must_use]
    pub fn merged(&self, patch: &ConfigPatch) -> Self {
        Self {
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            speed: patch.speed.unwrap_or(self.speed),
            color: patch.color.unwrap_or(self.color),
            background: patch.background.unwrap_or(self.background),
            opacity: patch.opacity.unwrap_or(self.opacity),
        }
    }
}

/// Partial update for [`AnimationConfig`]. Absent fields leave the live
/// value untouched.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    JsonSchema,
)]
#[serde(default)]
pub struct ConfigPatch {
    /// New surface width.
    pub width: Option<u32>,
    /// New surface height.
    pub height: Option<u32>,
    /// New time-dilation multiplier.
    pub speed: Option<f32>,
    /// New primary color.
    pub color: Option<Color>,
    /// New background color.
    pub background: Option<Color>,
    /// New global alpha multiplier.
    pub opacity: Option<f32>,
}

impl ConfigPatch {
    /// Whether the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && self.speed.is_none()
            && self.color.is_none()
            && self.background.is_none()
            && self.opacity.is_none()
    }

    /// Whether applying the patch requires a surface reallocation.
    #[must_use]
    pub const fn resizes(&self) -> bool {
        self.width.is_some() || self.height.is_some()
    }
}

/// Top-level options container: one animation fully described. Serializes
/// to/from TOML for saved configurations and the demo binary.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Base configuration.
    pub config: AnimationConfig,
    /// Animation kind and its fixed parameters.
    pub motion: MotionParams,
}

impl Options {
    /// Generate JSON Schema describing the options surface.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    /// `Io` when the file cannot be read, `OptionsParse` on malformed
    /// TOML.
    pub fn load(path: &Path) -> Result<Self, HaloError> {
        let content = std::fs::read_to_string(path).map_err(HaloError::Io)?;
        toml::from_str(&content)
            .map_err(|e| HaloError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    /// `OptionsParse` on serialization failure, `Io` when writing fails.
    pub fn save(&self, path: &Path) -> Result<(), HaloError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HaloError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(HaloError::Io)?;
        }
        std::fs::write(path, content).map_err(HaloError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::MotionKind;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = AnimationConfig::default();
        assert_eq!(config.width, 180);
        assert_eq!(config.height, 180);
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.color, Color::WHITE);
        assert_eq!(config.background, Color::TRANSPARENT);
        assert_eq!(config.opacity, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn merge_overwrites_only_present_fields() {
        let config = AnimationConfig::default();
        let patch = ConfigPatch {
            speed: Some(2.0),
            color: Some("#ff0000".parse().unwrap()),
            ..ConfigPatch::default()
        };
        let merged = config.merged(&patch);
        assert_eq!(merged.speed, 2.0);
        assert_eq!(merged.color, "#ff0000".parse().unwrap());
        assert_eq!(merged.width, 180);
        assert_eq!(merged.opacity, 0.9);
        assert!(!patch.resizes());
        assert!(ConfigPatch::default().is_empty());
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let base = AnimationConfig::default();

        let config = AnimationConfig { width: 0, ..base };
        assert!(config.validate().is_err());

        let config = AnimationConfig {
            height: MAX_DIMENSION + 1,
            ..base
        };
        assert!(config.validate().is_err());

        let config = AnimationConfig {
            speed: f32::NAN,
            ..base
        };
        assert!(config.validate().is_err());

        let config = AnimationConfig { speed: -1.5, ..base };
        assert!(config.validate().is_ok());

        let config = AnimationConfig {
            opacity: f32::INFINITY,
            ..base
        };
        assert!(config.validate().is_err());

        let config = AnimationConfig {
            opacity: 3.0,
            ..base
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.clamped().opacity, 1.0);
    }

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let parsed: Options = toml::from_str(
            "[config]\nspeed = 2.5\n\n[motion]\nanimation = \"spiral-galaxy\"\n",
        )
        .unwrap();
        assert_eq!(parsed.config.speed, 2.5);
        assert_eq!(parsed.config.width, 180);
        assert_eq!(parsed.motion.kind(), MotionKind::SpiralGalaxy);
    }

    #[test]
    fn patch_parses_from_partial_toml() {
        let patch: ConfigPatch = toml::from_str("opacity = 0.4").unwrap();
        assert_eq!(patch.opacity, Some(0.4));
        assert!(patch.width.is_none());
        assert!(!patch.resizes());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema = Options::json_schema();
        let value = serde_json::to_value(&schema).unwrap();
        let props = value
            .get("properties")
            .and_then(|p| p.as_object())
            .unwrap();
        assert!(props.contains_key("config"));
        assert!(props.contains_key("motion"));
    }
}
