use crate::constants::*;
use crate::error::HeliosError;
use serde::{Deserialize, Serialize};

/// Top-level Helios configuration, loaded from RON.
/// Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeliosConfig {
    pub sky: SkyConfig,
    pub sun: SunConfig,
    pub clock: ClockConfig,
    pub fullscreen: FullscreenConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub dome_radius: f32,
    pub dome_width_segments: u32,
    pub dome_height_segments: u32,
    /// Gradient `offset` uniform.
    pub offset: f32,
    /// Gradient `exponent` uniform.
    pub exponent: f32,
    pub star_radius: f32,
    pub star_texture: String,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            dome_radius: SKY_DOME_RADIUS,
            dome_width_segments: 32,
            dome_height_segments: 15,
            offset: SKY_DOME_OFFSET,
            exponent: SKY_DOME_EXPONENT,
            star_radius: STAR_FIELD_RADIUS,
            star_texture: STAR_FIELD_TEXTURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub light_distance: f64,
    pub sphere_orbit: f64,
    pub sphere_radius: f32,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            light_distance: SUN_LIGHT_DISTANCE,
            sphere_orbit: SUN_SPHERE_ORBIT,
            sphere_radius: SUN_SPHERE_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub day_duration_secs: f64,
    pub start_angle: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_duration_secs: DEFAULT_DAY_DURATION_SECS,
            start_angle: DEFAULT_START_ANGLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenConfig {
    /// Character whose key-press toggles fullscreen.
    pub key: char,
    /// Also toggle on double-click.
    pub dblclick: bool,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_FULLSCREEN_KEY,
            dblclick: false,
        }
    }
}

impl HeliosConfig {
    /// Parse and validate a RON config string.
    pub fn from_ron(ron_str: &str) -> Result<Self, HeliosError> {
        let options = ron::Options::default();
        let config: HeliosConfig = options
            .from_str(ron_str)
            .map_err(|e| HeliosError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HeliosError> {
        let positive = [
            ("sky.dome_radius", self.sky.dome_radius as f64),
            ("sky.star_radius", self.sky.star_radius as f64),
            ("sun.light_distance", self.sun.light_distance),
            ("sun.sphere_orbit", self.sun.sphere_orbit),
            ("sun.sphere_radius", self.sun.sphere_radius as f64),
            ("clock.day_duration_secs", self.clock.day_duration_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(HeliosError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        if !self.clock.start_angle.is_finite() {
            return Err(HeliosError::InvalidConfig(
                "clock.start_angle must be finite".into(),
            ));
        }
        if !self.sky.exponent.is_finite() || !self.sky.offset.is_finite() {
            return Err(HeliosError::InvalidConfig(
                "sky.offset and sky.exponent must be finite".into(),
            ));
        }
        if self.sky.dome_width_segments < 3 || self.sky.dome_height_segments < 2 {
            return Err(HeliosError::InvalidConfig(
                "sky dome needs at least 3x2 segments".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = HeliosConfig::from_ron("()").unwrap();
        assert_eq!(config, HeliosConfig::default());
        assert_eq!(config.sky.offset, 400.0);
        assert_eq!(config.sun.light_distance, 90_000.0);
        assert_eq!(config.fullscreen.key, 'f');
    }

    #[test]
    fn test_partial_override() {
        let config = HeliosConfig::from_ron(
            "(clock: (day_duration_secs: 60.0), fullscreen: (key: 'g', dblclick: true))",
        )
        .unwrap();
        assert_eq!(config.clock.day_duration_secs, 60.0);
        assert_eq!(config.clock.start_angle, DEFAULT_START_ANGLE);
        assert_eq!(config.fullscreen.key, 'g');
        assert!(config.fullscreen.dblclick);
    }

    #[test]
    fn test_roundtrip_through_ron() {
        let config = HeliosConfig::default();
        let text = ron::to_string(&config).unwrap();
        assert_eq!(HeliosConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_day_duration() {
        let err = HeliosConfig::from_ron("(clock: (day_duration_secs: 0.0))").unwrap_err();
        match err {
            HeliosError::InvalidConfig(msg) => assert!(msg.contains("day_duration")),
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_ron() {
        let err = HeliosConfig::from_ron("(sky: ").unwrap_err();
        assert!(matches!(err, HeliosError::ConfigParse(_)));
    }

    #[test]
    fn test_bundled_config_parses() {
        let text = include_str!("../../../config/helios.ron");
        let config = HeliosConfig::from_ron(text).unwrap();
        assert_eq!(config, HeliosConfig::default());
    }
}
