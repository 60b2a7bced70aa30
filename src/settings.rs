//! Swarm configuration
//!
//! Everything the control surface can change lives here. Values arrive from
//! the UI as raw strings and are validated before they reach the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ORBIT_RADIUS;
use crate::error::ConfigError;

/// Upper bound accepted for the sword count
pub const MAX_SWORD_COUNT: usize = 1000;

/// How orbiting swords approach their slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryStyle {
    /// Straight line toward the slot
    #[default]
    Linear,
    /// Sinusoidal wobble layered on the approach heading
    Curve,
}

impl TrajectoryStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryStyle::Linear => "linear",
            TrajectoryStyle::Curve => "curve",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "line" => Some(TrajectoryStyle::Linear),
            "curve" | "wave" => Some(TrajectoryStyle::Curve),
            _ => None,
        }
    }
}

/// Strike pattern used when an attack is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AttackMode {
    /// Every sword flies straight along the pointer heading
    #[default]
    Linear,
    /// Swords fan out across a 60° spread
    Scatter,
    /// Swords sweep three turns around the pointer
    Circle,
}

impl AttackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackMode::Linear => "linear",
            AttackMode::Scatter => "scatter",
            AttackMode::Circle => "circle",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Some(AttackMode::Linear),
            "scatter" => Some(AttackMode::Scatter),
            "circle" => Some(AttackMode::Circle),
            _ => None,
        }
    }
}

/// A control-surface field that can be changed at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Count,
    Speed,
    OrbitRadius,
    Color,
    TrajectoryStyle,
    AttackMode,
}

impl ConfigField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigField::Count => "count",
            ConfigField::Speed => "speed",
            ConfigField::OrbitRadius => "orbit_radius",
            ConfigField::Color => "color",
            ConfigField::TrajectoryStyle => "trajectory",
            ConfigField::AttackMode => "attack_mode",
        }
    }

    /// Accepts snake_case, camelCase and the short control names
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "count" => Some(ConfigField::Count),
            "speed" => Some(ConfigField::Speed),
            "radius" | "orbitradius" => Some(ConfigField::OrbitRadius),
            "color" | "colour" => Some(ConfigField::Color),
            "trajectory" | "trajectorystyle" => Some(ConfigField::TrajectoryStyle),
            "attack" | "attackmode" => Some(ConfigField::AttackMode),
            _ => None,
        }
    }
}

/// Linear RGBA colour in 0..1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const CYAN: Rgba = Rgba([0.0, 1.0, 1.0, 1.0]);

    /// Parse `#rgb` or `#rrggbb` (leading `#` optional)
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let (r, g, b) = match hex.len() {
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
                (digit(0)?, digit(1)?, digit(2)?)
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                (byte(0)?, byte(2)?, byte(4)?)
            }
            _ => return None,
        };
        Some(Rgba([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ]))
    }

    /// Same colour with a different alpha
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        let [r, g, b, _] = self.0;
        [r, g, b, alpha]
    }
}

/// User-adjustable swarm parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Number of swords
    pub count: usize,
    /// Base travel speed (px/frame)
    pub speed: f32,
    /// Formation circle radius (px)
    pub orbit_radius: f32,
    /// Stroke colour as a hex string
    pub color: String,
    /// Approach style for orbiting swords
    pub trajectory: TrajectoryStyle,
    /// Strike pattern for the next attack
    pub attack_mode: AttackMode,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            count: 5,
            speed: 5.0,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            color: "#00ffff".to_string(),
            trajectory: TrajectoryStyle::Linear,
            attack_mode: AttackMode::Linear,
        }
    }
}

impl SwarmConfig {
    /// Parse a JSON config blob. Missing fields take their defaults and
    /// out-of-range values are replaced by defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: SwarmConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Like [`SwarmConfig::from_json`], but falls back to defaults on a bad blob
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid swarm config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Replace any unusable value with its default
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.count > MAX_SWORD_COUNT {
            log::warn!("count {} capped at {}", self.count, MAX_SWORD_COUNT);
            self.count = MAX_SWORD_COUNT;
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            self.speed = defaults.speed;
        }
        if !(self.orbit_radius.is_finite() && self.orbit_radius > 0.0) {
            self.orbit_radius = defaults.orbit_radius;
        }
        if Rgba::parse_hex(&self.color).is_none() {
            self.color = defaults.color;
        }
        self
    }

    /// Stroke colour, cyan if the stored string does not parse
    pub fn stroke_color(&self) -> Rgba {
        Rgba::parse_hex(&self.color).unwrap_or(Rgba::CYAN)
    }

    /// Apply a raw control value to one field.
    ///
    /// On error the config is left untouched.
    pub fn apply(&mut self, field: ConfigField, raw: &str) -> Result<(), ConfigError> {
        match field {
            ConfigField::Count => {
                let value = parse_number(field, raw)?;
                if value < 0.0 || value > MAX_SWORD_COUNT as f32 {
                    return Err(ConfigError::OutOfRange {
                        field: field.as_str(),
                        value,
                    });
                }
                self.count = value.trunc() as usize;
            }
            ConfigField::Speed => self.speed = parse_positive(field, raw)?,
            ConfigField::OrbitRadius => self.orbit_radius = parse_positive(field, raw)?,
            ConfigField::Color => {
                if Rgba::parse_hex(raw).is_none() {
                    return Err(ConfigError::InvalidColor(raw.to_string()));
                }
                self.color = raw.trim().to_string();
            }
            ConfigField::TrajectoryStyle => {
                self.trajectory =
                    TrajectoryStyle::from_str(raw).ok_or_else(|| ConfigError::UnknownVariant {
                        field: field.as_str(),
                        value: raw.to_string(),
                    })?;
            }
            ConfigField::AttackMode => {
                self.attack_mode =
                    AttackMode::from_str(raw).ok_or_else(|| ConfigError::UnknownVariant {
                        field: field.as_str(),
                        value: raw.to_string(),
                    })?;
            }
        }
        Ok(())
    }
}

fn parse_number(field: ConfigField, raw: &str) -> Result<f32, ConfigError> {
    let value: f32 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        field: field.as_str(),
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ConfigError::InvalidNumber {
            field: field.as_str(),
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_positive(field: ConfigField, raw: &str) -> Result<f32, ConfigError> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange {
            field: field.as_str(),
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwarmConfig::default();
        assert_eq!(config.count, 5);
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.orbit_radius, 50.0);
        assert_eq!(config.stroke_color(), Rgba::CYAN);
        assert_eq!(config.trajectory, TrajectoryStyle::Linear);
        assert_eq!(config.attack_mode, AttackMode::Linear);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba::parse_hex("#00ffff"), Some(Rgba::CYAN));
        assert_eq!(Rgba::parse_hex("0ff"), Some(Rgba::CYAN));
        let red = Rgba::parse_hex("#FF0000").unwrap();
        assert_eq!(red.0, [1.0, 0.0, 0.0, 1.0]);
        assert!(Rgba::parse_hex("#12345").is_none());
        assert!(Rgba::parse_hex("#gg0000").is_none());
        assert!(Rgba::parse_hex("").is_none());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(ConfigField::from_str("radius"), Some(ConfigField::OrbitRadius));
        assert_eq!(ConfigField::from_str("orbitRadius"), Some(ConfigField::OrbitRadius));
        assert_eq!(ConfigField::from_str("attack_mode"), Some(ConfigField::AttackMode));
        assert_eq!(ConfigField::from_str("trajectoryStyle"), Some(ConfigField::TrajectoryStyle));
        assert_eq!(ConfigField::from_str("shape"), None);
    }

    #[test]
    fn test_apply_count_truncates() {
        let mut config = SwarmConfig::default();
        config.apply(ConfigField::Count, "7.9").unwrap();
        assert_eq!(config.count, 7);
        config.apply(ConfigField::Count, "0").unwrap();
        assert_eq!(config.count, 0);
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = SwarmConfig::default();
        assert!(matches!(
            config.apply(ConfigField::Count, "-1"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            config.apply(ConfigField::Speed, "fast"),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            config.apply(ConfigField::OrbitRadius, "0"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert!(matches!(
            config.apply(ConfigField::Color, "teal"),
            Err(ConfigError::InvalidColor(_))
        ));
        assert!(matches!(
            config.apply(ConfigField::AttackMode, "spiral"),
            Err(ConfigError::UnknownVariant { .. })
        ));
        assert_eq!(config, SwarmConfig::default());
    }

    #[test]
    fn test_apply_enums() {
        let mut config = SwarmConfig::default();
        config.apply(ConfigField::AttackMode, "Scatter").unwrap();
        config.apply(ConfigField::TrajectoryStyle, "curve").unwrap();
        assert_eq!(config.attack_mode, AttackMode::Scatter);
        assert_eq!(config.trajectory, TrajectoryStyle::Curve);
    }

    #[test]
    fn test_from_json_partial() {
        let config = SwarmConfig::from_json(r#"{"count": 12, "attack_mode": "circle"}"#).unwrap();
        assert_eq!(config.count, 12);
        assert_eq!(config.attack_mode, AttackMode::Circle);
        assert_eq!(config.speed, 5.0);
    }

    #[test]
    fn test_from_json_sanitizes() {
        let config = SwarmConfig::from_json(r#"{"speed": -3, "color": "nope"}"#).unwrap();
        assert_eq!(config.speed, 5.0);
        assert_eq!(config.color, "#00ffff");

        let config = SwarmConfig::from_json_or_default("{not json");
        assert_eq!(config, SwarmConfig::default());
    }

    #[test]
    fn test_count_cap() {
        let mut config = SwarmConfig::default();
        config.apply(ConfigField::Count, "1000").unwrap();
        assert_eq!(config.count, MAX_SWORD_COUNT);
        assert!(matches!(
            config.apply(ConfigField::Count, "1001"),
            Err(ConfigError::OutOfRange { .. })
        ));
        assert_eq!(config.count, MAX_SWORD_COUNT);

        let config = SwarmConfig::from_json(r#"{"count": 50000}"#).unwrap();
        assert_eq!(config.count, MAX_SWORD_COUNT);
    }
}
