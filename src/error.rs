//! Error types for the swarm.
//!
//! Numeric trouble inside the simulation is repaired in place; these errors
//! only surface where an operation is refused as a whole (an attack that
//! cannot be planned, a control value that cannot be applied).

use std::fmt;

/// Reasons a sword refuses to start an attack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackError {
    /// The sword's own position was not finite at trigger time.
    NonFiniteOrigin { x: f32, y: f32 },
    /// The launch velocity for a linear/scatter strike came out non-finite.
    NonFiniteLaunch { angle: f32 },
    /// No usable center could be found for a circle strike.
    NonFiniteCenter { x: f32, y: f32 },
}

impl fmt::Display for AttackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackError::NonFiniteOrigin { x, y } => {
                write!(f, "sword position ({}, {}) is not finite", x, y)
            }
            AttackError::NonFiniteLaunch { angle } => {
                write!(f, "launch angle {} produced a non-finite velocity", angle)
            }
            AttackError::NonFiniteCenter { x, y } => {
                write!(f, "circle strike center ({}, {}) is not finite", x, y)
            }
        }
    }
}

impl std::error::Error for AttackError {}

/// Reasons a control change is rejected. The previous value stays in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The control name is not one of the known fields.
    UnknownField(String),
    /// The value could not be parsed as a number.
    InvalidNumber { field: &'static str, value: String },
    /// The value parsed but lies outside the allowed range.
    OutOfRange { field: &'static str, value: f32 },
    /// The value is not a `#rgb` / `#rrggbb` colour.
    InvalidColor(String),
    /// The value does not name a variant of the field's enum.
    UnknownVariant { field: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownField(name) => write!(f, "unknown config field '{}'", name),
            ConfigError::InvalidNumber { field, value } => {
                write!(f, "{}: '{}' is not a number", field, value)
            }
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{}: {} is out of range", field, value)
            }
            ConfigError::InvalidColor(value) => write!(f, "'{}' is not a hex colour", value),
            ConfigError::UnknownVariant { field, value } => {
                write!(f, "{}: unknown option '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
