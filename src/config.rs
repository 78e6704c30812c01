use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::dynamics::ControlMode;

// ---------------------------------------------------------------------------
// Trial parameters
// ---------------------------------------------------------------------------

/// Parameters of one balance trial, loadable from a YAML file.
///
/// Defaults reproduce the validation harness: K=4, start 5 deg off upright
/// at rest, hands off the joystick.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Trial {
    pub accel_k: f64,         // model gain, deg/s^2
    pub joystick_gain: f64,   // input scaling
    pub control_mode: ControlMode,
    pub max_velocity: f64,    // safety clamp, deg/s
    pub fall_angle: f64,      // trial ends when |angle| reaches this, deg
    pub start_angle: f64,     // deg
    pub start_velocity: f64,  // deg/s
}

impl Default for Trial {
    fn default() -> Self {
        Self {
            accel_k: 4.0,
            joystick_gain: 0.0,
            control_mode: ControlMode::Position,
            max_velocity: 60.0,
            fall_angle: 60.0,
            start_angle: -5.0,
            start_velocity: 0.0,
        }
    }
}

impl Trial {
    /// Parse a trial from YAML text and validate it.
    pub fn from_yaml_str(text: &str) -> Result<Trial, ConfigError> {
        let trial: Trial = serde_yaml::from_str(text)?;
        trial.validate()?;
        Ok(trial)
    }

    /// Load a trial from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Trial, ConfigError> {
        let text = fs::read_to_string(path)?;
        Trial::from_yaml_str(&text)
    }

    /// Reject parameters the runner cannot work with. The integration
    /// kernel does no checking of its own, so degenerate values are
    /// stopped here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("accel_k", self.accel_k),
            ("joystick_gain", self.joystick_gain),
            ("max_velocity", self.max_velocity),
            ("fall_angle", self.fall_angle),
            ("start_angle", self.start_angle),
            ("start_velocity", self.start_velocity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{name} must be finite")));
            }
        }
        if self.max_velocity <= 0.0 {
            return Err(ConfigError::Invalid(
                "max_velocity must be positive".into(),
            ));
        }
        if self.fall_angle <= 0.0 {
            return Err(ConfigError::Invalid("fall_angle must be positive".into()));
        }
        if self.start_angle.abs() >= self.fall_angle {
            return Err(ConfigError::Invalid(
                "start_angle must lie inside the fall limit".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read trial file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse trial file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid trial parameter: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_validation_harness() {
        let t = Trial::default();
        assert_eq!(t.accel_k, 4.0);
        assert_eq!(t.start_angle, -5.0);
        assert_eq!(t.start_velocity, 0.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn partial_yaml_fills_in_defaults() {
        let t = Trial::from_yaml_str("accel_k: 8.0\nstart_angle: 5.0\n").unwrap();
        assert_eq!(t.accel_k, 8.0);
        assert_eq!(t.start_angle, 5.0);
        assert_eq!(t.max_velocity, 60.0);
    }

    #[test]
    fn control_mode_parses() {
        let t = Trial::from_yaml_str("control_mode: Acceleration\njoystick_gain: 1.5\n").unwrap();
        assert_eq!(t.control_mode, ControlMode::Acceleration);
        assert_eq!(t.joystick_gain, 1.5);
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            Trial::from_yaml_str("accel_q: 4.0\n"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn nonpositive_limits_are_rejected() {
        assert!(matches!(
            Trial::from_yaml_str("max_velocity: 0.0\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Trial::from_yaml_str("fall_angle: -10.0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn start_beyond_fall_limit_is_rejected() {
        assert!(matches!(
            Trial::from_yaml_str("start_angle: 70.0\n"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
