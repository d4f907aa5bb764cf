//! Locomotion tuning values.
//!
//! Set once when the controller is built (or swapped wholesale through
//! `FirstPersonController::set_config`); the per-tick logic only reads them.

use serde::{Deserialize, Serialize};

use crate::player::*;

/// Tuning for a first-person character.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Horizontal speed in units per second.
    pub move_speed: f32,
    /// Signed vertical acceleration in units/s² (negative pulls down).
    pub gravity: f32,
    /// Degrees of look rotation per pointer unit per second.
    pub look_sensitivity: f32,
    /// Max degrees the camera may look away from the body while not walking forward.
    pub max_head_turn: f32,
    /// Body turn rate in degrees per second.
    pub body_turn_speed: f32,
    /// Vertical velocity snapped to while grounded and falling.
    pub grounded_vertical_velocity: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: DEFAULT_MOVE_SPEED,
            gravity: DEFAULT_GRAVITY,
            look_sensitivity: DEFAULT_LOOK_SENSITIVITY,
            max_head_turn: DEFAULT_MAX_HEAD_TURN,
            body_turn_speed: DEFAULT_BODY_TURN_SPEED,
            grounded_vertical_velocity: DEFAULT_GROUNDED_VERTICAL_VELOCITY,
        }
    }
}

impl LocomotionConfig {
    /// Check that every value is usable.
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("look_sensitivity", self.look_sensitivity),
            ("max_head_turn", self.max_head_turn),
            ("body_turn_speed", self.body_turn_speed),
            ("grounded_vertical_velocity", self.grounded_vertical_velocity),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(format!("{name} must be finite (got {value})"));
            }
        }

        for (name, value) in [
            ("move_speed", self.move_speed),
            ("look_sensitivity", self.look_sensitivity),
            ("body_turn_speed", self.body_turn_speed),
        ] {
            if value < 0.0 {
                return Err(format!("{name} must not be negative (got {value})"));
            }
        }

        if !(0.0..=180.0).contains(&self.max_head_turn) {
            return Err(format!(
                "max_head_turn must be within [0, 180] degrees (got {})",
                self.max_head_turn
            ));
        }

        // Must stay negative so the next sweep still reaches the ground
        if self.grounded_vertical_velocity >= 0.0 {
            return Err(format!(
                "grounded_vertical_velocity must be negative (got {})",
                self.grounded_vertical_velocity
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(LocomotionConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = LocomotionConfig {
            move_speed: -1.0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("move_speed"));

        let cfg = LocomotionConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().unwrap_err().contains("gravity"));

        let cfg = LocomotionConfig {
            max_head_turn: 270.0,
            ..Default::default()
        };
        assert!(cfg.validate().unwrap_err().contains("max_head_turn"));

        let cfg = LocomotionConfig {
            grounded_vertical_velocity: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let cfg: LocomotionConfig = ron::from_str("(move_speed: 7.5, max_head_turn: 60.0)").unwrap();
        assert_eq!(cfg.move_speed, 7.5);
        assert_eq!(cfg.max_head_turn, 60.0);
        assert_eq!(cfg.gravity, DEFAULT_GRAVITY);
        assert_eq!(cfg.body_turn_speed, DEFAULT_BODY_TURN_SPEED);
    }
}
