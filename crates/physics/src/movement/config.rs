//! Movement configuration constants.
//!
//! One config describes one kind of mover. Players use the full set;
//! ground-locked movers (enemies) ignore the vertical parameters.

use serde::{Deserialize, Serialize};

/// Configuration for a mover on the tile grid.
///
/// All values use metric units (meters, seconds, radians) unless noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementConfig {
    // ========================================================================
    // Body
    // ========================================================================
    /// Collision circle radius (meters).
    pub radius: f32,

    /// Eye height above the feet (meters).
    pub eye_height: f32,

    // ========================================================================
    // Horizontal
    // ========================================================================
    /// Top horizontal speed (meters/second).
    pub move_speed: f32,

    /// Longest displacement tested against the grid in one sub-step (meters).
    pub max_step: f32,

    // ========================================================================
    // Vertical
    // ========================================================================
    /// Whether gravity and jumping apply at all.
    pub vertical_motion: bool,

    /// Gravity acceleration (meters/second²).
    pub gravity: f32,

    /// Upward velocity applied by a jump (meters/second).
    pub jump_velocity: f32,

    // ========================================================================
    // Look
    // ========================================================================
    /// Radians of rotation per unit of look delta.
    pub look_sensitivity: f32,

    /// Pitch is clamped to `[-pitch_limit, pitch_limit]`.
    pub pitch_limit: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self::player()
    }
}

impl MovementConfig {
    /// Player defaults.
    pub fn player() -> Self {
        Self {
            radius: 0.35,
            eye_height: 1.65,
            move_speed: 7.5,
            max_step: 0.08,
            vertical_motion: true,
            gravity: 18.0,
            jump_velocity: 7.0,
            look_sensitivity: 0.0019,
            pitch_limit: 1.2,
        }
    }

    /// A ground-locked mover with no jump or gravity.
    pub fn ground_locked(radius: f32, move_speed: f32) -> Self {
        Self {
            radius,
            move_speed,
            vertical_motion: false,
            gravity: 0.0,
            jump_velocity: 0.0,
            look_sensitivity: 0.0,
            ..Self::player()
        }
    }

    /// Number of sub-steps needed to cover `distance`.
    pub fn sub_steps(&self, distance: f32) -> u32 {
        if !(distance > 0.0) || !(self.max_step > 0.0) {
            return 1;
        }
        (distance / self.max_step).ceil().max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MovementConfig::default();
        assert!(config.move_speed > 0.0);
        assert!(config.gravity > 0.0);
        assert!(config.radius > 0.0);
        assert!(config.vertical_motion);
    }

    #[test]
    fn test_ground_locked() {
        let config = MovementConfig::ground_locked(0.45, 2.1);
        assert!(!config.vertical_motion);
        assert_eq!(config.radius, 0.45);
        assert_eq!(config.move_speed, 2.1);
        assert_eq!(config.max_step, MovementConfig::player().max_step);
    }

    #[test]
    fn test_sub_steps() {
        let config = MovementConfig::player();
        assert_eq!(config.sub_steps(0.0), 1);
        assert_eq!(config.sub_steps(0.08), 1);
        assert_eq!(config.sub_steps(0.081), 2);
        assert_eq!(config.sub_steps(0.375), 5);
    }
}
