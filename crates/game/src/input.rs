//! Per-frame host input.
//!
//! The host samples its devices however it likes and hands the simulation
//! one [`FrameInput`] per frame. It gets converted to a [`MoveCommand`] for
//! the physics system.

use gridfire_physics::MoveCommand;
use serde::{Deserialize, Serialize};

/// Host input for a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Elapsed time since the previous frame (seconds).
    pub delta_time: f32,

    /// Forward/back axis, positive is forward.
    pub forward: f32,

    /// Strafe axis, positive is right.
    pub strafe: f32,

    /// Look delta accumulated since the previous frame (device units).
    pub look_delta: (f32, f32),

    /// Jump request. The host clears it after one frame.
    pub jump: bool,

    /// Fire button held.
    pub fire: bool,
}

fn clamp_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl FrameInput {
    /// Idle input for a frame of `delta_time` seconds.
    pub fn idle(delta_time: f32) -> Self {
        Self {
            delta_time,
            ..Default::default()
        }
    }

    /// Convert to a physics command.
    ///
    /// Axes are clamped to `[-1, 1]` and non-finite values are dropped.
    pub fn to_command(&self) -> MoveCommand {
        MoveCommand {
            forward: clamp_axis(self.forward),
            strafe: clamp_axis(self.strafe),
            look_delta: (
                finite_or_zero(self.look_delta.0),
                finite_or_zero(self.look_delta.1),
            ),
            jump: self.jump,
        }
    }

    /// Check if any movement axis is active.
    pub fn has_movement(&self) -> bool {
        self.to_command().has_movement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_to_command() {
        let input = FrameInput {
            delta_time: 0.016,
            forward: 1.0,
            strafe: -1.0,
            look_delta: (3.0, -2.0),
            jump: true,
            fire: true,
        };
        let cmd = input.to_command();
        assert_eq!(cmd.forward, 1.0);
        assert_eq!(cmd.strafe, -1.0);
        assert_eq!(cmd.look_delta, (3.0, -2.0));
        assert!(cmd.jump);
    }

    #[test]
    fn test_axes_are_clamped() {
        let input = FrameInput {
            forward: 4.0,
            strafe: f32::NAN,
            look_delta: (f32::INFINITY, 1.0),
            ..FrameInput::idle(0.016)
        };
        let cmd = input.to_command();
        assert_eq!(cmd.forward, 1.0);
        assert_eq!(cmd.strafe, 0.0);
        assert_eq!(cmd.look_delta, (0.0, 1.0));
    }

    #[test]
    fn test_idle_has_no_movement() {
        assert!(!FrameInput::idle(0.016).has_movement());
    }
}
