//! Movement state and per-frame commands.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::basis::{aim_direction, forward_vector};

/// Flags describing a mover's current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFlags(pub u8);

impl MovementFlags {
    /// Resting on the ground plane.
    pub const ON_GROUND: u8 = 1 << 0;

    /// Defeated; the mover no longer moves.
    pub const DEAD: u8 = 1 << 1;

    /// Check if a flag is set.
    #[inline]
    pub fn has(self, flag: u8) -> bool {
        (self.0 & flag) != 0
    }

    /// Set or clear a flag.
    #[inline]
    pub fn set(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline]
    pub fn on_ground(self) -> bool {
        self.has(Self::ON_GROUND)
    }

    #[inline]
    pub fn can_move(self) -> bool {
        !self.has(Self::DEAD)
    }
}

/// Complete movement state for one mover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementState {
    /// Feet position. `x`/`z` span the floor plane, `y` is height above it.
    pub position: Vec3,

    /// Vertical velocity (meters/second).
    pub velocity_y: f32,

    /// Horizontal facing in radians. Zero faces world -Z.
    pub yaw: f32,

    /// Vertical look angle in radians, positive looks up.
    pub pitch: f32,

    /// State flags.
    pub flags: MovementFlags,
}

impl Default for MovementState {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl MovementState {
    /// Create a grounded state at `position` projected onto the floor.
    pub fn new(position: Vec3) -> Self {
        Self {
            position: Vec3::new(position.x, 0.0, position.z),
            velocity_y: 0.0,
            yaw: 0.0,
            pitch: 0.0,
            flags: MovementFlags(MovementFlags::ON_GROUND),
        }
    }

    #[inline]
    pub fn on_ground(&self) -> bool {
        self.flags.on_ground()
    }

    /// Horizontal position as `(x, z)`.
    #[inline]
    pub fn planar(&self) -> Vec2 {
        Vec2::new(self.position.x, self.position.z)
    }

    /// Eye position for a given eye height.
    pub fn eye_position(&self, eye_height: f32) -> Vec3 {
        self.position + Vec3::new(0.0, eye_height, 0.0)
    }

    /// Unit aim direction from yaw and pitch.
    pub fn look_direction(&self) -> Vec3 {
        aim_direction(self.yaw, self.pitch)
    }

    /// Horizontal facing as a unit `(x, z)` vector.
    pub fn forward_direction(&self) -> Vec2 {
        forward_vector(self.yaw)
    }
}

/// Input for one movement update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Forward/back axis in `[-1, 1]`, positive is forward.
    pub forward: f32,

    /// Strafe axis in `[-1, 1]`, positive is right.
    pub strafe: f32,

    /// Accumulated look delta `(dx, dy)` in device units.
    pub look_delta: (f32, f32),

    /// Jump request (edge-triggered by the caller).
    pub jump: bool,
}

impl MoveCommand {
    /// Check if any movement axis is active.
    pub fn has_movement(&self) -> bool {
        self.forward != 0.0 || self.strafe != 0.0
    }
}

/// What happened during one movement update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// At least one sub-step was stopped on the X axis.
    pub blocked_x: bool,

    /// At least one sub-step was stopped on the Z axis.
    pub blocked_z: bool,

    /// A jump started this update.
    pub jumped: bool,

    /// The mover touched down this update.
    pub landed: bool,
}

impl MoveReport {
    /// Check if either axis was blocked.
    #[inline]
    pub fn blocked(&self) -> bool {
        self.blocked_x || self.blocked_z
    }
}
