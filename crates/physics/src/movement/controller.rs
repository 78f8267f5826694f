//! Movement controller.
//!
//! This is the entry point for moving anything across the grid. It takes
//! input commands (or a steering direction) and updates a [`MovementState`]
//! through the collision world.

use glam::Vec2;

use crate::collision::CollisionWorld;

use super::basis::{wish_velocity, yaw_from_direction};
use super::config::MovementConfig;
use super::state::{MoveCommand, MoveReport, MovementFlags, MovementState};

/// Movement controller.
///
/// Handles:
/// - Look updates with pitch clamping
/// - Axis-separated walking with fixed-length sub-steps
/// - Jumping and gravity
///
/// # Example
///
/// ```ignore
/// let controller = MovementController::new(MovementConfig::player());
/// let mut state = MovementState::new(spawn_position);
///
/// // Each frame:
/// let report = controller.update(&mut state, &command, &world, delta_time);
/// ```
#[derive(Debug, Clone)]
pub struct MovementController {
    /// Movement configuration.
    pub config: MovementConfig,
}

impl MovementController {
    /// Create a new controller with the given configuration.
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Update a player-style mover for one frame.
    ///
    /// Order: look, walk, jump, gravity.
    pub fn update(
        &self,
        state: &mut MovementState,
        command: &MoveCommand,
        world: &CollisionWorld,
        delta_time: f32,
    ) -> MoveReport {
        let mut report = MoveReport::default();
        if !state.flags.can_move() {
            return report;
        }

        self.update_look(state, command.look_delta);

        if command.has_movement() {
            let velocity = wish_velocity(
                state.yaw,
                command.strafe,
                command.forward,
                self.config.move_speed,
            );
            let walked = self.walk(state, world, velocity * delta_time);
            report.blocked_x = walked.blocked_x;
            report.blocked_z = walked.blocked_z;
        }

        if command.jump {
            report.jumped = self.try_jump(state);
        }

        report.landed = self.apply_gravity(state, delta_time);
        report
    }

    /// Move along a planar direction at the configured speed.
    ///
    /// Facing is turned toward `direction` even when the move is blocked.
    /// A zero direction leaves the mover untouched.
    pub fn steer(
        &self,
        state: &mut MovementState,
        direction: Vec2,
        world: &CollisionWorld,
        delta_time: f32,
    ) -> MoveReport {
        if !state.flags.can_move() || direction == Vec2::ZERO {
            return MoveReport::default();
        }

        state.yaw = yaw_from_direction(direction);
        self.walk(state, world, direction * self.config.move_speed * delta_time)
    }

    // ========================================================================
    // View Angles
    // ========================================================================

    /// Apply an accumulated look delta.
    ///
    /// Positive `dx` turns right, positive `dy` looks down.
    pub fn update_look(&self, state: &mut MovementState, look_delta: (f32, f32)) {
        let (dx, dy) = look_delta;
        let sensitivity = self.config.look_sensitivity;

        state.yaw += dx * sensitivity;
        state.pitch = (state.pitch - dy * sensitivity)
            .clamp(-self.config.pitch_limit, self.config.pitch_limit);
    }

    // ========================================================================
    // Horizontal
    // ========================================================================

    /// Apply a planar displacement with axis-separated collision.
    ///
    /// The displacement is split into sub-steps no longer than
    /// `config.max_step`. In each sub-step X is tried first at the old Z, then
    /// Z at the possibly updated X, so a diagonal push into a wall keeps
    /// sliding along it.
    pub fn walk(&self, state: &mut MovementState, world: &CollisionWorld, displacement: Vec2) -> MoveReport {
        let mut report = MoveReport::default();
        if displacement == Vec2::ZERO || !displacement.is_finite() {
            return report;
        }

        let radius = self.config.radius;
        let steps = self.config.sub_steps(displacement.length());
        let step = displacement / steps as f32;

        for _ in 0..steps {
            if step.x != 0.0 {
                let nx = state.position.x + step.x;
                if world.circle_collides(nx, state.position.z, radius) {
                    report.blocked_x = true;
                } else {
                    state.position.x = nx;
                }
            }

            if step.y != 0.0 {
                let nz = state.position.z + step.y;
                if world.circle_collides(state.position.x, nz, radius) {
                    report.blocked_z = true;
                } else {
                    state.position.z = nz;
                }
            }
        }

        report
    }

    // ========================================================================
    // Vertical
    // ========================================================================

    /// Start a jump if grounded. Returns whether a jump started.
    pub fn try_jump(&self, state: &mut MovementState) -> bool {
        if !self.config.vertical_motion || !state.on_ground() {
            return false;
        }

        state.velocity_y = self.config.jump_velocity;
        state.flags.set(MovementFlags::ON_GROUND, false);
        true
    }

    /// Integrate gravity while airborne. Returns whether the mover landed.
    pub fn apply_gravity(&self, state: &mut MovementState, delta_time: f32) -> bool {
        if !self.config.vertical_motion || state.on_ground() {
            return false;
        }

        state.velocity_y -= self.config.gravity * delta_time;
        state.position.y += state.velocity_y * delta_time;

        if state.position.y <= 0.0 {
            state.position.y = 0.0;
            state.velocity_y = 0.0;
            state.flags.set(MovementFlags::ON_GROUND, true);
            return true;
        }

        false
    }
}

// ============================================================================
// Tests
// ============================================================================
