//! Movement integration on the tile grid.
//!
//! This module implements:
//!
//! - Look updates from accumulated deltas, with pitch clamping
//! - Axis-separated horizontal movement in fixed-length sub-steps
//! - Jumping and constant-gravity falling onto a flat floor
//!
//! # Design
//!
//! Movement is driven by the [`MovementController`], which takes a
//! [`MoveCommand`] (or a steering direction) and updates a
//! [`MovementState`] through the collision world.
//!
//! Everything is deterministic: the same inputs always produce the same
//! outputs.

mod basis;
mod config;
mod controller;
mod state;

pub use basis::{aim_direction, forward_vector, right_vector, wish_velocity, yaw_from_direction};
pub use config::MovementConfig;
pub use controller::MovementController;
pub use state::{MoveCommand, MoveReport, MovementFlags, MovementState};
