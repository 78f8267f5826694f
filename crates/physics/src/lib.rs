//! Gridfire Physics
//!
//! Collision and movement for an arena laid out on a static tile grid.
//!
//! # Architecture
//!
//! - **Collision**: point, circle and ray queries against the grid
//! - **Movement**: turns input axes and gravity into new positions, using
//!   collision queries for axis-separated blocking
//!
//! # Design Principles
//!
//! 1. **Determinism**: Same inputs always produce same outputs
//! 2. **Fail-safe bounds**: Anything outside the grid is solid
//! 3. **Cheap queries**: Sampled circle tests, no full rigid-body dynamics

pub mod collision;
pub mod movement;

// Re-export commonly used types
pub use collision::{Cell, CellKind, CollisionWorld, Grid, GridError, WallHit};
pub use movement::{
    MoveCommand, MoveReport, MovementConfig, MovementController, MovementFlags, MovementState,
};
