//! Collision against the static tile grid.
//!
//! # Key Types
//!
//! - [`Grid`]: rectangular array of open/wall cells plus the tile size
//! - [`CollisionWorld`]: point, circle and ray queries against the grid
//! - [`WallHit`]: nearest wall intersection along a ray
//!
//! # Coordinates
//!
//! World X runs along grid columns and world Z along grid rows. The world
//! origin is the centre of the grid; anything outside the grid is solid.

mod grid;
mod trace;
mod world;

pub use grid::{Cell, CellKind, Grid, GridError};
pub use trace::WallHit;
pub use world::CollisionWorld;
