//! Ray query results.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Nearest wall intersection along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallHit {
    /// Distance from the ray origin to the impact point.
    pub distance: f32,

    /// Impact point in world space.
    pub point: Vec3,

    /// Grid cell of the wall that was hit.
    pub cell: Cell,
}
