//! Collision world built from the static tile grid.
//!
//! Horizontal blocking is answered straight from the grid. Ray queries
//! against walls treat every wall cell as a solid box brush.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::SharedShape;

use super::grid::{Cell, Grid};
use super::trace::WallHit;

/// Offsets sampled around a circle, in units of its radius.
///
/// Four diagonal corners of the bounding square followed by the four
/// cardinal points. Corner samples sit at `radius * sqrt(2)` from the centre.
const CIRCLE_SAMPLES: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (1.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (0.0, 1.0),
];

/// A wall cell's box brush for ray queries.
#[derive(Debug, Clone)]
struct WallBrush {
    cell: Cell,
    shape: SharedShape,
    transform: Isometry<Real>,
}

/// The collision world: the grid plus one brush per wall cell.
///
/// # Thread Safety
///
/// Immutable after construction and can be shared across threads for
/// parallel queries.
#[derive(Debug, Clone)]
pub struct CollisionWorld {
    grid: Grid,
    wall_height: f32,
    brushes: Vec<WallBrush>,
}

impl CollisionWorld {
    /// Create a collision world whose walls rise `wall_height` above the floor.
    pub fn new(grid: Grid, wall_height: f32) -> Self {
        let half = grid.tile_size() / 2.0;
        let shape = SharedShape::cuboid(half, wall_height / 2.0, half);

        let brushes: Vec<WallBrush> = grid
            .walls()
            .map(|cell| {
                let (x, z) = grid.to_world(cell);
                WallBrush {
                    cell,
                    shape: shape.clone(),
                    transform: Isometry::translation(x, wall_height / 2.0, z),
                }
            })
            .collect();

        log::debug!(
            "collision world {}x{} tiles, {} wall brushes",
            grid.width(),
            grid.height(),
            brushes.len()
        );

        Self {
            grid,
            wall_height,
            brushes,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn wall_height(&self) -> f32 {
        self.wall_height
    }

    /// Whether the cell containing `(x, z)` is a wall or outside the grid.
    pub fn is_blocked(&self, x: f32, z: f32) -> bool {
        self.grid.is_wall(self.grid.to_grid(x, z))
    }

    /// Sampled circle-vs-grid test.
    ///
    /// Checks eight points at `radius` around the centre (four diagonal,
    /// four axis-aligned). The centre itself is not sampled.
    pub fn circle_collides(&self, x: f32, z: f32, radius: f32) -> bool {
        CIRCLE_SAMPLES
            .iter()
            .any(|&(ox, oz)| self.is_blocked(x + ox * radius, z + oz * radius))
    }

    /// Find a spot for a circle near `(x, z)`.
    ///
    /// Returns the position unchanged when it is already clear. Otherwise
    /// searches rings of cells around the containing cell and returns the
    /// nearest clear cell centre, or `None` if the grid has no room.
    pub fn resolve_spawn(&self, x: f32, z: f32, radius: f32) -> Option<(f32, f32)> {
        if !self.circle_collides(x, z, radius) {
            return Some((x, z));
        }

        let start = self.grid.to_grid(x, z);
        let start = Cell::new(
            start.row.clamp(0, self.grid.height() as i32 - 1),
            start.col.clamp(0, self.grid.width() as i32 - 1),
        );
        let max_ring = self.grid.width().max(self.grid.height()) as i32;

        for ring in 0..=max_ring {
            let mut best: Option<((f32, f32), f32)> = None;

            for row in (start.row - ring)..=(start.row + ring) {
                for col in (start.col - ring)..=(start.col + ring) {
                    let on_ring = (row - start.row).abs() == ring || (col - start.col).abs() == ring;
                    let cell = Cell::new(row, col);
                    if !on_ring || self.grid.is_wall(cell) {
                        continue;
                    }

                    let (cx, cz) = self.grid.to_world(cell);
                    if self.circle_collides(cx, cz, radius) {
                        continue;
                    }

                    let dist_sq = (cx - x).powi(2) + (cz - z).powi(2);
                    if best.map_or(true, |(_, d)| dist_sq < d) {
                        best = Some(((cx, cz), dist_sq));
                    }
                }
            }

            if let Some((position, _)) = best {
                return Some(position);
            }
        }

        None
    }

    /// Cast a ray against the wall brushes and return the nearest hit.
    ///
    /// `direction` does not need to be normalized; a zero direction never hits.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<WallHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<(f32, Cell)> = None;
        for brush in &self.brushes {
            if let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) {
                if closest.map_or(true, |(best, _)| toi < best) {
                    closest = Some((toi, brush.cell));
                }
            }
        }

        closest.map(|(distance, cell)| WallHit {
            distance,
            point: origin + dir * distance,
            cell,
        })
    }

    /// Distance to the nearest wall along a ray, or infinity if none.
    pub fn wall_distance(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> f32 {
        self.raycast(origin, direction, max_distance)
            .map_or(f32::INFINITY, |hit| hit.distance)
    }
}
