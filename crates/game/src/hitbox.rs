//! Hit zones and the volumes that carry them.
//!
//! Every enemy owns a handful of [`HitVolume`]s placed relative to its feet.
//! A volume either carries a fixed [`HitZone`] tag or leaves the zone to be
//! classified from the hit height.

use glam::{Quat, Vec3};
use parry3d::math::{Isometry, Real, Vector};
use parry3d::query::{Ray, RayCast};
use parry3d::shape::{Ball, Cuboid, Cylinder};
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

/// Normalized height at or above which a hit counts as a head shot.
pub const HEAD_THRESHOLD: f32 = 0.85;

/// Normalized height at or above which a hit counts as a body shot.
pub const BODY_THRESHOLD: f32 = 0.45;

/// Damage zone of a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitZone {
    Head,
    Body,
    Other,
}

impl HitZone {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Body => "body",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for HitZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a normalized hit height in `[0, 1]` (feet to crown).
pub fn classify_hit_zone(normalized_height: f32) -> HitZone {
    if normalized_height >= HEAD_THRESHOLD {
        HitZone::Head
    } else if normalized_height >= BODY_THRESHOLD {
        HitZone::Body
    } else {
        HitZone::Other
    }
}

/// Normalize a hit height against a total height, clamped to `[0, 1]`.
pub fn normalized_height(hit_y: f32, total_height: f32) -> f32 {
    if !(total_height > 0.0) {
        return 0.0;
    }
    (hit_y / total_height).clamp(0.0, 1.0)
}

/// Shape of a hit volume, centred on its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HitShape {
    /// Sphere.
    Ball { radius: f32 },

    /// Vertical capsule; `half_height` is half the cylinder length.
    Capsule { half_height: f32, radius: f32 },

    /// Box with the given half-extents.
    Cuboid { half_extents: Vec3 },
}

impl HitShape {
    fn cast(&self, transform: &Isometry<Real>, ray: &Ray, max_distance: f32) -> Option<f32> {
        match *self {
            Self::Ball { radius } => Ball::new(radius).cast_ray(transform, ray, max_distance, true),
            // Cast as a cylinder plus two end balls: a single capsule cast
            // misses rays lying in the plane of a segment end.
            Self::Capsule { half_height, radius } => {
                let ball = Ball::new(radius);
                let end = |y: Real| {
                    let at = transform * Isometry::translation(0.0, y, 0.0);
                    ball.cast_ray(&at, ray, max_distance, true)
                };
                let side = if half_height > 0.0 {
                    Cylinder::new(half_height, radius).cast_ray(transform, ray, max_distance, true)
                } else {
                    None
                };
                [end(half_height), end(-half_height), side]
                    .into_iter()
                    .flatten()
                    .reduce(f32::min)
            }
            Self::Cuboid { half_extents } => {
                Cuboid::new(Vector::new(half_extents.x, half_extents.y, half_extents.z))
                    .cast_ray(transform, ray, max_distance, true)
            }
        }
    }
}

/// A named sub-region of an actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitVolume {
    /// Volume name, e.g. `"head"`.
    pub name: String,

    /// Collision shape.
    pub shape: HitShape,

    /// Centre relative to the owner's feet, in the owner's facing frame.
    pub offset: Vec3,

    /// Fixed zone tag. `None` falls back to height classification.
    pub zone: Option<HitZone>,

    /// Owning actor.
    pub owner: ActorId,
}

impl HitVolume {
    pub fn new(
        name: impl Into<String>,
        shape: HitShape,
        offset: Vec3,
        zone: Option<HitZone>,
        owner: ActorId,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            offset,
            zone,
            owner,
        }
    }

    /// World transform for an owner standing at `position` facing `yaw`.
    pub fn world_transform(&self, position: Vec3, yaw: f32) -> Isometry<Real> {
        let rotation = Quat::from_rotation_y(-yaw);
        let centre = position + rotation * self.offset;
        Isometry::new(
            Vector::new(centre.x, centre.y, centre.z),
            Vector::y() * -yaw,
        )
    }

    /// Distance along `ray` to this volume, if hit within `max_distance`.
    pub fn cast_ray(&self, position: Vec3, yaw: f32, ray: &Ray, max_distance: f32) -> Option<f32> {
        let transform = self.world_transform(position, yaw);
        self.shape.cast(&transform, ray, max_distance)
    }
}

/// Proportions of the default enemy body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPlan {
    /// Body capsule radius.
    pub radius: f32,
    /// Body capsule length, end caps included.
    pub body_height: f32,
    /// Feet to crown.
    pub total_height: f32,
    /// Head sphere radius.
    pub head_radius: f32,
}

impl BodyPlan {
    /// Gap between the floor and the bottom of the body capsule.
    const BODY_LIFT: f32 = 0.55;
    /// Distance from the crown down to the head centre.
    const HEAD_DROP: f32 = 0.25;
    /// Legs box size (width, height, depth).
    const LEGS: Vec3 = Vec3::new(0.7, 0.7, 0.4);

    /// Build the head, body and legs volumes for `owner`.
    pub fn volumes(&self, owner: ActorId) -> Vec<HitVolume> {
        vec![
            HitVolume::new(
                "body",
                HitShape::Capsule {
                    half_height: (self.body_height / 2.0 - self.radius).max(0.0),
                    radius: self.radius,
                },
                Vec3::new(0.0, self.body_height / 2.0 + Self::BODY_LIFT, 0.0),
                Some(HitZone::Body),
                owner,
            ),
            HitVolume::new(
                "head",
                HitShape::Ball {
                    radius: self.head_radius,
                },
                Vec3::new(0.0, self.total_height - Self::HEAD_DROP, 0.0),
                Some(HitZone::Head),
                owner,
            ),
            HitVolume::new(
                "legs",
                HitShape::Cuboid {
                    half_extents: Self::LEGS / 2.0,
                },
                Vec3::new(0.0, Self::LEGS.y / 2.0, 0.0),
                Some(HitZone::Other),
                owner,
            ),
        ]
    }
}
