//! Hit-scan combat.
//!
//! A shot is a single ray from the shooter's eye. Walls are tested once to
//! find the occlusion distance, then every hit volume of every live target
//! is ray-cast with parry and the nearest unoccluded candidate takes the
//! damage.

use glam::Vec3;
use gridfire_physics::CollisionWorld;
use parry3d::math::{Point, Vector};
use parry3d::query::Ray;
use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, Roster};
use crate::config::{DamageTable, WeaponConfig};
use crate::hitbox::{classify_hit_zone, normalized_height, HitZone};

/// Outcome of one fire action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotResult {
    pub hit: bool,
    pub target: Option<ActorId>,
    pub zone: Option<HitZone>,

    /// Health actually removed.
    pub damage: i32,

    /// Distance along the ray to the impact.
    pub distance: Option<f32>,

    /// Target's health after the hit.
    pub remaining_health: Option<i32>,

    /// The hit took the target to zero.
    pub defeated: bool,
}

impl ShotResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            target: None,
            zone: None,
            damage: 0,
            distance: None,
            remaining_health: None,
            defeated: false,
        }
    }
}

/// Nearest eligible intersection found by [`CombatResolver::trace`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetHit {
    pub target: ActorId,
    pub zone: HitZone,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f32,
    target: ActorId,
    volume: usize,
}

/// Resolves a fire action into a hit and applies damage.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatResolver {
    pub damage: DamageTable,
    pub range: f32,
}

impl CombatResolver {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            damage: config.damage,
            range: config.range,
        }
    }

    /// Find what a ray from `origin` along `direction` would hit.
    ///
    /// The shooter and defeated actors are never candidates. A candidate
    /// farther than the nearest wall is occluded.
    pub fn trace(
        &self,
        shooter: ActorId,
        origin: Vec3,
        direction: Vec3,
        world: &CollisionWorld,
        roster: &Roster,
    ) -> Option<TargetHit> {
        let direction = direction.try_normalize()?;
        let wall_distance = world.wall_distance(origin, direction, self.range);

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(direction.x, direction.y, direction.z),
        );

        let mut candidates = Vec::new();
        for actor in roster.iter() {
            if actor.id == shooter || actor.is_defeated() {
                continue;
            }
            let position = actor.position();
            let yaw = actor.movement.yaw;
            for (index, volume) in actor.volumes.iter().enumerate() {
                if let Some(distance) = volume.cast_ray(position, yaw, &ray, self.range) {
                    candidates.push(Candidate {
                        distance,
                        target: volume.owner,
                        volume: index,
                    });
                }
            }
        }
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        for candidate in candidates {
            if candidate.distance > wall_distance {
                continue;
            }
            let Some(actor) = roster.get(candidate.target) else {
                continue;
            };
            if actor.is_defeated() {
                continue;
            }

            let point = origin + direction * candidate.distance;
            let zone = actor.volumes[candidate.volume].zone.unwrap_or_else(|| {
                classify_hit_zone(normalized_height(
                    point.y - actor.position().y,
                    actor.height,
                ))
            });

            return Some(TargetHit {
                target: candidate.target,
                zone,
                distance: candidate.distance,
                point,
            });
        }

        None
    }

    /// Trace a shot and apply its damage.
    pub fn fire(
        &self,
        shooter: ActorId,
        origin: Vec3,
        direction: Vec3,
        world: &CollisionWorld,
        roster: &mut Roster,
    ) -> ShotResult {
        let Some(hit) = self.trace(shooter, origin, direction, world, roster) else {
            return ShotResult::miss();
        };
        let Some(target) = roster.get_mut(hit.target) else {
            return ShotResult::miss();
        };

        let outcome = target.take_damage(self.damage.for_zone(hit.zone));
        ShotResult {
            hit: true,
            target: Some(hit.target),
            zone: Some(hit.zone),
            damage: outcome.dealt,
            distance: Some(hit.distance),
            remaining_health: Some(outcome.remaining),
            defeated: outcome.defeated,
        }
    }
}

/// Fire-rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Seconds between accepted shots.
    pub cooldown: f32,

    /// Seconds until the next shot is accepted.
    pub remaining: f32,
}

impl Weapon {
    pub fn new(cooldown: f32) -> Self {
        Self {
            cooldown,
            remaining: 0.0,
        }
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Advance the cooldown, then accept a shot if `fire_held` and ready.
    pub fn update(&mut self, delta_time: f32, fire_held: bool) -> bool {
        self.remaining = (self.remaining - delta_time).max(0.0);
        if fire_held && self.ready() {
            self.remaining = self.cooldown;
            true
        } else {
            false
        }
    }
}
