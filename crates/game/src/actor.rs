//! Actors and the roster that owns them.
//!
//! Actors are never removed during a session. Defeat is a state change, so
//! an [`ActorId`] stays valid for the life of the [`Roster`].

use std::ops::{Index, IndexMut};

use glam::Vec3;
use gridfire_physics::{MovementFlags, MovementState};
use serde::{Deserialize, Serialize};

use crate::enemy::WanderState;
use crate::hitbox::HitVolume;

/// Stable handle to an actor in a [`Roster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an actor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Enemy,
}

/// Outcome of applying damage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health actually removed.
    pub dealt: i32,

    /// Health left afterwards.
    pub remaining: i32,

    /// This hit took the actor to zero.
    pub defeated: bool,
}

/// A player or enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,

    /// Movement physics state.
    pub movement: MovementState,

    /// Current health, `0..=max_health`.
    pub health: i32,

    pub max_health: i32,

    /// Feet to crown (meters).
    pub height: f32,

    /// Hit volumes, empty for actors that cannot be shot.
    pub volumes: Vec<HitVolume>,

    /// Wander timer and direction (enemies only).
    pub wander: Option<WanderState>,
}

impl Actor {
    /// Create a full-health actor at `position`.
    pub fn new(id: ActorId, kind: ActorKind, position: Vec3, max_health: i32, height: f32) -> Self {
        Self {
            id,
            kind,
            movement: MovementState::new(position),
            health: max_health,
            max_health,
            height,
            volumes: Vec::new(),
            wander: match kind {
                ActorKind::Enemy => Some(WanderState::default()),
                ActorKind::Player => None,
            },
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.movement.position
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    /// Apply damage, clamping health at zero.
    ///
    /// Defeated actors take no further damage.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_defeated() {
            return DamageOutcome::default();
        }

        let before = self.health;
        self.health = (self.health - amount.max(0)).max(0);

        let defeated = self.health == 0;
        if defeated {
            self.defeat();
        }

        DamageOutcome {
            dealt: before - self.health,
            remaining: self.health,
            defeated,
        }
    }

    fn defeat(&mut self) {
        self.health = 0;
        self.movement.flags.set(MovementFlags::DEAD, true);
    }
}

/// Arena of actors addressed by [`ActorId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the next spawned actor will get.
    pub fn next_id(&self) -> ActorId {
        ActorId(self.actors.len() as u32)
    }

    /// Add an actor built by `build` and return its handle.
    pub fn spawn(&mut self, build: impl FnOnce(ActorId) -> Actor) -> ActorId {
        let id = self.next_id();
        self.actors.push(build(id));
        id
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Non-defeated actors of `kind`.
    pub fn alive_count(&self, kind: ActorKind) -> usize {
        self.actors
            .iter()
            .filter(|a| a.kind == kind && a.is_alive())
            .count()
    }
}

impl Index<ActorId> for Roster {
    type Output = Actor;

    fn index(&self, id: ActorId) -> &Actor {
        &self.actors[id.index()]
    }
}

impl IndexMut<ActorId> for Roster {
    fn index_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id.index()]
    }
}
