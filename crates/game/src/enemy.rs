//! Enemy decision loop.
//!
//! Each frame an enemy is either chasing the player (inside the aggro
//! radius) or wandering along a direction it re-rolls whenever its cooldown
//! runs out. The decision only produces a direction; movement is left to the
//! physics controller.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EnemyConfig;

/// Which branch an enemy took this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorState {
    Chase,
    Wander,
}

/// Per-enemy wander timer and heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WanderState {
    /// Seconds until a new heading is picked. Expired at or below zero.
    pub cooldown: f32,

    /// Current unit heading `(x, z)`.
    pub direction: Vec2,
}

impl Default for WanderState {
    fn default() -> Self {
        Self {
            cooldown: 0.0,
            direction: Vec2::X,
        }
    }
}

/// Result of one think step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub state: BehaviorState,

    /// Desired unit direction `(x, z)`. Zero when standing on the player.
    pub direction: Vec2,

    /// A new wander heading was picked this frame.
    pub retargeted: bool,
}

/// Chase/wander tuning shared by every enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBehavior {
    pub aggro_radius: f32,
    pub cooldown_min: f32,
    pub cooldown_max: f32,
}

impl EnemyBehavior {
    /// Floor on the chase distance used when normalizing.
    const MIN_DISTANCE: f32 = 1e-4;

    pub fn new(config: &EnemyConfig) -> Self {
        Self {
            aggro_radius: config.aggro_radius,
            cooldown_min: config.wander_cooldown_min,
            cooldown_max: config.wander_cooldown_max,
        }
    }

    /// Branch taken for an enemy at `enemy` with the player at `player`.
    pub fn classify(&self, enemy: Vec2, player: Vec2) -> BehaviorState {
        if enemy.distance(player) < self.aggro_radius {
            BehaviorState::Chase
        } else {
            BehaviorState::Wander
        }
    }

    /// Run one frame of the decision loop.
    ///
    /// The wander cooldown ticks down every frame, chasing included.
    pub fn think<R: Rng + ?Sized>(
        &self,
        wander: &mut WanderState,
        enemy: Vec2,
        player: Vec2,
        delta_time: f32,
        rng: &mut R,
    ) -> Decision {
        wander.cooldown -= delta_time;

        match self.classify(enemy, player) {
            BehaviorState::Chase => {
                let offset = player - enemy;
                let distance = offset.length().max(Self::MIN_DISTANCE);
                Decision {
                    state: BehaviorState::Chase,
                    direction: offset / distance,
                    retargeted: false,
                }
            }
            BehaviorState::Wander => {
                let retargeted = wander.cooldown <= 0.0;
                if retargeted {
                    wander.cooldown = rng.gen_range(self.cooldown_min..self.cooldown_max);
                    let angle = rng.gen_range(0.0..TAU);
                    let (sin, cos) = angle.sin_cos();
                    wander.direction = Vec2::new(cos, sin);
                }
                Decision {
                    state: BehaviorState::Wander,
                    direction: wander.direction,
                    retargeted,
                }
            }
        }
    }
}
