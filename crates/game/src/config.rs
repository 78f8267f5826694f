//! Arena configuration.
//!
//! Everything static about a session lives here: the tile map, player and
//! enemy tuning, the weapon, and the frame clamp. The config is plain data
//! with serde derives so hosts can load it however they like; it is checked
//! once by [`SimulationConfig::validate`] before any frame runs.

use glam::Vec2;
use gridfire_physics::{CollisionWorld, Grid, GridError, MovementConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hitbox::{BodyPlan, HitZone};

/// Configuration rejected at load time.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid map: {0}")]
    Grid(#[from] GridError),

    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a non-negative finite number, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("wander cooldown range [{min}, {max}) is empty")]
    EmptyWanderRange { min: f32, max: f32 },

    #[error("damage for {zone} is negative ({value})")]
    NegativeDamage { zone: HitZone, value: i32 },

    #[error("{field} must be at least 1, got {value}")]
    NoHealth { field: &'static str, value: i32 },

    #[error("enemy body height {body} must be below total height {total}")]
    BodyTallerThanEnemy { body: f32, total: f32 },

    #[error("no open floor near spawn ({x}, {z}) for radius {radius}")]
    NoSpawnRoom { x: f32, z: f32, radius: f32 },
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

// ============================================================================
// Map
// ============================================================================

/// Tile map and wall geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Edge length of one square tile (meters).
    pub tile_size: f32,

    /// Height of wall boxes used for shot occlusion (meters).
    pub wall_height: f32,

    /// Row-major tile codes, `0` open and `1` wall. Row 0 is the -Z edge.
    pub tiles: Vec<Vec<u8>>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: 4.0,
            wall_height: 3.2,
            tiles: vec![
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1],
                vec![1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1],
                vec![1, 0, 0, 1, 1, 0, 0, 1, 1, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
                vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            ],
        }
    }
}

impl MapConfig {
    /// Build the tile grid.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::from_codes(&self.tiles, self.tile_size)?)
    }

    /// Build the collision world.
    pub fn build_world(&self) -> Result<CollisionWorld, ConfigError> {
        positive("map.wall_height", self.wall_height)?;
        Ok(CollisionWorld::new(self.grid()?, self.wall_height))
    }
}

// ============================================================================
// Player
// ============================================================================

/// Player tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Movement parameters, shared with the physics crate.
    pub movement: MovementConfig,

    /// Starting and maximum health.
    pub max_health: i32,

    /// Feet to crown, used when the player is a hit target.
    pub height: f32,

    /// Spawn position on the floor plane `(x, z)`.
    pub spawn: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::player(),
            max_health: 100,
            height: 1.8,
            spawn: Vec2::ZERO,
        }
    }
}

impl PlayerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.movement;
        positive("player.radius", m.radius)?;
        positive("player.move_speed", m.move_speed)?;
        positive("player.max_step", m.max_step)?;
        positive("player.gravity", m.gravity)?;
        positive("player.jump_velocity", m.jump_velocity)?;
        positive("player.eye_height", m.eye_height)?;
        positive("player.height", self.height)?;
        non_negative("player.look_sensitivity", m.look_sensitivity)?;
        non_negative("player.pitch_limit", m.pitch_limit)?;
        if self.max_health < 1 {
            return Err(ConfigError::NoHealth {
                field: "player.max_health",
                value: self.max_health,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Enemy
// ============================================================================

/// Enemy tuning and the initial roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Collision circle radius (meters).
    pub radius: f32,

    /// Ground speed (meters/second).
    pub move_speed: f32,

    /// Enemies closer than this to the player chase it.
    pub aggro_radius: f32,

    /// Body capsule cylinder length (meters).
    pub body_height: f32,

    /// Feet to crown (meters).
    pub total_height: f32,

    /// Head sphere radius (meters).
    pub head_radius: f32,

    /// Starting and maximum health.
    pub max_health: i32,

    /// Lower bound of the wander re-think delay (seconds).
    pub wander_cooldown_min: f32,

    /// Exclusive upper bound of the wander re-think delay (seconds).
    pub wander_cooldown_max: f32,

    /// Spawn positions on the floor plane `(x, z)`.
    pub spawns: Vec<Vec2>,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            radius: 0.45,
            move_speed: 2.1,
            aggro_radius: 18.0,
            body_height: 1.1,
            total_height: 1.8,
            head_radius: 0.35,
            max_health: 100,
            wander_cooldown_min: 1.1,
            wander_cooldown_max: 2.9,
            spawns: vec![
                Vec2::new(-10.0, -10.0),
                Vec2::new(10.0, -10.0),
                Vec2::new(-8.0, 10.0),
                Vec2::new(12.0, 12.0),
            ],
        }
    }
}

impl EnemyConfig {
    /// Ground-locked movement config for enemies.
    pub fn movement(&self, max_step: f32) -> MovementConfig {
        MovementConfig {
            max_step,
            ..MovementConfig::ground_locked(self.radius, self.move_speed)
        }
    }

    /// Hit volume proportions.
    pub fn body_plan(&self) -> BodyPlan {
        BodyPlan {
            radius: self.radius,
            body_height: self.body_height,
            total_height: self.total_height,
            head_radius: self.head_radius,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        positive("enemy.radius", self.radius)?;
        positive("enemy.move_speed", self.move_speed)?;
        positive("enemy.aggro_radius", self.aggro_radius)?;
        positive("enemy.body_height", self.body_height)?;
        positive("enemy.total_height", self.total_height)?;
        positive("enemy.head_radius", self.head_radius)?;
        non_negative("enemy.wander_cooldown_min", self.wander_cooldown_min)?;
        if !(self.wander_cooldown_max > self.wander_cooldown_min)
            || !self.wander_cooldown_max.is_finite()
        {
            return Err(ConfigError::EmptyWanderRange {
                min: self.wander_cooldown_min,
                max: self.wander_cooldown_max,
            });
        }
        if self.body_height >= self.total_height {
            return Err(ConfigError::BodyTallerThanEnemy {
                body: self.body_height,
                total: self.total_height,
            });
        }
        if self.max_health < 1 {
            return Err(ConfigError::NoHealth {
                field: "enemy.max_health",
                value: self.max_health,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Weapon
// ============================================================================

/// Damage per hit zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageTable {
    pub head: i32,
    pub body: i32,
    pub other: i32,
}

impl Default for DamageTable {
    fn default() -> Self {
        Self {
            head: 100,
            body: 50,
            other: 20,
        }
    }
}

impl DamageTable {
    /// Damage dealt to `zone`.
    pub fn for_zone(&self, zone: HitZone) -> i32 {
        match zone {
            HitZone::Head => self.head,
            HitZone::Body => self.body,
            HitZone::Other => self.other,
        }
    }
}

/// Hit-scan weapon tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Seconds between accepted shots.
    pub cooldown: f32,

    /// Maximum ray length (meters).
    pub range: f32,

    pub damage: DamageTable,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.35,
            range: 200.0,
            damage: DamageTable::default(),
        }
    }
}

impl WeaponConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("weapon.cooldown", self.cooldown)?;
        positive("weapon.range", self.range)?;
        for zone in [HitZone::Head, HitZone::Body, HitZone::Other] {
            let value = self.damage.for_zone(zone);
            if value < 0 {
                return Err(ConfigError::NegativeDamage { zone, value });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Simulation
// ============================================================================

/// Complete static configuration of one arena session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Longest frame step integrated at once (seconds).
    pub max_delta_time: f32,

    pub map: MapConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub weapon: WeaponConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_delta_time: 0.05,
            map: MapConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            weapon: WeaponConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Check every section, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_delta_time", self.max_delta_time)?;
        positive("map.tile_size", self.map.tile_size)?;
        positive("map.wall_height", self.map.wall_height)?;
        self.map.grid()?;
        self.player.validate()?;
        self.enemy.validate()?;
        self.weapon.validate()?;
        Ok(())
    }

    /// Clamp a host-supplied frame time. Returns `None` when nothing should
    /// be integrated.
    pub fn clamp_delta_time(&self, delta_time: f32) -> Option<f32> {
        if delta_time.is_finite() && delta_time > 0.0 {
            Some(delta_time.min(self.max_delta_time))
        } else {
            None
        }
    }
}
