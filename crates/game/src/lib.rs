//! Gridfire Game Logic
//!
//! This crate contains the arena simulation on top of `gridfire-physics`:
//!
//! - Static configuration and validation
//! - The actor roster (one player, a fixed set of enemies)
//! - Enemy chase/wander decisions
//! - Hit-scan combat against per-enemy hit volumes
//! - Structured events for an injected sink
//!
//! # Architecture
//!
//! Every frame runs to completion in a fixed order and hands back a settled
//! [`Snapshot`]. The only random input is the wander heading, drawn from a
//! caller-supplied RNG.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Simulation::tick                         │
//! │  ┌────────────┐   ┌──────────────┐   ┌──────────┐   ┌──────────┐ │
//! │  │ Enemy      │──►│ Movement     │──►│ Combat   │──►│ Snapshot │ │
//! │  │ behaviour  │   │ (player, then│   │ (weapon, │   │ + events │ │
//! │  └────────────┘   │  enemies)    │   │  ray)    │   └──────────┘ │
//! │                   └──────┬───────┘   └────┬─────┘                │
//! │                          ▼                ▼                      │
//! │                   ┌─────────────────────────────┐                │
//! │                   │ CollisionWorld (tile grid)  │                │
//! │                   └─────────────────────────────┘                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

pub mod actor;
pub mod combat;
pub mod config;
pub mod enemy;
pub mod events;
pub mod hitbox;
pub mod input;
pub mod simulation;

// Re-export main types
pub use actor::{Actor, ActorId, ActorKind, Roster};
pub use combat::{CombatResolver, ShotResult, Weapon};
pub use config::{ConfigError, SimulationConfig};
pub use enemy::{BehaviorState, EnemyBehavior, WanderState};
pub use events::{EventSink, LogSink, NullSink, SimEvent};
pub use hitbox::{classify_hit_zone, HitVolume, HitZone};
pub use input::FrameInput;
pub use simulation::{ActorView, Simulation, Snapshot};

// Re-export physics types for convenience
pub use gridfire_physics::{CollisionWorld, Grid, MovementConfig, MovementState};
