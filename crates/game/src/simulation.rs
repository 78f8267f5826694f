//! Game simulation - the frame driver.
//!
//! One call to [`Simulation::tick`] advances the whole arena by one frame in
//! a fixed order: enemy decisions, player movement, enemy movement, then
//! weapon fire. The frame runs to completion and the returned [`Snapshot`]
//! is the only view of state a host should read.

use glam::{Vec2, Vec3};
use gridfire_physics::{CollisionWorld, MoveReport, MovementController};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId, ActorKind, Roster};
use crate::combat::{CombatResolver, ShotResult, Weapon};
use crate::config::{ConfigError, SimulationConfig};
use crate::enemy::EnemyBehavior;
use crate::events::{Axis, EventSink, SimEvent};
use crate::input::FrameInput;

/// Render-facing view of one actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    pub kind: ActorKind,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: i32,
    pub defeated: bool,
}

impl From<&Actor> for ActorView {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id,
            kind: actor.kind,
            position: actor.position(),
            yaw: actor.movement.yaw,
            pitch: actor.movement.pitch,
            health: actor.health,
            defeated: actor.is_defeated(),
        }
    }
}

/// Settled state after a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Frames integrated so far.
    pub frame: u64,

    /// Simulation clock (seconds).
    pub time: f64,

    pub player_health: i32,

    /// Enemies not yet defeated.
    pub alive_enemies: usize,

    pub actors: Vec<ActorView>,

    /// Result of the shot fired this frame, if any.
    pub shot: Option<ShotResult>,
}

/// The arena simulation.
///
/// Wander headings are the only random input; pass a seeded `R` through
/// [`Simulation::with_rng`] for reproducible runs.
#[derive(Debug)]
pub struct Simulation<R: Rng = SmallRng> {
    /// Frames integrated so far. Zero-length frames are not counted.
    pub frame: u64,

    /// Simulation clock (seconds).
    pub time: f64,

    config: SimulationConfig,
    world: CollisionWorld,
    roster: Roster,
    player: ActorId,

    player_controller: MovementController,
    enemy_controller: MovementController,
    behavior: EnemyBehavior,
    combat: CombatResolver,
    weapon: Weapon,
    rng: R,

    /// Events raised outside a frame, delivered on the next tick.
    pending: Vec<SimEvent>,
}

impl Simulation<SmallRng> {
    /// Create a simulation seeded from OS entropy.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create a simulation with a fixed seed.
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Validate `config`, build the world and spawn the roster.
    pub fn with_rng(config: SimulationConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let world = config.map.build_world()?;
        let player_controller = MovementController::new(config.player.movement.clone());
        let enemy_controller =
            MovementController::new(config.enemy.movement(config.player.movement.max_step));

        let mut sim = Self {
            frame: 0,
            time: 0.0,
            behavior: EnemyBehavior::new(&config.enemy),
            combat: CombatResolver::new(&config.weapon),
            weapon: Weapon::new(config.weapon.cooldown),
            world,
            roster: Roster::new(),
            player: ActorId(0),
            player_controller,
            enemy_controller,
            rng,
            pending: Vec::new(),
            config,
        };

        let player = &sim.config.player;
        let (spawn, radius, max_health, height) = (
            player.spawn,
            player.movement.radius,
            player.max_health,
            player.height,
        );
        sim.player = sim.spawn(ActorKind::Player, spawn, radius, max_health, height)?;

        let enemy = sim.config.enemy.clone();
        let plan = enemy.body_plan();
        for &spawn in &enemy.spawns {
            let id = sim.spawn(
                ActorKind::Enemy,
                spawn,
                enemy.radius,
                enemy.max_health,
                enemy.total_height,
            )?;
            sim.roster[id].volumes = plan.volumes(id);
        }

        log::info!(
            "arena ready: {}x{} tiles, {} enemies",
            sim.world.grid().width(),
            sim.world.grid().height(),
            sim.roster.alive_count(ActorKind::Enemy)
        );

        Ok(sim)
    }

    fn spawn(
        &mut self,
        kind: ActorKind,
        requested: Vec2,
        radius: f32,
        max_health: i32,
        height: f32,
    ) -> Result<ActorId, ConfigError> {
        let (x, z) = self
            .world
            .resolve_spawn(requested.x, requested.y, radius)
            .ok_or(ConfigError::NoSpawnRoom {
                x: requested.x,
                z: requested.y,
                radius,
            })?;
        let resolved = Vec2::new(x, z);
        let position = Vec3::new(x, 0.0, z);

        let id = self
            .roster
            .spawn(|id| Actor::new(id, kind, position, max_health, height));

        if resolved != requested {
            self.pending.push(SimEvent::SpawnAdjusted {
                actor: id,
                requested,
                resolved,
            });
        }
        self.pending.push(SimEvent::Spawned {
            actor: id,
            kind,
            position,
        });

        Ok(id)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn world(&self) -> &CollisionWorld {
        &self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player_id(&self) -> ActorId {
        self.player
    }

    pub fn player(&self) -> &Actor {
        &self.roster[self.player]
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.roster.get(id)
    }

    /// Mutable access between frames, e.g. for scripted scenarios.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.roster.get_mut(id)
    }

    pub fn enemy_ids(&self) -> Vec<ActorId> {
        self.roster
            .iter()
            .filter(|a| a.kind == ActorKind::Enemy)
            .map(|a| a.id)
            .collect()
    }

    pub fn alive_enemies(&self) -> usize {
        self.roster.alive_count(ActorKind::Enemy)
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Current settled state.
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot_with(None)
    }

    fn snapshot_with(&self, shot: Option<ShotResult>) -> Snapshot {
        Snapshot {
            frame: self.frame,
            time: self.time,
            player_health: self.player().health,
            alive_enemies: self.alive_enemies(),
            actors: self.roster.iter().map(ActorView::from).collect(),
            shot,
        }
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Advance the simulation by one frame.
    ///
    /// `input.delta_time` is clamped to `max_delta_time`. A zero, negative
    /// or non-finite step integrates nothing and leaves the state untouched.
    pub fn tick<S: EventSink + ?Sized>(&mut self, input: &FrameInput, events: &mut S) -> Snapshot {
        for event in self.pending.drain(..) {
            events.emit(self.time, event);
        }

        let Some(delta_time) = self.config.clamp_delta_time(input.delta_time) else {
            return self.snapshot();
        };

        self.frame += 1;
        self.time += f64::from(delta_time);
        let time = self.time;

        // Enemies decide against the player's position at frame start.
        let target = self.player().movement.planar();
        let mut intents = Vec::new();
        for actor in self.roster.iter_mut() {
            if actor.kind != ActorKind::Enemy || actor.is_defeated() {
                continue;
            }
            let Some(wander) = actor.wander.as_mut() else {
                continue;
            };
            let decision =
                self.behavior
                    .think(wander, actor.movement.planar(), target, delta_time, &mut self.rng);
            if decision.retargeted {
                events.emit(
                    time,
                    SimEvent::WanderRetargeted {
                        actor: actor.id,
                        direction: decision.direction,
                        cooldown: wander.cooldown,
                    },
                );
            }
            intents.push((actor.id, decision.direction));
        }

        let player = &mut self.roster[self.player];
        if player.is_alive() {
            let report = self.player_controller.update(
                &mut player.movement,
                &input.to_command(),
                &self.world,
                delta_time,
            );
            emit_report(events, time, player, &report);
        }

        for (id, direction) in intents {
            let enemy = &mut self.roster[id];
            let report = self
                .enemy_controller
                .steer(&mut enemy.movement, direction, &self.world, delta_time);
            emit_report(events, time, enemy, &report);
        }

        let shot = self.update_weapon(input.fire, delta_time, time, events);
        self.snapshot_with(shot)
    }

    fn update_weapon<S: EventSink + ?Sized>(
        &mut self,
        fire_held: bool,
        delta_time: f32,
        time: f64,
        events: &mut S,
    ) -> Option<ShotResult> {
        let alive = self.player().is_alive();
        if !self.weapon.update(delta_time, fire_held && alive) {
            return None;
        }

        let player = self.player();
        let origin = player
            .movement
            .eye_position(self.config.player.movement.eye_height);
        let direction = player.movement.look_direction();
        events.emit(
            time,
            SimEvent::Fired {
                shooter: self.player,
                origin,
                direction,
            },
        );

        let result = self
            .combat
            .fire(self.player, origin, direction, &self.world, &mut self.roster);

        match (result.target, result.zone, result.remaining_health) {
            (Some(target), Some(zone), Some(remaining_health)) => {
                events.emit(
                    time,
                    SimEvent::Hit {
                        shooter: self.player,
                        target,
                        zone,
                        damage: result.damage,
                        remaining_health,
                    },
                );
                if result.defeated {
                    events.emit(
                        time,
                        SimEvent::Defeated {
                            actor: target,
                            by: self.player,
                        },
                    );
                }
            }
            _ => events.emit(
                time,
                SimEvent::Miss {
                    shooter: self.player,
                },
            ),
        }

        Some(result)
    }
}

fn emit_report<S: EventSink + ?Sized>(events: &mut S, time: f64, actor: &Actor, report: &MoveReport) {
    let position = actor.position();
    for (blocked, axis) in [(report.blocked_x, Axis::X), (report.blocked_z, Axis::Z)] {
        if blocked {
            events.emit(
                time,
                SimEvent::MoveBlocked {
                    actor: actor.id,
                    axis,
                    position,
                },
            );
        }
    }
    if report.jumped {
        events.emit(time, SimEvent::Jumped { actor: actor.id });
    }
    if report.landed {
        events.emit(time, SimEvent::Landed { actor: actor.id });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    fn test_sim() -> Simulation {
        Simulation::seeded(SimulationConfig::default(), 1).unwrap()
    }

    #[test]
    fn test_simulation_creation() {
        let sim = test_sim();
        assert_eq!(sim.frame, 0);
        assert_eq!(sim.roster().len(), 5);
        assert_eq!(sim.player_id(), ActorId(0));
        assert_eq!(sim.alive_enemies(), 4);
        assert!(sim.player().volumes.is_empty());
        assert!(sim.enemy_ids().iter().all(|&id| sim.roster()[id].volumes.len() == 3));
    }

    #[test]
    fn test_spawns_are_clear_of_walls() {
        let sim = test_sim();
        for actor in sim.roster().iter() {
            let radius = match actor.kind {
                ActorKind::Player => sim.config().player.movement.radius,
                ActorKind::Enemy => sim.config().enemy.radius,
            };
            let p = actor.position();
            assert!(!sim.world().circle_collides(p.x, p.z, radius), "{} at {p}", actor.id);
        }
    }

    #[test]
    fn test_spawn_events_delivered_on_first_tick() {
        let mut sim = test_sim();
        let mut events = Vec::new();
        sim.tick(&FrameInput::idle(0.0), &mut events);

        let spawned = events
            .iter()
            .filter(|e| matches!(e, SimEvent::Spawned { .. }))
            .count();
        let adjusted = events
            .iter()
            .filter(|e| matches!(e, SimEvent::SpawnAdjusted { .. }))
            .count();
        assert_eq!(spawned, 5);
        // Three default spawns sit inside pillars, the fourth clips a corner.
        assert_eq!(adjusted, 4);

        events.clear();
        sim.tick(&FrameInput::idle(0.0), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn test_tick_advances_frame() {
        let mut sim = test_sim();
        sim.tick(&FrameInput::idle(0.016), &mut NullSink);
        assert_eq!(sim.frame, 1);
        sim.tick(&FrameInput::idle(0.016), &mut NullSink);
        assert_eq!(sim.frame, 2);
    }

    #[test]
    fn test_delta_time_is_clamped() {
        let mut sim = test_sim();
        let snapshot = sim.tick(&FrameInput::idle(2.0), &mut NullSink);
        assert!((snapshot.time - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_movement_input() {
        let mut sim = test_sim();
        let start = sim.player().position();

        let input = FrameInput {
            forward: 1.0,
            ..FrameInput::idle(0.016)
        };
        for _ in 0..30 {
            sim.tick(&input, &mut NullSink);
        }

        let end = sim.player().position();
        // Yaw 0 walks toward -Z.
        assert!(end.z < start.z - 1.0, "end={end}");
        assert!((end.x - start.x).abs() < 1e-4);
    }

    #[test]
    fn test_zero_delta_time_changes_nothing() {
        let mut sim = test_sim();
        sim.tick(&FrameInput::idle(0.016), &mut NullSink);
        let before = sim.snapshot();

        let input = FrameInput {
            delta_time: 0.0,
            forward: 1.0,
            strafe: 1.0,
            look_delta: (50.0, 50.0),
            jump: true,
            fire: true,
        };
        let after = sim.tick(&input, &mut NullSink);
        assert_eq!(after, before);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut sim = test_sim();
        let fire = FrameInput {
            fire: true,
            ..FrameInput::idle(0.05)
        };
        let shots = (0..20)
            .filter(|_| sim.tick(&fire, &mut NullSink).shot.is_some())
            .count();
        // One second at 0.35s cooldown.
        assert_eq!(shots, 3);
    }
}
