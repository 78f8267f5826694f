//! Frame-level scenarios driven through the public `Simulation` API.

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use gridfire_game::{
    ActorId, ConfigError, FrameInput, HitZone, NullSink, ShotResult, SimEvent, Simulation,
    SimulationConfig,
};

const DT: f32 = 0.05;

/// Default arena with a single near-stationary enemy at `enemy`.
fn scenario(player: Vec2, enemy: Vec2) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.player.spawn = player;
    config.enemy.spawns = vec![enemy];
    config.enemy.move_speed = 1e-6;
    config
}

fn enemy_id(sim: &Simulation) -> ActorId {
    sim.enemy_ids()[0]
}

/// Pitch that puts the eye ray at `target_y` after `distance` meters.
fn aim_pitch(eye_height: f32, target_y: f32, distance: f32) -> f32 {
    (target_y - eye_height).atan2(distance)
}

/// Hold fire until the target is defeated, returning every hit.
fn fire_until_defeated(sim: &mut Simulation, target: ActorId) -> Vec<ShotResult> {
    let fire = FrameInput {
        fire: true,
        ..FrameInput::idle(DT)
    };
    let mut hits = Vec::new();
    for _ in 0..400 {
        if let Some(shot) = sim.tick(&fire, &mut NullSink).shot {
            assert!(shot.hit, "unexpected miss: {shot:?}");
            hits.push(shot);
        }
        if sim.actor(target).unwrap().is_defeated() {
            return hits;
        }
    }
    panic!("target survived {} hits", hits.len());
}

#[test]
fn test_shots_to_kill_by_zone() {
    for (target_y, zone, expected) in [(1.75, HitZone::Head, 1), (1.0, HitZone::Body, 2), (0.3, HitZone::Other, 5)] {
        let mut sim = Simulation::seeded(scenario(Vec2::ZERO, Vec2::new(0.0, -8.0)), 3).unwrap();
        let eye = sim.config().player.movement.eye_height;
        let player = sim.player_id();
        sim.actor_mut(player).unwrap().movement.pitch = aim_pitch(eye, target_y, 8.0);

        let target = enemy_id(&sim);
        let hits = fire_until_defeated(&mut sim, target);

        assert_eq!(hits.len(), expected, "{zone}");
        assert!(hits.iter().all(|h| h.zone == Some(zone) && h.target == Some(target)));
        assert!(hits.last().unwrap().defeated);
        assert_eq!(sim.snapshot().alive_enemies, 0);
    }
}

#[test]
fn test_pillar_blocks_shot() {
    // Pillar tile spans x -8..-4, z -12..-8 between shooter and target.
    let mut sim = Simulation::seeded(scenario(Vec2::new(-6.0, -2.0), Vec2::new(-6.0, -14.0)), 5).unwrap();
    let target = enemy_id(&sim);
    let eye = sim.config().player.movement.eye_height;
    let player = sim.player_id();
    sim.actor_mut(player).unwrap().movement.pitch = aim_pitch(eye, 1.0, 12.0);

    let fire = FrameInput {
        fire: true,
        ..FrameInput::idle(DT)
    };
    let mut shots = 0;
    for _ in 0..60 {
        if let Some(shot) = sim.tick(&fire, &mut NullSink).shot {
            assert!(!shot.hit);
            shots += 1;
        }
    }
    assert!(shots > 0);
    assert_eq!(sim.actor(target).unwrap().health, 100);

    // Same geometry one column over has a clear line.
    let mut sim = Simulation::seeded(scenario(Vec2::new(-2.0, -2.0), Vec2::new(-2.0, -14.0)), 5).unwrap();
    let player = sim.player_id();
    sim.actor_mut(player).unwrap().movement.pitch = aim_pitch(eye, 1.0, 12.0);
    let snapshot = sim.tick(&fire, &mut NullSink);
    assert!(snapshot.shot.unwrap().hit);
}

#[test]
fn test_seeded_runs_are_identical() {
    let script: Vec<FrameInput> = (0..400)
        .map(|i| FrameInput {
            delta_time: if i % 7 == 0 { 0.033 } else { 0.016 },
            forward: if i % 40 < 25 { 1.0 } else { -0.5 },
            strafe: if i % 60 < 30 { 0.0 } else { 1.0 },
            look_delta: ((i % 11) as f32 - 5.0, (i % 5) as f32 - 2.0),
            jump: i % 45 == 0,
            fire: i % 3 == 0,
        })
        .collect();

    let run = || {
        let mut sim = Simulation::seeded(SimulationConfig::default(), 99).unwrap();
        let mut events = Vec::new();
        let snapshots: Vec<_> = script.iter().map(|input| sim.tick(input, &mut events)).collect();
        (snapshots, events)
    };

    let (a, events_a) = run();
    let (b, events_b) = run();
    assert_eq!(a, b);
    assert_eq!(events_a, events_b);
}

#[test]
fn test_grounded_invariant_holds() {
    let mut sim = Simulation::seeded(SimulationConfig::default(), 11).unwrap();
    for i in 0..600 {
        let input = FrameInput {
            delta_time: [0.016, 0.05, 0.2, 0.001][i % 4],
            forward: 1.0,
            strafe: if i % 90 < 45 { 1.0 } else { -1.0 },
            look_delta: (7.0, 0.0),
            jump: i % 13 == 0,
            fire: false,
        };
        sim.tick(&input, &mut NullSink);

        for actor in sim.roster().iter() {
            let m = &actor.movement;
            assert_eq!(
                m.on_ground(),
                m.velocity_y == 0.0 && m.position.y == 0.0,
                "frame {i} {}: {m:?}",
                actor.id
            );
            assert!(m.position.y >= 0.0);
        }
    }
}

#[test]
fn test_empty_frames_change_nothing() {
    let mut sim = Simulation::seeded(SimulationConfig::default(), 2).unwrap();
    for _ in 0..10 {
        sim.tick(&FrameInput::idle(0.016), &mut NullSink);
    }
    let before = sim.snapshot();

    for delta_time in [0.0, -0.5, f32::NAN, f32::INFINITY] {
        let input = FrameInput {
            delta_time,
            forward: 1.0,
            strafe: -1.0,
            look_delta: (100.0, -40.0),
            jump: true,
            fire: true,
        };
        let after = sim.tick(&input, &mut NullSink);
        assert_eq!(after, before);
    }
}

#[test]
fn test_wander_heading_changes_once_per_expiry() {
    let mut config = SimulationConfig::default();
    config.enemy.aggro_radius = 0.01;
    let mut sim = Simulation::seeded(config, 17).unwrap();
    sim.tick(&FrameInput::idle(0.0), &mut NullSink);

    let ids = sim.enemy_ids();
    let yaw_of = |sim: &Simulation, id: ActorId| sim.actor(id).unwrap().movement.yaw;
    let mut last_yaw: Vec<Option<f32>> = vec![None; ids.len()];
    let mut retargets = vec![0; ids.len()];

    // Ten seconds of wandering.
    for _ in 0..200 {
        let mut events = Vec::new();
        sim.tick(&FrameInput::idle(DT), &mut events);

        for (slot, &id) in ids.iter().enumerate() {
            let retargeted = events
                .iter()
                .filter(|e| matches!(e, SimEvent::WanderRetargeted { actor, .. } if *actor == id))
                .count();
            assert!(retargeted <= 1);
            retargets[slot] += retargeted;

            let yaw = yaw_of(&sim, id);
            if let Some(previous) = last_yaw[slot] {
                if retargeted == 0 {
                    assert_eq!(yaw, previous, "{id} turned without a new heading");
                }
            }
            last_yaw[slot] = Some(yaw);
        }
    }

    // Cooldowns are drawn from [1.1, 2.9) seconds.
    for count in retargets {
        assert!((4..=10).contains(&count), "{count} retargets in 10s");
    }
}

#[test]
fn test_player_slides_along_wall() {
    // West wall face is at x = -20.
    let mut sim = Simulation::seeded(scenario(Vec2::new(-19.6, 0.0), Vec2::new(12.0, 12.0)), 4).unwrap();
    let input = FrameInput {
        forward: 1.0,
        strafe: -1.0,
        ..FrameInput::idle(0.016)
    };

    let mut events = Vec::new();
    for _ in 0..30 {
        sim.tick(&input, &mut events);
    }

    let p = sim.player().position();
    assert!(p.x >= -20.0 + 0.35 - 1e-4, "x={}", p.x);
    assert!(p.z < -2.0, "z={}", p.z);
    assert!(events.iter().any(|e| matches!(e, SimEvent::MoveBlocked { .. })));
}

#[test]
fn test_quarter_turn_walks_along_x() {
    let mut sim = Simulation::seeded(scenario(Vec2::ZERO, Vec2::new(12.0, 12.0)), 4).unwrap();
    let player = sim.player_id();
    sim.actor_mut(player).unwrap().movement.yaw = FRAC_PI_2;

    let input = FrameInput {
        forward: 1.0,
        ..FrameInput::idle(0.016)
    };
    for _ in 0..10 {
        sim.tick(&input, &mut NullSink);
    }

    let p = sim.player().position();
    assert!((p.x - 7.5 * 0.16).abs() < 1e-3, "x={}", p.x);
    assert!(p.z.abs() < 1e-4);
}

#[test]
fn test_defeated_enemy_stays_in_roster_and_stops() {
    let mut sim = Simulation::seeded(scenario(Vec2::ZERO, Vec2::new(0.0, -8.0)), 8).unwrap();
    let eye = sim.config().player.movement.eye_height;
    let player = sim.player_id();
    sim.actor_mut(player).unwrap().movement.pitch = aim_pitch(eye, 1.75, 8.0);

    let target = enemy_id(&sim);
    let mut events = Vec::new();
    let fire = FrameInput {
        fire: true,
        ..FrameInput::idle(DT)
    };
    let snapshot = sim.tick(&fire, &mut events);
    assert_eq!(snapshot.alive_enemies, 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::Defeated { actor, .. } if *actor == target)));

    let resting = sim.actor(target).unwrap().position();
    let wander = sim.actor(target).unwrap().wander;
    for _ in 0..40 {
        sim.tick(&FrameInput::idle(DT), &mut NullSink);
    }
    let enemy = sim.actor(target).unwrap();
    assert_eq!(enemy.position(), resting);
    assert_eq!(enemy.wander, wander);
    assert_eq!(enemy.health, 0);
    assert_eq!(sim.roster().len(), 2);
}

#[test]
fn test_chasing_enemy_closes_in() {
    let mut config = SimulationConfig::default();
    config.enemy.spawns = vec![Vec2::new(0.0, -10.0)];
    let mut sim = Simulation::seeded(config, 21).unwrap();
    let target = enemy_id(&sim);
    let start = sim.actor(target).unwrap().position();
    let player = sim.player().position();

    for _ in 0..20 {
        sim.tick(&FrameInput::idle(DT), &mut NullSink);
    }

    // 20 frames at 2.1 m/s straight toward the player.
    let end = sim.actor(target).unwrap().position();
    assert!((end.distance(player) - (start.distance(player) - 2.1)).abs() < 1e-3);
    assert_eq!(end.y, 0.0);
}

#[test]
fn test_invalid_map_is_rejected() {
    let mut config = SimulationConfig::default();
    config.map.tiles[5].push(0);
    assert!(matches!(Simulation::new(config), Err(ConfigError::Grid(_))));

    let mut config = SimulationConfig::default();
    config.map.tile_size = -4.0;
    assert!(Simulation::new(config).is_err());
}

#[test]
fn test_walled_in_spawn_is_rejected() {
    let mut config = SimulationConfig::default();
    config.map.tiles = vec![vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]];
    assert!(matches!(
        Simulation::new(config),
        Err(ConfigError::NoSpawnRoom { .. })
    ));
}

#[test]
fn test_spawn_inside_pillar_is_moved() {
    let mut sim = Simulation::seeded(SimulationConfig::default(), 1).unwrap();
    let mut events = Vec::new();
    sim.tick(&FrameInput::idle(0.0), &mut events);

    let first = sim.enemy_ids()[0];
    let resolved = events.iter().find_map(|e| match e {
        SimEvent::SpawnAdjusted { actor, resolved, .. } if *actor == first => Some(*resolved),
        _ => None,
    });
    assert_eq!(resolved, Some(Vec2::new(-10.0, -14.0)));
    assert_eq!(sim.actor(first).unwrap().position(), Vec3::new(-10.0, 0.0, -14.0));
}
