//! Gridfire - headless arena runner
//!
//! Drives the arena simulation with a scripted player for a fixed number of
//! frames and logs what happens. Set `RUST_LOG=debug` for per-event output.
//!
//! Usage: `gridfire [frames] [seed]`

use gridfire_game::{FrameInput, LogSink, Simulation, SimulationConfig, Snapshot};

const DEFAULT_FRAMES: u64 = 1800;
const DEFAULT_SEED: u64 = 0x67_72_69_64;
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Scripted stand-in for device input.
///
/// Walks a lap around the centre of the arena, sweeping the view, jumping
/// now and then and holding fire in bursts.
struct InputScript {
    frame: u64,
}

impl InputScript {
    fn new() -> Self {
        Self { frame: 0 }
    }

    fn next_input(&mut self) -> FrameInput {
        let f = self.frame;
        self.frame += 1;

        let phase = (f / 120) % 4;
        FrameInput {
            delta_time: FRAME_TIME,
            forward: if phase == 3 { -1.0 } else { 1.0 },
            strafe: match phase {
                1 => 1.0,
                2 => -1.0,
                _ => 0.0,
            },
            look_delta: (if f % 240 < 120 { 6.0 } else { -4.0 }, 0.0),
            jump: f % 150 == 0,
            fire: f % 90 < 30,
        }
    }
}

fn parse_arg(index: usize, default: u64) -> u64 {
    match std::env::args().nth(index) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring argument {raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

fn log_snapshot(snapshot: &Snapshot) {
    log::info!(
        "frame {} t={:.2}s hp={} enemies={}",
        snapshot.frame,
        snapshot.time,
        snapshot.player_health,
        snapshot.alive_enemies
    );
    for actor in &snapshot.actors {
        log::debug!(
            "  {} {:?} pos=({:.2}, {:.2}, {:.2}) yaw={:.2} hp={}",
            actor.id,
            actor.kind,
            actor.position.x,
            actor.position.y,
            actor.position.z,
            actor.yaw,
            actor.health
        );
    }
}

fn main() -> Result<(), gridfire_game::ConfigError> {
    env_logger::init();

    let frames = parse_arg(1, DEFAULT_FRAMES);
    let seed = parse_arg(2, DEFAULT_SEED);

    let mut simulation = Simulation::seeded(SimulationConfig::default(), seed)?;
    let mut sink = LogSink::new();
    let mut script = InputScript::new();

    log::info!("running {frames} frames with seed {seed:#x}");

    let mut hits = 0u32;
    let mut shots = 0u32;
    for _ in 0..frames {
        let snapshot = simulation.tick(&script.next_input(), &mut sink);

        if let Some(shot) = snapshot.shot {
            shots += 1;
            hits += u32::from(shot.hit);
        }
        if snapshot.frame % 300 == 0 {
            log_snapshot(&snapshot);
        }
        if snapshot.alive_enemies == 0 {
            log::info!("all enemies defeated at frame {}", snapshot.frame);
            break;
        }
    }

    let last = simulation.snapshot();
    log_snapshot(&last);
    log::info!("{hits}/{shots} shots hit");

    Ok(())
}
