//! Structured simulation events and the sinks that receive them.
//!
//! The simulation never prints. It hands every notable state change to an
//! [`EventSink`] along with the simulation clock, and the host decides what
//! to do with it.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, ActorKind};
use crate::hitbox::HitZone;

/// Horizontal movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Z,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::X => "x",
            Self::Z => "z",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Spawned {
        actor: ActorId,
        kind: ActorKind,
        position: Vec3,
    },
    /// The configured spawn overlapped a wall and was moved.
    SpawnAdjusted {
        actor: ActorId,
        requested: Vec2,
        resolved: Vec2,
    },
    MoveBlocked {
        actor: ActorId,
        axis: Axis,
        position: Vec3,
    },
    Jumped {
        actor: ActorId,
    },
    Landed {
        actor: ActorId,
    },
    WanderRetargeted {
        actor: ActorId,
        direction: Vec2,
        cooldown: f32,
    },
    Fired {
        shooter: ActorId,
        origin: Vec3,
        direction: Vec3,
    },
    Hit {
        shooter: ActorId,
        target: ActorId,
        zone: HitZone,
        damage: i32,
        remaining_health: i32,
    },
    Miss {
        shooter: ActorId,
    },
    Defeated {
        actor: ActorId,
        by: ActorId,
    },
}

/// Receiver of simulation events.
///
/// `time` is the simulation clock in seconds when the event happened.
pub trait EventSink {
    fn emit(&mut self, time: f64, event: SimEvent);
}

impl EventSink for Vec<SimEvent> {
    fn emit(&mut self, _time: f64, event: SimEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, time: f64, event: SimEvent) {
        (**self).emit(time, event);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _time: f64, _event: SimEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ThrottleKey {
    Blocked(ActorId, Axis),
    Miss(ActorId),
}

/// Forwards events to the `log` facade.
///
/// Chatty events are throttled per key against the simulation clock:
/// move-blocked per actor and axis, and misses per shooter.
#[derive(Debug, Clone)]
pub struct LogSink {
    /// Minimum gap between move-blocked lines for one actor and axis.
    pub blocked_interval: f64,

    /// Minimum gap between miss lines for one shooter.
    pub miss_interval: f64,

    last: HashMap<ThrottleKey, f64>,
}

impl Default for LogSink {
    fn default() -> Self {
        Self {
            blocked_interval: 0.15,
            miss_interval: 0.2,
            last: HashMap::new(),
        }
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` at `time` unless it fired within `interval`.
    fn allow(&mut self, key: ThrottleKey, time: f64, interval: f64) -> bool {
        match self.last.get(&key) {
            Some(&last) if time - last < interval => false,
            _ => {
                self.last.insert(key, time);
                true
            }
        }
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, time: f64, event: SimEvent) {
        match event {
            SimEvent::Spawned {
                actor,
                kind,
                position,
            } => {
                log::info!(
                    "[{time:.3}] spawned {kind:?} {actor} at x={:.1} z={:.1}",
                    position.x,
                    position.z
                );
            }
            SimEvent::SpawnAdjusted {
                actor,
                requested,
                resolved,
            } => {
                log::warn!(
                    "[{time:.3}] {actor} spawn ({:.1}, {:.1}) is inside a wall, moved to ({:.1}, {:.1})",
                    requested.x,
                    requested.y,
                    resolved.x,
                    resolved.y
                );
            }
            SimEvent::MoveBlocked {
                actor,
                axis,
                position,
            } => {
                if self.allow(ThrottleKey::Blocked(actor, axis), time, self.blocked_interval) {
                    log::debug!(
                        "[{time:.3}] {actor} blocked on {axis} at x={:.2} z={:.2}",
                        position.x,
                        position.z
                    );
                }
            }
            SimEvent::Jumped { actor } => log::debug!("[{time:.3}] {actor} jumped"),
            SimEvent::Landed { actor } => log::debug!("[{time:.3}] {actor} landed"),
            SimEvent::WanderRetargeted {
                actor,
                direction,
                cooldown,
            } => {
                log::debug!(
                    "[{time:.3}] {actor} wanders toward ({:.2}, {:.2}) for {cooldown:.2}s",
                    direction.x,
                    direction.y
                );
            }
            SimEvent::Fired { shooter, .. } => log::trace!("[{time:.3}] {shooter} fired"),
            SimEvent::Hit {
                shooter,
                target,
                zone,
                damage,
                remaining_health,
            } => {
                log::info!(
                    "[{time:.3}] {shooter} hit {target} zone={zone} damage={damage} hp={remaining_health}"
                );
            }
            SimEvent::Miss { shooter } => {
                if self.allow(ThrottleKey::Miss(shooter), time, self.miss_interval) {
                    log::debug!("[{time:.3}] {shooter} missed");
                }
            }
            SimEvent::Defeated { actor, by } => {
                log::info!("[{time:.3}] {actor} defeated by {by}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects() {
        let mut events: Vec<SimEvent> = Vec::new();
        events.emit(0.0, SimEvent::Jumped { actor: ActorId(0) });
        events.emit(0.1, SimEvent::Landed { actor: ActorId(0) });
        assert_eq!(
            events,
            vec![
                SimEvent::Jumped { actor: ActorId(0) },
                SimEvent::Landed { actor: ActorId(0) }
            ]
        );
    }

    #[test]
    fn test_throttle_per_key() {
        let mut sink = LogSink::new();
        let key = ThrottleKey::Blocked(ActorId(1), Axis::X);
        assert!(sink.allow(key, 0.0, 0.15));
        assert!(!sink.allow(key, 0.1, 0.15));
        assert!(sink.allow(ThrottleKey::Blocked(ActorId(1), Axis::Z), 0.1, 0.15));
        assert!(sink.allow(key, 0.16, 0.15));
        assert!(!sink.allow(key, 0.3, 0.15));
    }

    #[test]
    fn test_log_sink_accepts_every_event() {
        let mut sink = LogSink::new();
        let id = ActorId(2);
        for (i, event) in [
            SimEvent::MoveBlocked {
                actor: id,
                axis: Axis::Z,
                position: Vec3::ZERO,
            },
            SimEvent::Miss { shooter: id },
            SimEvent::Miss { shooter: id },
            SimEvent::Defeated { actor: id, by: ActorId(0) },
        ]
        .into_iter()
        .enumerate()
        {
            sink.emit(i as f64 * 0.01, event);
        }
        assert_eq!(sink.last.len(), 2);
    }
}
