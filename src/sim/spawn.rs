//! Drop spawning
//!
//! One interval timer per session; each firing rolls a new drop.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{DropKind, GameEvent, GameState, WaterDrop};
use crate::tuning::Tuning;

/// Repeating spawn timer. Fires once per elapsed interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds between firings
    pub interval: f32,
    /// Seconds since the last firing
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt`, returning how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// Roll a drop's type, size, position, and fall duration
pub fn roll_drop<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    container_width: f32,
    id: u32,
) -> WaterDrop {
    let kind = if rng.random_bool(tuning.clean_probability) {
        DropKind::Clean
    } else {
        DropKind::Dirty
    };

    let multiplier = rng.random_range(tuning.drop_size_min..tuning.drop_size_max);
    let size = (tuning.base_drop_size * multiplier).round();

    let max_x = (container_width - size).max(0.0);
    let x = if max_x > 0.0 {
        rng.random_range(0.0..max_x)
    } else {
        0.0
    };

    let fall_duration = rng.random_range(tuning.fall_duration_min..tuning.fall_duration_max);

    WaterDrop::new(id, kind, size, x, fall_duration)
}

/// Create a drop and add it to the active set
pub fn spawn_drop(state: &mut GameState) -> u32 {
    let id = state.next_drop_id();
    let drop = roll_drop(&mut state.rng, &state.tuning, state.container.width, id);
    log::debug!(
        "Spawned {} drop {} (size {}, x {:.0}, {:.2}s)",
        drop.kind.as_str(),
        id,
        drop.size,
        drop.x,
        drop.fall_duration
    );
    state.events.push(GameEvent::DropSpawned {
        id,
        kind: drop.kind,
    });
    state.drops.push(drop);
    id
}
