//! Session control: start, reset, win, loss
//!
//! Plus the outcome rules that move a session toward those end states.

use super::spawn::SpawnTimer;
use super::state::{Celebration, Container, DropKind, GameEvent, GamePhase, GameState};

impl GameState {
    /// Start a session. Ignored while one is already running.
    /// Returns true when a session actually started.
    pub fn start(&mut self) -> bool {
        if self.running() {
            log::debug!("Start ignored: session already running");
            return false;
        }

        self.score = 0;
        self.health = self.tuning.max_health;
        self.phase = GamePhase::Playing;
        self.player.enabled = true;
        self.player.center(&self.container);
        self.spawn_timer = Some(SpawnTimer::new(self.tuning.drop_interval_secs()));
        self.events.push(GameEvent::SessionStarted);

        log::info!("Session started (seed {})", self.seed);
        true
    }

    /// Stop everything and return to a fresh, not-yet-running session
    pub fn reset(&mut self) {
        self.stop_spawning();
        self.disable_player();
        self.clear_drops();

        self.score = 0;
        self.health = self.tuning.max_health;
        self.phase = GamePhase::Ready;
        if self.celebration.take().is_some() {
            self.events.push(GameEvent::CelebrationEnded);
        }

        self.player.enabled = true;
        self.player.center(&self.container);
        self.events.push(GameEvent::SessionReset);

        log::info!("Session reset");
    }

    /// Loss: health ran out
    pub fn end_game(&mut self) {
        self.stop_spawning();
        self.disable_player();
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);

        log::info!("Game over (score {})", self.score);
    }

    /// Win: show the win state and a short celebration
    pub fn show_win(&mut self) {
        self.stop_spawning();
        self.disable_player();
        self.phase = GamePhase::Won;
        self.celebration = Some(Celebration {
            remaining: self.tuning.celebration_secs,
        });
        self.events.push(GameEvent::Won);
        self.events.push(GameEvent::CelebrationStarted);

        log::info!("Win! {} drops collected", self.score);
    }

    /// Container changed size; keep the player centered in it
    pub fn resize(&mut self, width: f32, height: f32) {
        self.container = Container {
            width: width.max(0.0),
            height: height.max(0.0),
        };
        self.player.center(&self.container);
        // The drag anchor points at the old layout
        self.drag.cancel();
        log::debug!("Container resized to {}x{}", width, height);
    }

    /// Remove an active drop without scoring it.
    /// Returns false if the drop is unknown or already resolved.
    pub fn remove_drop(&mut self, id: u32) -> bool {
        let Some(pos) = self.drops.iter().position(|d| d.id == id && d.is_active()) else {
            return false;
        };
        self.drops.remove(pos);
        self.events.push(GameEvent::DropRemoved { id });
        true
    }

    /// Remove every drop
    pub fn clear_drops(&mut self) {
        for drop in self.drops.drain(..) {
            self.events.push(GameEvent::DropRemoved { id: drop.id });
        }
    }

    /// Apply a catch. Clean drops score and may win; dirty drops cost health.
    pub(crate) fn apply_catch(&mut self, id: u32, kind: DropKind) {
        self.events.push(GameEvent::DropCaught { id, kind });
        match kind {
            DropKind::Clean => {
                self.score += 1;
                log::debug!("Caught clean drop {} (score {})", id, self.score);
                if self.score >= self.tuning.win_score {
                    self.show_win();
                }
            }
            DropKind::Dirty => {
                self.health = self.health.saturating_sub(1);
                log::debug!("Caught dirty drop {} (health {})", id, self.health);
                if self.health == 0 {
                    self.end_game();
                }
            }
        }
    }

    /// Apply a drop reaching the floor. Only missed clean drops cost score,
    /// in any phase.
    pub(crate) fn apply_miss(&mut self, id: u32, kind: DropKind) {
        self.events.push(GameEvent::DropMissed { id, kind });
        if kind == DropKind::Clean {
            self.score = self.score.saturating_sub(1);
            log::debug!("Missed clean drop {} (score {})", id, self.score);
        }
    }

    fn stop_spawning(&mut self) {
        self.spawn_timer = None;
    }

    fn disable_player(&mut self) {
        self.player.enabled = false;
        self.drag.cancel();
    }
}
