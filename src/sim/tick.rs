//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. A single pass
//! per tick spawns, moves, and resolves every drop in id order.

use super::collision::is_caught;
use super::spawn::spawn_drop;
use super::state::{DropKind, DropStatus, GameEvent, GamePhase, GameState};

/// Autoplay horizontal speed (pixels per second)
const AUTOPLAY_SPEED: f32 = 600.0;

/// Pointer activity in container pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down { x: f32, y: f32 },
    Move { x: f32 },
    Up,
    Cancel,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start button
    pub start: bool,
    /// Reset button
    pub reset: bool,
    /// New container size (width, height)
    pub resize: Option<(f32, f32)>,
    /// Pointer events since the last tick, oldest first
    pub pointer: Vec<PointerInput>,
    /// Demo mode - the game steers the jerry can
    pub autoplay: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Session commands first so a reset+start in one frame starts clean
    if input.reset {
        state.reset();
    }
    if let Some((w, h)) = input.resize {
        state.resize(w, h);
    }
    if input.start || (input.autoplay && state.phase == GamePhase::Ready) {
        state.start();
    }

    for pointer in &input.pointer {
        match *pointer {
            PointerInput::Down { x, y } => {
                state.drag.pointer_down(&state.player, &state.container, x, y);
            }
            PointerInput::Move { x } => {
                state
                    .drag
                    .pointer_move(&mut state.player, &state.container, x);
            }
            PointerInput::Up | PointerInput::Cancel => state.drag.pointer_up(),
        }
    }

    state.time_ticks += 1;

    if input.autoplay && !state.drag.is_dragging() {
        steer_autoplay(state, dt);
    }

    // Spawner
    let fired = state
        .spawn_timer
        .as_mut()
        .map(|timer| timer.advance(dt))
        .unwrap_or(0);
    for _ in 0..fired {
        spawn_drop(state);
    }

    resolve_drops(state, dt);
    update_celebration(state, dt);

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Move every drop, then settle each one that was caught or landed
fn resolve_drops(state: &mut GameState, dt: f32) {
    let floor = state.container.height;
    for drop in state.drops.iter_mut().filter(|d| d.is_active()) {
        drop.fall(dt, floor);
    }

    for i in 0..state.drops.len() {
        if !state.drops[i].is_active() {
            continue;
        }
        let (id, kind) = (state.drops[i].id, state.drops[i].kind);

        // Re-read per drop: a catch earlier in this pass may disable the player
        if state.player.enabled {
            let player_rect = state.player.rect(&state.container);
            if is_caught(
                &player_rect,
                &state.drops[i].rect(),
                state.tuning.min_catch_radius,
                state.tuning.catch_radius_factor,
            ) {
                state.drops[i].status = DropStatus::Caught;
                state.apply_catch(id, kind);
                continue;
            }
        }

        if state.drops[i].landed() {
            state.drops[i].status = DropStatus::Missed;
            state.apply_miss(id, kind);
        }
    }

    let events = &mut state.events;
    state.drops.retain(|d| {
        if d.is_active() {
            true
        } else {
            events.push(GameEvent::DropRemoved { id: d.id });
            false
        }
    });
}

fn update_celebration(state: &mut GameState, dt: f32) {
    if let Some(celebration) = state.celebration.as_mut() {
        celebration.remaining -= dt;
        if celebration.remaining <= 0.0 {
            state.celebration = None;
            state.events.push(GameEvent::CelebrationEnded);
        }
    }
}

/// Slide toward the clean drop closest to landing
fn steer_autoplay(state: &mut GameState, dt: f32) {
    if !state.player.enabled {
        return;
    }

    let target = state
        .drops
        .iter()
        .filter(|d| d.is_active() && d.kind == DropKind::Clean)
        .max_by(|a, b| {
            a.progress()
                .partial_cmp(&b.progress())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|d| d.rect().center().x);

    if let Some(target_x) = target {
        let current_x = state.player.left + state.player.width / 2.0;
        let max_step = AUTOPLAY_SPEED * dt;
        let step = (target_x - current_x).clamp(-max_step, max_step);
        let left = state.player.left + step;
        state.player.set_left(left, &state.container);
    }
}
