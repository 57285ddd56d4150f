//! Game state and core simulation types
//!
//! The whole session lives in one `GameState`; handlers receive it explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::drag::DragController;
use super::spawn::SpawnTimer;
use crate::Rect;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player placed, waiting for start
    Ready,
    /// Drops spawning, catches count
    Playing,
    /// Win score reached
    Won,
    /// Health ran out
    GameOver,
}

/// Drop types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropKind {
    /// Good water: +1 on catch, -1 on miss
    Clean,
    /// Contaminated water: -1 health on catch, harmless on miss
    Dirty,
}

impl DropKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropKind::Clean => "clean",
            DropKind::Dirty => "dirty",
        }
    }
}

/// Where a drop is in its lifecycle. Leaves `Active` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropStatus {
    Active,
    Caught,
    Missed,
}

/// A falling drop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterDrop {
    pub id: u32,
    pub kind: DropKind,
    /// Diameter in pixels
    pub size: f32,
    /// Left edge in container pixels
    pub x: f32,
    /// Top edge in container pixels (starts above the container)
    pub y: f32,
    /// Seconds from spawn to reaching the floor
    pub fall_duration: f32,
    /// Seconds fallen so far
    pub elapsed: f32,
    pub status: DropStatus,
}

impl WaterDrop {
    pub fn new(id: u32, kind: DropKind, size: f32, x: f32, fall_duration: f32) -> Self {
        Self {
            id,
            kind,
            size,
            x,
            y: -size,
            fall_duration,
            elapsed: 0.0,
            status: DropStatus::Active,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == DropStatus::Active
    }

    /// Fall progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.fall_duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.fall_duration).min(1.0)
    }

    /// True once the fall has completed
    pub fn landed(&self) -> bool {
        self.elapsed >= self.fall_duration
    }

    /// Advance the fall at the speed that carries the top edge from `-size`
    /// to the floor in `fall_duration`
    pub fn fall(&mut self, dt: f32, floor: f32) {
        self.elapsed += dt;
        if self.fall_duration <= 0.0 {
            self.y = floor;
            return;
        }
        let speed = (floor + self.size) / self.fall_duration;
        self.y = (self.y + speed * dt).min(floor);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}

/// The game area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

/// The jerry can
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Left edge in container pixels
    pub left: f32,
    pub width: f32,
    pub height: f32,
    /// Gap between the player and the container floor
    pub bottom: f32,
    /// Disabled players ignore drags and catch nothing
    pub enabled: bool,
}

impl Player {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self {
            left: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
            bottom: tuning.player_bottom,
            enabled: true,
        }
    }

    /// Rightmost allowed left edge (flush to the container's right wall)
    pub fn max_left(&self, container: &Container) -> f32 {
        (container.width - self.width).max(0.0)
    }

    /// Place the player horizontally centered, snapped to whole pixels
    pub fn center(&mut self, container: &Container) {
        self.left = ((container.width - self.width) / 2.0).round().max(0.0);
    }

    /// Set the left edge, clamped to the container
    pub fn set_left(&mut self, left: f32, container: &Container) {
        self.left = left.clamp(0.0, self.max_left(container));
    }

    pub fn rect(&self, container: &Container) -> Rect {
        let top = container.height - self.bottom - self.height;
        Rect::new(self.left, top, self.width, self.height)
    }
}

/// Transient win banner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Celebration {
    /// Seconds until auto-dismiss
    pub remaining: f32,
}

/// Things that happened during a tick, for the front end to mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    SessionReset,
    DropSpawned { id: u32, kind: DropKind },
    DropCaught { id: u32, kind: DropKind },
    DropMissed { id: u32, kind: DropKind },
    /// The drop left the active set; its visual should go away
    DropRemoved { id: u32 },
    Won,
    GameOver,
    CelebrationStarted,
    CelebrationEnded,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance values this session runs with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    pub health: u8,
    pub player: Player,
    pub drag: DragController,
    pub container: Container,
    /// Active drops (sorted by id for determinism)
    pub drops: Vec<WaterDrop>,
    /// `None` while no spawning is scheduled
    pub spawn_timer: Option<SpawnTimer>,
    pub celebration: Option<Celebration>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    /// Next drop ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let container = Container {
            width: tuning.container_width,
            height: tuning.container_height,
        };
        let mut player = Player::from_tuning(&tuning);
        player.center(&container);

        Self {
            seed,
            phase: GamePhase::Ready,
            score: 0,
            health: tuning.max_health,
            player,
            drag: DragController::default(),
            container,
            drops: Vec::new(),
            spawn_timer: None,
            celebration: None,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// True while a session is in progress
    #[inline]
    pub fn running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Allocate a new drop ID
    pub fn next_drop_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Active drop by id
    pub fn drop_by_id(&self, id: u32) -> Option<&WaterDrop> {
        self.drops.iter().find(|d| d.id == id && d.is_active())
    }

    pub fn active_drop_count(&self) -> usize {
        self.drops.iter().filter(|d| d.is_active()).count()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure drops are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.drops.sort_by_key(|d| d.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(!state.running());
        assert_eq!(state.score, 0);
        assert_eq!(state.health, 5);
        assert!(state.player.enabled);
        assert!(state.spawn_timer.is_none());
        // (800 - 216) / 2
        assert_eq!(state.player.left, 292.0);
    }

    #[test]
    fn test_drop_falls_from_above_to_floor() {
        let mut drop = WaterDrop::new(1, DropKind::Clean, 40.0, 100.0, 4.0);
        assert_eq!(drop.y, -40.0);

        drop.fall(2.0, 600.0);
        assert!((drop.y - 280.0).abs() < 0.001);
        assert!(!drop.landed());

        drop.fall(2.0, 600.0);
        assert!((drop.y - 600.0).abs() < 0.001);
        assert!(drop.landed());

        // Never overshoots the floor
        drop.fall(1.0, 600.0);
        assert!((drop.y - 600.0).abs() < 0.001);
    }

    #[test]
    fn test_player_center_and_clamp() {
        let container = Container {
            width: 500.0,
            height: 400.0,
        };
        let mut player = Player::from_tuning(&Tuning::default());
        player.center(&container);
        assert_eq!(player.left, 142.0);

        player.set_left(-50.0, &container);
        assert_eq!(player.left, 0.0);
        player.set_left(1000.0, &container);
        assert_eq!(player.left, 284.0);

        let rect = player.rect(&container);
        assert_eq!(rect.top, 400.0 - 8.0 - 130.0);
    }

    #[test]
    fn test_player_in_narrow_container() {
        let container = Container {
            width: 100.0,
            height: 400.0,
        };
        let mut player = Player::from_tuning(&Tuning::default());
        player.center(&container);
        assert_eq!(player.left, 0.0);
        player.set_left(30.0, &container);
        assert_eq!(player.left, 0.0);
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut state = GameState::new(1);
        assert_eq!(state.next_drop_id(), 1);
        assert_eq!(state.next_drop_id(), 2);
    }
}
