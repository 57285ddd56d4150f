//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by drop ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod drag;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{catch_radius, center_distance, is_caught};
pub use drag::{DragController, DragState};
pub use spawn::{SpawnTimer, roll_drop};
pub use state::{
    Celebration, Container, DropKind, DropStatus, GameEvent, GamePhase, GameState, Player,
    WaterDrop,
};
pub use tick::{PointerInput, TickInput, tick};
