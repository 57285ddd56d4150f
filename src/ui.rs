//! HUD and overlay state
//!
//! Everything the page shows is derived from `GameState` here, so the DOM
//! layer only has to diff and apply.

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Full-screen end-of-session overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    GameOver,
    Win,
}

/// Snapshot of what the page should display
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score_text: String,
    pub health_text: String,
    pub overlay: Overlay,
    /// Banner text while the win celebration is up
    pub celebration: Option<&'static str>,
}

impl Hud {
    pub fn from_state(state: &GameState, settings: &Settings) -> Self {
        let overlay = match state.phase {
            GamePhase::GameOver => Overlay::GameOver,
            GamePhase::Won => Overlay::Win,
            GamePhase::Ready | GamePhase::Playing => Overlay::None,
        };

        let celebration = if state.celebration.is_some() && settings.effective_celebration() {
            Some(CELEBRATION_TEXT)
        } else {
            None
        };

        Self {
            score_text: score_text(state.score),
            health_text: health_text(state.health),
            overlay,
            celebration,
        }
    }
}

pub const GAME_OVER_TEXT: &str = "Game Over";
pub const WIN_TEXT: &str = "You Win! 🎉";
pub const CELEBRATION_TEXT: &str = "Celebration!";

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn health_text(health: u8) -> String {
    format!("Health: {}", health)
}

/// Subtitle under the win headline
pub fn win_subtitle(win_score: u32) -> String {
    format!("Thanks - {} drops collected", win_score)
}
