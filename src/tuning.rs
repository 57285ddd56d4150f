//! Data-driven game balance
//!
//! Every gameplay number lives here so it can be overridden from JSON without
//! touching the simulation.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawning ===
    /// Milliseconds between drop spawns
    pub drop_interval_ms: u32,
    /// Chance a spawned drop is clean (0.0 - 1.0)
    pub clean_probability: f64,
    /// Base drop diameter in pixels before the size multiplier
    pub base_drop_size: f32,
    /// Size multiplier range [min, max)
    pub drop_size_min: f32,
    pub drop_size_max: f32,
    /// Fall duration range in seconds [min, max)
    pub fall_duration_min: f32,
    pub fall_duration_max: f32,

    // === Rules ===
    /// Score that wins the session
    pub win_score: u32,
    /// Starting (and maximum) health
    pub max_health: u8,

    // === Catching ===
    /// Catch radius never drops below this (pixels)
    pub min_catch_radius: f32,
    /// Catch radius as a fraction of player width
    pub catch_radius_factor: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player and the container floor
    pub player_bottom: f32,

    // === Effects ===
    /// How long the win celebration banner stays up (seconds)
    pub celebration_secs: f32,

    /// Container size used until the front end reports the real one
    pub container_width: f32,
    pub container_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            drop_interval_ms: 1000,
            clean_probability: 0.75,
            base_drop_size: 40.0,
            drop_size_min: 0.6,
            drop_size_max: 1.4,
            fall_duration_min: 3.0,
            fall_duration_max: 5.0,

            win_score: 20,
            max_health: 5,

            min_catch_radius: 18.0,
            catch_radius_factor: 0.45,

            player_width: 216.0,
            player_height: 130.0,
            player_bottom: 8.0,

            celebration_secs: 2.2,

            container_width: 800.0,
            container_height: 600.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key for tuning overrides
    pub const STORAGE_KEY: &'static str = "drop_catcher_tuning";

    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Spawn interval in seconds
    pub fn drop_interval_secs(&self) -> f32 {
        self.drop_interval_ms as f32 / 1000.0
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        fn bad(field: &'static str, reason: &'static str) -> Result<(), GameError> {
            Err(GameError::InvalidTuning { field, reason })
        }

        let floats = [
            ("base_drop_size", self.base_drop_size),
            ("drop_size_min", self.drop_size_min),
            ("drop_size_max", self.drop_size_max),
            ("fall_duration_min", self.fall_duration_min),
            ("fall_duration_max", self.fall_duration_max),
            ("min_catch_radius", self.min_catch_radius),
            ("catch_radius_factor", self.catch_radius_factor),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_bottom", self.player_bottom),
            ("celebration_secs", self.celebration_secs),
            ("container_width", self.container_width),
            ("container_height", self.container_height),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return bad(field, "must be finite");
            }
        }

        if self.drop_interval_ms == 0 {
            return bad("drop_interval_ms", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.clean_probability) {
            return bad("clean_probability", "must be within 0..=1");
        }
        if self.base_drop_size <= 0.0 {
            return bad("base_drop_size", "must be positive");
        }
        if self.drop_size_min <= 0.0 || self.drop_size_min >= self.drop_size_max {
            return bad("drop_size_min", "must be positive and below drop_size_max");
        }
        if !(self.base_drop_size * self.drop_size_max).is_finite() {
            return bad("drop_size_max", "largest drop size overflows");
        }
        if self.fall_duration_min <= 0.0 || self.fall_duration_min >= self.fall_duration_max {
            return bad(
                "fall_duration_min",
                "must be positive and below fall_duration_max",
            );
        }
        if self.win_score == 0 {
            return bad("win_score", "must be positive");
        }
        if self.max_health == 0 {
            return bad("max_health", "must be positive");
        }
        if self.player_width <= 0.0 || self.player_height <= 0.0 {
            return bad("player_width", "player size must be positive");
        }
        if self.celebration_secs < 0.0 {
            return bad("celebration_secs", "must not be negative");
        }
        if self.container_width < 0.0 || self.container_height < 0.0 {
            return bad("container_width", "container size must not be negative");
        }
        Ok(())
    }

    /// Load tuning overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning overrides from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
