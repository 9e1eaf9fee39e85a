//! Data-driven game balance
//!
//! All gameplay numbers live in [`Tuning`]. Every field has a default, so a
//! tuning file only needs to list what it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Arena;

/// Errors raised while loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Game balance and geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub floor_height: f32,
    pub ceiling_height: f32,
    pub player_size: Vec2,
    pub item_size: Vec2,
    /// Seconds between spawn timer fires
    pub spawn_interval_secs: f32,
    /// Seconds an item takes to cross the screen
    pub travel_secs: f32,
    pub spin_radians_per_sec: f32,
    /// Upward impulse applied per tap
    pub tap_impulse: f32,
    /// Every n-th spawn (counting from the first) is a bad item
    pub bad_item_every: u32,
    /// Vertical gravity (negative is down)
    pub gravity: f32,
    pub player_mass: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            floor_height: FLOOR_HEIGHT,
            ceiling_height: CEILING_HEIGHT,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            item_size: Vec2::splat(ITEM_SIZE),
            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            travel_secs: ITEM_TRAVEL_SECS,
            spin_radians_per_sec: ITEM_SPIN_RATE,
            tap_impulse: TAP_IMPULSE,
            bad_item_every: BAD_ITEM_EVERY,
            gravity: GRAVITY,
            player_mass: PLAYER_MASS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// An arena too short for an item is allowed: spawning skips those ticks.
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("item_size.x", self.item_size.x),
            ("item_size.y", self.item_size.y),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("travel_secs", self.travel_secs),
            ("player_mass", self.player_mass),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("floor_height", self.floor_height),
            ("ceiling_height", self.ceiling_height),
            ("tap_impulse", self.tap_impulse),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        if !self.gravity.is_finite() || !self.spin_radians_per_sec.is_finite() {
            return Err(TuningError::Invalid("gravity and spin must be finite".into()));
        }
        if self.bad_item_every == 0 {
            return Err(TuningError::Invalid("bad_item_every must be at least 1".into()));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::centered(
            self.arena_width,
            self.arena_height,
            self.floor_height,
            self.ceiling_height,
        )
    }

    /// Where the player starts each round
    pub fn player_start(&self) -> Vec2 {
        self.arena().center()
    }

    pub fn gravity_vec(&self) -> Vec2 {
        Vec2::new(0.0, self.gravity)
    }
}
