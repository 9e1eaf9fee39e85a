//! Spike Dodge - a single-screen arcade game core
//!
//! The player (spike) hovers between a floor and a ceiling while balls fly in
//! from the right. Basketballs score, footballs end the run.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (categories, spawning, contacts, game state)
//! - `host`: Engine seam plus a headless reference world
//! - `tuning`: Data-driven game balance

pub mod host;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;

    /// Arena dimensions (portrait phone screen)
    pub const ARENA_WIDTH: f32 = 750.0;
    pub const ARENA_HEIGHT: f32 = 1334.0;
    pub const FLOOR_HEIGHT: f32 = 100.0;
    pub const CEILING_HEIGHT: f32 = 100.0;

    /// Player (spike) body
    pub const PLAYER_WIDTH: f32 = 225.0;
    pub const PLAYER_HEIGHT: f32 = 200.0;
    pub const PLAYER_MASS: f32 = 1.0;
    /// Upward impulse per tap
    pub const TAP_IMPULSE: f32 = 500.0;
    /// Downward acceleration, pixels/s²
    pub const GRAVITY: f32 = -980.0;

    /// Thrown balls
    pub const ITEM_SIZE: f32 = 125.0;
    pub const SPAWN_INTERVAL_SECS: f32 = 1.0;
    pub const ITEM_TRAVEL_SECS: f32 = 2.0;
    /// One full turn per second
    pub const ITEM_SPIN_RATE: f32 = std::f32::consts::TAU;
    pub const BAD_ITEM_EVERY: u32 = 3;
}
