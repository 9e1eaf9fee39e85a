//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, physics or platform dependencies; those belong to the host

pub mod category;
pub mod contact;
pub mod controller;
pub mod entity;
pub mod spawner;
pub mod state;
pub mod step;

pub use category::{BodyPolicy, Category, CategoryMask};
pub use contact::{Action, ContactBody, ContactEvent, resolve};
pub use controller::on_tap;
pub use entity::{Arena, EntityId, EntitySpec, Motion, Spin};
pub use spawner::{SpawnSpec, Spawner, kind_for_fire, spawn_y_range};
pub use state::{ContactOutcome, GamePhase, GameState, RoundResult};
pub use step::{Command, Event, setup, step};
