//! Ball spawning
//!
//! Each spawn timer fire produces at most one ball. The kind follows a fixed
//! modular schedule over the fire counter; the height is drawn from the
//! seeded game RNG.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::entity::{Arena, EntityId, EntitySpec, Motion, Spin};
use crate::tuning::Tuning;

/// A ball the spawner wants created, before it has an id
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSpec {
    pub category: Category,
    pub start: Vec2,
    pub end: Vec2,
    pub duration: f32,
    pub size: Vec2,
    pub spin: Spin,
}

impl SpawnSpec {
    pub fn into_entity(self, id: EntityId) -> EntitySpec {
        EntitySpec {
            id,
            category: self.category,
            position: self.start,
            size: self.size,
            motion: Motion::Linear {
                from: self.start,
                to: self.end,
                duration: self.duration,
            },
            spin: Some(self.spin),
        }
    }
}

/// Ball kind for the `fire`-th timer fire (0-based)
pub fn kind_for_fire(fire: u64, bad_item_every: u32) -> Category {
    if fire % u64::from(bad_item_every.max(1)) == 0 {
        Category::BadItem
    } else {
        Category::GoodItem
    }
}

/// Integer heights at which an item of `item_height` clears floor and ceiling.
///
/// `None` when the gap between them is shorter than the item.
pub fn spawn_y_range(arena: &Arena, item_height: f32) -> Option<RangeInclusive<i32>> {
    let half = item_height / 2.0;
    let lo = (arena.floor_top() + half).ceil();
    let hi = (arena.ceiling_bottom() - half).floor();
    if lo > hi {
        return None;
    }
    Some(lo as i32..=hi as i32)
}

/// Spawn schedule state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawner {
    /// Timer fires seen this round, including skipped ones
    fires: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fires(&self) -> u64 {
        self.fires
    }

    /// Restart the schedule (new round)
    pub fn reset(&mut self) {
        self.fires = 0;
    }

    /// Handle one spawn timer fire
    pub fn tick<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) -> Option<SpawnSpec> {
        let fire = self.fires;
        self.fires += 1;

        let arena = tuning.arena();
        let size = tuning.item_size;
        let Some(range) = spawn_y_range(&arena, size.y) else {
            log::warn!(
                "Skipping spawn {}: arena gap {} too small for item height {}",
                fire,
                arena.ceiling_bottom() - arena.floor_top(),
                size.y
            );
            return None;
        };

        let category = kind_for_fire(fire, tuning.bad_item_every);
        let y = rng.random_range(range) as f32;
        let half_w = size.x / 2.0;

        Some(SpawnSpec {
            category,
            start: Vec2::new(arena.max.x + half_w, y),
            end: Vec2::new(arena.min.x - half_w, y),
            duration: tuning.travel_secs,
            size,
            spin: Spin {
                radians_per_sec: tuning.spin_radians_per_sec,
            },
        })
    }
}
