//! Entity descriptions handed to the host world
//!
//! The core never owns bodies. It describes what to create with an
//! [`EntitySpec`] and afterwards refers to it only by [`EntityId`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::{BodyPolicy, Category};

/// Stable entity handle, allocated by [`super::GameState`]
pub type EntityId = u32;

/// Visible play region (origin at the center of the screen, +y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub min: Vec2,
    pub max: Vec2,
    pub floor_height: f32,
    pub ceiling_height: f32,
}

impl Arena {
    /// Arena of the given size centered on the origin
    pub fn centered(width: f32, height: f32, floor_height: f32, ceiling_height: f32) -> Self {
        let half = Vec2::new(width, height) / 2.0;
        Self {
            min: -half,
            max: half,
            floor_height,
            ceiling_height,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Top surface of the floor
    pub fn floor_top(&self) -> f32 {
        self.min.y + self.floor_height
    }

    /// Bottom surface of the ceiling
    pub fn ceiling_bottom(&self) -> f32 {
        self.max.y - self.ceiling_height
    }

    pub fn floor_center(&self) -> Vec2 {
        Vec2::new(self.center().x, self.min.y + self.floor_height / 2.0)
    }

    pub fn ceiling_center(&self) -> Vec2 {
        Vec2::new(self.center().x, self.max.y - self.ceiling_height / 2.0)
    }
}

/// How an entity moves once it is in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Static scenery
    None,
    /// Scripted straight-line move; the entity is removed when it arrives
    Linear { from: Vec2, to: Vec2, duration: f32 },
    /// Driven by the physics engine (gravity, impulses)
    Physics,
}

/// Continuous cosmetic rotation, independent of the entity's path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spin {
    pub radians_per_sec: f32,
}

/// Everything the host needs to create a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: EntityId,
    pub category: Category,
    pub position: Vec2,
    pub size: Vec2,
    pub motion: Motion,
    pub spin: Option<Spin>,
}

impl EntitySpec {
    pub fn policy(&self) -> BodyPolicy {
        self.category.policy()
    }

    pub fn is_dynamic(&self) -> bool {
        self.policy().dynamic
    }

    /// Round bodies use a circle of half their height
    pub fn radius(&self) -> f32 {
        self.size.y / 2.0
    }

    /// Player body resting at `position`
    pub fn player(id: EntityId, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category: Category::Hazard,
            position,
            size,
            motion: Motion::Physics,
            spin: None,
        }
    }

    /// Full-width floor slab
    pub fn floor(id: EntityId, arena: &Arena) -> Self {
        Self::boundary(id, arena.floor_center(), Vec2::new(arena.width(), arena.floor_height))
    }

    /// Full-width ceiling slab
    pub fn ceiling(id: EntityId, arena: &Arena) -> Self {
        Self::boundary(
            id,
            arena.ceiling_center(),
            Vec2::new(arena.width(), arena.ceiling_height),
        )
    }

    fn boundary(id: EntityId, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            category: Category::Boundary,
            position,
            size,
            motion: Motion::None,
            spin: None,
        }
    }
}
