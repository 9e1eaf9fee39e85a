//! Contact resolution
//!
//! The physics host reports overlaps as unordered pairs. Resolution works on
//! the union of both categories, so which body comes first never matters.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::entity::EntityId;

/// One side of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBody {
    pub id: EntityId,
    pub category: Category,
}

/// Overlap notification for two bodies (unordered)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub a: ContactBody,
    pub b: ContactBody,
}

impl ContactEvent {
    pub fn new(a: (EntityId, Category), b: (EntityId, Category)) -> Self {
        Self {
            a: ContactBody { id: a.0, category: a.1 },
            b: ContactBody { id: b.0, category: b.1 },
        }
    }

    /// Same pair, other order
    pub fn swapped(self) -> Self {
        Self { a: self.b, b: self.a }
    }

    pub fn resolve(&self) -> Action {
        resolve(self.a.category, self.b.category, self.a.id, self.b.id)
    }
}

/// What a contact means for the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Player caught a good item: remove it and add a point
    Score { item: EntityId },
    /// Player touched a bad item: remove it and end the run
    GameOver { item: EntityId },
    /// Nothing happens
    Ignore,
}

/// Decide what a contact between two bodies does
pub fn resolve(
    category_a: Category,
    category_b: Category,
    entity_a: EntityId,
    entity_b: EntityId,
) -> Action {
    let pair = category_a | category_b;
    if !pair.contains(Category::Hazard) {
        return Action::Ignore;
    }

    let pick = |wanted: Category| {
        if category_a == wanted {
            Some(entity_a)
        } else if category_b == wanted {
            Some(entity_b)
        } else {
            None
        }
    };

    if let Some(item) = pick(Category::GoodItem) {
        Action::Score { item }
    } else if let Some(item) = pick(Category::BadItem) {
        Action::GameOver { item }
    } else {
        Action::Ignore
    }
}
