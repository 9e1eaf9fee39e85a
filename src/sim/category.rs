//! Entity categories and physics filtering policy
//!
//! Every body in the world carries exactly one [`Category`]. Categories are
//! single bits, so sets of them combine with `|` into a [`CategoryMask`] and
//! membership is an intersection test.

use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Kind of entity, used for contact and collision filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// The player character (spike)
    Hazard,
    /// Floor and ceiling
    Boundary,
    /// Collectible ball (basketball)
    GoodItem,
    /// Deadly ball (football)
    BadItem,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Hazard,
        Category::Boundary,
        Category::GoodItem,
        Category::BadItem,
    ];

    /// Bit identity of this category
    pub const fn bits(self) -> u32 {
        match self {
            Category::Hazard => 1,
            Category::Boundary => 2,
            Category::GoodItem => 4,
            Category::BadItem => 8,
        }
    }

    pub const fn mask(self) -> CategoryMask {
        CategoryMask(self.bits())
    }

    /// Inverse of [`Category::bits`]; only exact single bits map back
    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.bits() == bits)
    }

    /// Physics policy for bodies of this category
    pub const fn policy(self) -> BodyPolicy {
        match self {
            Category::Hazard => BodyPolicy {
                category: self,
                contact_test: Category::GoodItem.mask().union(Category::BadItem.mask()),
                collision: Category::Boundary.mask(),
                dynamic: true,
                affected_by_gravity: true,
            },
            Category::Boundary => BodyPolicy {
                category: self,
                contact_test: CategoryMask::EMPTY,
                collision: CategoryMask::EMPTY,
                dynamic: false,
                affected_by_gravity: false,
            },
            // Balls fly on a scripted path: they report the player but
            // never get pushed around by anything.
            Category::GoodItem | Category::BadItem => BodyPolicy {
                category: self,
                contact_test: Category::Hazard.mask(),
                collision: CategoryMask::EMPTY,
                dynamic: true,
                affected_by_gravity: false,
            },
        }
    }
}

/// Union of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CategoryMask(u32);

impl CategoryMask {
    pub const EMPTY: CategoryMask = CategoryMask(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: CategoryMask) -> CategoryMask {
        CategoryMask(self.0 | other.0)
    }

    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bits() != 0
    }

    pub const fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        self.union(rhs)
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        self.union(rhs.mask())
    }
}

impl BitOr for Category {
    type Output = CategoryMask;

    fn bitor(self, rhs: Category) -> CategoryMask {
        self.mask().union(rhs.mask())
    }
}

impl BitOr<CategoryMask> for Category {
    type Output = CategoryMask;

    fn bitor(self, rhs: CategoryMask) -> CategoryMask {
        self.mask().union(rhs)
    }
}

impl BitOrAssign<Category> for CategoryMask {
    fn bitor_assign(&mut self, rhs: Category) {
        *self = self.union(rhs.mask());
    }
}

/// Declarative physics settings for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyPolicy {
    pub category: Category,
    /// Categories whose overlap raises a contact notification
    pub contact_test: CategoryMask,
    /// Categories that physically block this body
    pub collision: CategoryMask,
    /// Moved by forces or scripted motion (false for static scenery)
    pub dynamic: bool,
    pub affected_by_gravity: bool,
}

impl BodyPolicy {
    /// Either side asking to be told about the other is enough
    pub const fn reports_contact_with(&self, other: &BodyPolicy) -> bool {
        self.contact_test.contains(other.category) || other.contact_test.contains(self.category)
    }

    /// Whether `other` stops this body's movement (one-directional)
    pub const fn blocked_by(&self, other: &BodyPolicy) -> bool {
        self.dynamic && self.collision.contains(other.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_disjoint_powers_of_two() {
        let mut seen = 0u32;
        for category in Category::ALL {
            let bits = category.bits();
            assert!(bits.is_power_of_two(), "{category:?} is not a single bit");
            assert_eq!(seen & bits, 0, "{category:?} overlaps another category");
            seen |= bits;
        }
        assert_eq!(seen, 0b1111);
    }

    #[test]
    fn test_mask_membership() {
        let items = Category::GoodItem | Category::BadItem;
        assert!(items.contains(Category::GoodItem));
        assert!(items.contains(Category::BadItem));
        assert!(!items.contains(Category::Hazard));
        assert!(!items.contains(Category::Boundary));
        assert_eq!(items.bits(), 0b1100);
        assert!(items.intersects(CategoryMask::from(Category::BadItem)));
        assert!(!items.intersects(Category::Hazard | Category::Boundary));
        assert_eq!(items | Category::Hazard, Category::Hazard | items);

        let mut all = CategoryMask::EMPTY;
        for category in Category::ALL {
            all |= category;
        }
        assert!(Category::ALL.iter().all(|c| all.contains(*c)));
        assert!(CategoryMask::EMPTY.is_empty());
    }

    #[test]
    fn test_from_bits() {
        for category in Category::ALL {
            assert_eq!(Category::from_bits(category.bits()), Some(category));
        }
        assert_eq!(Category::from_bits(0), None);
        assert_eq!(Category::from_bits(3), None);
        assert_eq!(Category::from_bits(16), None);
    }

    #[test]
    fn test_player_contacts_items_only() {
        let player = Category::Hazard.policy();
        assert!(player.reports_contact_with(&Category::GoodItem.policy()));
        assert!(player.reports_contact_with(&Category::BadItem.policy()));
        assert!(!player.reports_contact_with(&Category::Boundary.policy()));
        assert!(!player.reports_contact_with(&player));
    }

    #[test]
    fn test_items_pass_through_boundaries() {
        let boundary = Category::Boundary.policy();
        for item in [Category::GoodItem, Category::BadItem] {
            let policy = item.policy();
            assert!(!policy.reports_contact_with(&boundary));
            assert!(!policy.blocked_by(&boundary));
            assert!(!policy.affected_by_gravity);
            // Items never contact each other either
            assert!(!policy.reports_contact_with(&Category::GoodItem.policy()));
        }
    }

    #[test]
    fn test_player_blocked_by_boundaries_not_balls() {
        let player = Category::Hazard.policy();
        assert!(player.blocked_by(&Category::Boundary.policy()));
        assert!(!player.blocked_by(&Category::GoodItem.policy()));
        assert!(!player.blocked_by(&Category::BadItem.policy()));
        // Static scenery is never pushed
        assert!(!Category::Boundary.policy().blocked_by(&player));
    }
}
