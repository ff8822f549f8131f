//! Physics bodies and category filtering
//!
//! Every collidable entity carries one `Category` and two sets of
//! categories: the ones it is physically blocked by and the ones that only
//! notify on overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision role of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bird,
    Ground,
    Wall,
    ScoreZone,
    Item,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bird,
        Category::Ground,
        Category::Wall,
        Category::ScoreZone,
        Category::Item,
    ];

    const fn index(self) -> usize {
        match self {
            Category::Bird => 0,
            Category::Ground => 1,
            Category::Wall => 2,
            Category::ScoreZone => 3,
            Category::Item => 4,
        }
    }
}

/// A finite set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet {
    members: [bool; 5],
}

impl CategorySet {
    pub const EMPTY: CategorySet = CategorySet { members: [false; 5] };

    pub fn of(categories: &[Category]) -> Self {
        let mut set = Self::EMPTY;
        for &c in categories {
            set.insert(c);
        }
        set
    }

    pub fn contains(&self, category: Category) -> bool {
        self.members[category.index()]
    }

    pub fn insert(&mut self, category: Category) {
        self.members[category.index()] = true;
    }

    pub fn remove(&mut self, category: Category) {
        self.members[category.index()] = false;
    }

    pub fn is_empty(&self) -> bool {
        !self.members.iter().any(|&m| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|c| self.contains(*c))
    }
}

/// Collision shape, centred on the owning entity's position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { half_extents: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub category: Category,
    pub shape: Shape,
    /// Categories this body is physically blocked by
    pub collides_with: CategorySet,
    /// Categories whose overlap with this body produces a contact event
    pub notifies_on: CategorySet,
}

impl Body {
    /// The bird: a circle blocked by and notified on ground and walls
    pub fn bird(radius: f32) -> Self {
        let solid = CategorySet::of(&[Category::Ground, Category::Wall]);
        Self {
            category: Category::Bird,
            shape: Shape::Circle { radius },
            collides_with: solid,
            notifies_on: solid,
        }
    }

    /// A static rectangle that blocks nothing and notifies nothing
    pub fn rect(category: Category, size: Vec2) -> Self {
        Self {
            category,
            shape: Shape::Rect {
                half_extents: size / 2.0,
            },
            collides_with: CategorySet::EMPTY,
            notifies_on: CategorySet::EMPTY,
        }
    }

    /// A static rectangle that notifies when a bird overlaps it
    pub fn trigger(category: Category, size: Vec2) -> Self {
        Self {
            notifies_on: CategorySet::of(&[Category::Bird]),
            ..Self::rect(category, size)
        }
    }

    /// True if this body gets pushed out of `other`
    pub fn blocked_by(&self, other: &Body) -> bool {
        self.collides_with.contains(other.category)
    }

    /// True if an overlap between the two bodies is reported
    pub fn notifies_with(&self, other: &Body) -> bool {
        self.notifies_on.contains(other.category) || other.notifies_on.contains(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_set_membership() {
        let mut set = CategorySet::of(&[Category::Ground, Category::Wall]);
        assert!(set.contains(Category::Ground));
        assert!(set.contains(Category::Wall));
        assert!(!set.contains(Category::Item));

        set.remove(Category::Wall);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Category::Ground]);
        assert!(!set.is_empty());
        assert!(CategorySet::EMPTY.is_empty());
    }

    #[test]
    fn test_bird_blocked_by_ground_and_wall_only() {
        let bird = Body::bird(22.0);
        let ground = Body::rect(Category::Ground, Vec2::new(336.0, 112.0));
        let wall = Body::rect(Category::Wall, Vec2::new(64.0, 480.0));
        let zone = Body::trigger(Category::ScoreZone, Vec2::new(64.0, 667.0));
        let item = Body::trigger(Category::Item, Vec2::new(40.0, 40.0));

        assert!(bird.blocked_by(&ground));
        assert!(bird.blocked_by(&wall));
        assert!(!bird.blocked_by(&zone));
        assert!(!bird.blocked_by(&item));
    }

    #[test]
    fn test_notification_is_symmetric() {
        let bird = Body::bird(22.0);
        let ground = Body::rect(Category::Ground, Vec2::new(336.0, 112.0));
        let zone = Body::trigger(Category::ScoreZone, Vec2::new(64.0, 667.0));

        // Bird asks for ground notifications; the zone asks for bird ones
        assert!(bird.notifies_with(&ground));
        assert!(ground.notifies_with(&bird));
        assert!(bird.notifies_with(&zone));
        assert!(zone.notifies_with(&bird));
        assert!(!ground.notifies_with(&zone));
    }
}
