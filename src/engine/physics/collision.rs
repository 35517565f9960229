use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Collision categories every collider belongs to exactly one of
///
/// Ray queries and the melee hit check filter on these, e.g. a swing only
/// reports colliders in the damage-eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Player characters
    Player = 0b0000_0010,

    /// Hostile actors and training dummies
    Enemy = 0b0000_0100,

    /// Static level geometry (floors, walls)
    Environment = 0b0000_1000,
}

impl CollisionLayer {
    pub fn mask(self) -> LayerMask {
        LayerMask(self as u32)
    }

    /// Groups used when inserting a collider on this layer
    pub fn interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::from_bits_truncate(self as u32), Group::ALL)
    }
}

/// Set of collision layers, used as a query filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const PLAYER: LayerMask = LayerMask(CollisionLayer::Player as u32);
    pub const ENEMY: LayerMask = LayerMask(CollisionLayer::Enemy as u32);
    pub const ENVIRONMENT: LayerMask = LayerMask(CollisionLayer::Environment as u32);

    pub fn contains(self, layer: CollisionLayer) -> bool {
        self.0 & layer as u32 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Query groups that accept any collider whose layer is in this mask
    pub fn query_groups(self) -> InteractionGroups {
        InteractionGroups::new(Group::ALL, Group::from_bits_truncate(self.0))
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        layer.mask()
    }
}

impl BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        LayerMask(self.0 | rhs.0)
    }
}

impl BitOr<CollisionLayer> for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: CollisionLayer) -> Self::Output {
        LayerMask(self.0 | rhs as u32)
    }
}

impl BitOrAssign<CollisionLayer> for LayerMask {
    fn bitor_assign(&mut self, rhs: CollisionLayer) {
        self.0 |= rhs as u32;
    }
}
