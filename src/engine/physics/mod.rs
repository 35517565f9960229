// Physics system using rapier3d

mod collision;
mod world;

pub use collision::{CollisionLayer, LayerMask};
pub use world::{ColliderHandle, PhysicsWorld};
