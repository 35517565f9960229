//! Capabilities the character controller consumes from its host engine.
//!
//! The controller never talks to an engine singleton. Everything it needs from
//! the outside world (collision-aware movement, ray queries, audio, animation
//! blending, transient effects, deferred callbacks, damage targets) comes in
//! through these traits. A live engine implements them over its own systems;
//! tests implement them with plain recording structs.

use glam::Vec3;

use crate::engine::physics::LayerMask;

use super::characters::animation::AnimationClip;

/// Identifier the host uses for game entities
pub type EntityId = u64;

/// One-shot sound clips the controller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundClip {
    /// Played when a swing starts
    SwordSwing,
    /// Played when a swing connects
    SwordHit,
}

impl SoundClip {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SwordSwing => "sword_swing",
            Self::SwordHit => "sword_hit",
        }
    }
}

/// Transient visual effects the controller can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Impact burst at the point a swing connected
    HitImpact,
}

/// Nearest hit reported by a ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    /// Entity owning the hit collider, if the host knows one
    pub entity: Option<EntityId>,
}

/// Collision-aware movement of the controlled body
pub trait Mover {
    /// Current world position of the body
    fn position(&self) -> Vec3;

    /// Move by `delta`, sliding along obstacles. Returns whether the body is
    /// resting on walkable ground afterwards.
    fn move_by(&mut self, delta: Vec3) -> bool;

    /// Resize the body's collider (standing / crouching)
    fn set_collider_height(&mut self, height: f32);
}

/// Ray queries against the host's collision world
pub trait Raycaster {
    /// Nearest hit along `direction` within `max_distance`, restricted to colliders in `mask`
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play_one_shot(&mut self, clip: SoundClip, pitch: f32);
}

/// Animation blending engine
pub trait Animator {
    /// Blend from the playing clip to `clip` over `blend_duration` seconds
    fn crossfade(&mut self, clip: AnimationClip, blend_duration: f32);
}

/// Spawner for short-lived visual effects
pub trait EffectSpawner {
    /// Spawn `kind` at `position`; the host removes it after `lifetime` seconds
    fn spawn_effect(&mut self, kind: EffectKind, position: Vec3, lifetime: f32);
}

/// Anything a melee hit can hurt
pub trait Damageable {
    fn take_damage(&mut self, amount: i32);
}

/// Lookup from hit entities to their damage capability
pub trait DamageTargets {
    /// `None` when the entity exists but cannot take damage
    fn damageable(&mut self, entity: EntityId) -> Option<&mut dyn Damageable>;
}

/// Deferred one-shot callbacks, fired on the update thread at a later tick boundary
pub trait Scheduler<T> {
    fn schedule(&mut self, task: T, delay: f32);
}

/// Every capability a character needs during a tick
pub trait Host: Mover + Raycaster + AudioSink + Animator + EffectSpawner + DamageTargets {}

impl<T> Host for T where T: Mover + Raycaster + AudioSink + Animator + EffectSpawner + DamageTargets
{}
