//! Reference host for one first-person player.
//!
//! Backs every capability the character consumes with engine-side systems:
//! the rapier world moves the player capsule and answers hit rays, the effect
//! pool holds impact effects, and damageable targets are plain `Health`
//! values keyed by entity. Audio and animation have no backend here; requests
//! are logged and the last one is remembered.

use glam::Vec3;
use std::collections::HashMap;

use super::effects::EffectPool;
use super::physics::{ColliderHandle, CollisionLayer, LayerMask, PhysicsWorld};
use crate::game::characters::animation::AnimationClip;
use crate::game::characters::health::Health;
use crate::game::host::{
    Animator, AudioSink, DamageTargets, Damageable, EffectKind, EffectSpawner, EntityId, Mover,
    RayHit, Raycaster, SoundClip,
};

/// Radius of the player capsule
pub const PLAYER_RADIUS: f32 = 0.5;

pub struct Sandbox {
    physics: PhysicsWorld,
    player: ColliderHandle,
    effects: EffectPool,
    targets: HashMap<EntityId, Health>,

    /// Clip the animator was last asked to blend to
    playing_clip: Option<AnimationClip>,
    /// Sounds requested so far, in order
    sounds: Vec<(SoundClip, f32)>,
}

impl Sandbox {
    /// Create an empty world with the player capsule centred on `spawn`
    pub fn new(player_entity: EntityId, spawn: Vec3, player_height: f32) -> Self {
        let mut physics = PhysicsWorld::new();
        let player = physics.add_character(spawn, PLAYER_RADIUS, player_height, player_entity);
        log::info!("Sandbox created, player entity {} at {:?}", player_entity, spawn);

        Self {
            physics,
            player,
            effects: EffectPool::new(),
            targets: HashMap::new(),
            playing_clip: None,
            sounds: Vec::new(),
        }
    }

    /// Add a flat floor whose top surface is at y = 0
    pub fn add_floor(&mut self, half_size: f32) {
        self.physics.add_static_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(half_size, 0.5, half_size),
            CollisionLayer::Environment,
            None,
        );
    }

    /// Add a solid wall on the environment layer
    pub fn add_wall(&mut self, center: Vec3, half_extents: Vec3) {
        self.physics
            .add_static_box(center, half_extents, CollisionLayer::Environment, None);
    }

    /// Add a damageable box on the enemy layer
    pub fn add_target(&mut self, entity: EntityId, center: Vec3, half_extents: Vec3, health: i32) {
        self.physics
            .add_static_box(center, half_extents, CollisionLayer::Enemy, Some(entity));
        self.targets.insert(entity, Health::new(health));
        log::info!("Target {} placed at {:?} with {} health", entity, center, health);
    }

    /// Advance the host's own systems after the characters have ticked
    pub fn update(&mut self, dt: f32) {
        self.physics.step();
        self.effects.update(dt);
    }

    pub fn target(&self, entity: EntityId) -> Option<&Health> {
        self.targets.get(&entity)
    }

    pub fn effects(&self) -> &EffectPool {
        &self.effects
    }

    pub fn playing_clip(&self) -> Option<AnimationClip> {
        self.playing_clip
    }

    pub fn sounds(&self) -> &[(SoundClip, f32)] {
        &self.sounds
    }

    pub fn player_height(&self) -> Option<f32> {
        self.physics.character_height(self.player)
    }
}

impl Mover for Sandbox {
    fn position(&self) -> Vec3 {
        self.physics
            .collider_translation(self.player)
            .unwrap_or_default()
    }

    fn move_by(&mut self, delta: Vec3) -> bool {
        self.physics.move_character(self.player, delta)
    }

    fn set_collider_height(&mut self, height: f32) {
        self.physics.set_character_height(self.player, height);
    }
}

impl Raycaster for Sandbox {
    fn cast_ray(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        // The camera sits inside the player capsule
        self.physics
            .raycast(origin, direction, max_distance, mask, Some(self.player))
    }
}

impl AudioSink for Sandbox {
    fn play_one_shot(&mut self, clip: SoundClip, pitch: f32) {
        log::debug!("Playing sound '{}' (pitch {:.2})", clip.name(), pitch);
        self.sounds.push((clip, pitch));
    }
}

impl Animator for Sandbox {
    fn crossfade(&mut self, clip: AnimationClip, blend_duration: f32) {
        log::debug!("Crossfade to '{}' over {:.2}s", clip.name(), blend_duration);
        self.playing_clip = Some(clip);
    }
}

impl EffectSpawner for Sandbox {
    fn spawn_effect(&mut self, kind: EffectKind, position: Vec3, lifetime: f32) {
        self.effects.spawn_effect(kind, position, lifetime);
    }
}

impl DamageTargets for Sandbox {
    fn damageable(&mut self, entity: EntityId) -> Option<&mut dyn Damageable> {
        self.targets
            .get_mut(&entity)
            .map(|health| health as &mut dyn Damageable)
    }
}
