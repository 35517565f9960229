//! Transient visual effects.
//!
//! Effects are presentation only: the pool tracks what is alive and where,
//! and drops each effect once its lifetime has run out.

use glam::Vec3;

use crate::game::host::{EffectKind, EffectSpawner};

/// Identifier handed out for each spawned effect
pub type EffectId = u32;

/// A spawned effect waiting for its lifetime to run out
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub position: Vec3,
    /// Seconds left before the effect is removed
    pub remaining: f32,
}

/// Owns every live transient effect
#[derive(Debug, Default)]
pub struct EffectPool {
    effects: Vec<ActiveEffect>,
    next_id: EffectId,
}

impl EffectPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Age all effects by `dt` and drop the expired ones.
    /// Returns how many were removed.
    pub fn update(&mut self, dt: f32) -> usize {
        let before = self.effects.len();
        for effect in &mut self.effects {
            effect.remaining -= dt;
        }
        self.effects.retain(|effect| effect.remaining > 0.0);

        let expired = before - self.effects.len();
        if expired > 0 {
            log::trace!("Expired {} effect(s), {} still alive", expired, self.effects.len());
        }
        expired
    }

    pub fn active(&self) -> &[ActiveEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl EffectSpawner for EffectPool {
    fn spawn_effect(&mut self, kind: EffectKind, position: Vec3, lifetime: f32) {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);

        log::debug!("Spawned {:?} #{} at {:?} for {:.1}s", kind, id, position, lifetime);
        self.effects.push(ActiveEffect {
            id,
            kind,
            position,
            remaining: lifetime,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_lives_for_its_lifetime() {
        let mut pool = EffectPool::new();
        pool.spawn_effect(EffectKind::HitImpact, Vec3::new(1.0, 2.0, 3.0), 20.0);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.active()[0].position, Vec3::new(1.0, 2.0, 3.0));

        assert_eq!(pool.update(19.5), 0);
        assert_eq!(pool.len(), 1);

        assert_eq!(pool.update(1.0), 1);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_effects_expire_independently() {
        let mut pool = EffectPool::new();
        pool.spawn_effect(EffectKind::HitImpact, Vec3::ZERO, 1.0);
        pool.update(0.5);
        pool.spawn_effect(EffectKind::HitImpact, Vec3::X, 1.0);

        pool.update(0.75);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.active()[0].id, 1);
    }
}
