// Melee combat state machine
//
// Idle -> Attacking on attack input, back to Idle when the reset task fires.
// The hit check is a separate task armed at the same moment, so the two can
// fire in either order depending on tuning. A hit that resolves after the
// reset (attack_delay > attack_speed) still lands, even if a newer swing has
// started by then.

use glam::Vec3;

use super::animation::{AnimationClip, AnimationDriver};
use super::config::CombatConfig;
use crate::game::host::{
    Animator, AudioSink, DamageTargets, EffectKind, EffectSpawner, EntityId, Raycaster,
    Scheduler, SoundClip,
};

/// Pitch of the swing sound
pub const SWING_PITCH: f32 = 1.0;

/// Pitch of the impact sound
pub const HIT_PITCH: f32 = 1.0;

/// Seconds an impact effect stays in the world
pub const HIT_EFFECT_LIFETIME: f32 = 20.0;

/// Deferred work armed by a swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatTask {
    /// Return to idle and accept the next swing
    ResetAttack,
    /// Cast the hit ray and apply the outcome
    ResolveHit,
}

/// Externally visible phase of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatPhase {
    Idle,
    Attacking,
}

/// What a resolved swing connected with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    pub point: Vec3,
    pub entity: Option<EntityId>,
    /// Whether the target could take damage
    pub damaged: bool,
}

/// Melee state owned by one character
#[derive(Debug, Clone)]
pub struct CombatState {
    config: CombatConfig,
    attacking: bool,
    ready_to_attack: bool,
    /// Selects the next swing clip: 0 -> A, 1 -> B
    attack_count: u8,
}

impl CombatState {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            attacking: false,
            ready_to_attack: true,
            attack_count: 0,
        }
    }

    /// Try to start a swing. Rejected without side effects while a swing is
    /// in flight. Returns whether the swing started.
    pub fn try_attack<S, H>(
        &mut self,
        scheduler: &mut S,
        host: &mut H,
        animation: &mut AnimationDriver,
    ) -> bool
    where
        S: Scheduler<CombatTask> + ?Sized,
        H: AudioSink + Animator + ?Sized,
    {
        if !self.ready_to_attack || self.attacking {
            log::trace!("Attack rejected, swing already in flight");
            return false;
        }

        self.ready_to_attack = false;
        self.attacking = true;

        scheduler.schedule(CombatTask::ResetAttack, self.config.attack_speed);
        scheduler.schedule(CombatTask::ResolveHit, self.config.attack_delay);

        host.play_one_shot(SoundClip::SwordSwing, SWING_PITCH);

        let clip = if self.attack_count == 0 {
            self.attack_count = 1;
            AnimationClip::AttackA
        } else {
            self.attack_count = 0;
            AnimationClip::AttackB
        };
        animation.change(clip, host);

        log::debug!(
            "Swing started ({}), hit in {:.2}s, ready in {:.2}s",
            clip.name(),
            self.config.attack_delay,
            self.config.attack_speed
        );
        true
    }

    /// Run a task that came due. `origin`/`direction` describe the camera at
    /// the moment the task fires.
    pub fn run_task<H>(
        &mut self,
        task: CombatTask,
        origin: Vec3,
        direction: Vec3,
        host: &mut H,
    ) -> Option<HitReport>
    where
        H: Raycaster + AudioSink + EffectSpawner + DamageTargets + ?Sized,
    {
        match task {
            CombatTask::ResetAttack => {
                self.reset_attack();
                None
            }
            CombatTask::ResolveHit => self.resolve_hit(origin, direction, host),
        }
    }

    fn reset_attack(&mut self) {
        self.attacking = false;
        self.ready_to_attack = true;
        log::trace!("Attack reset, ready");
    }

    /// Cast the hit ray and apply sound, effect and damage on a hit
    pub fn resolve_hit<H>(&self, origin: Vec3, direction: Vec3, host: &mut H) -> Option<HitReport>
    where
        H: Raycaster + AudioSink + EffectSpawner + DamageTargets + ?Sized,
    {
        let hit = host.cast_ray(
            origin,
            direction,
            self.config.attack_distance,
            self.config.attack_layer,
        )?;

        host.play_one_shot(SoundClip::SwordHit, HIT_PITCH);
        host.spawn_effect(EffectKind::HitImpact, hit.point, HIT_EFFECT_LIFETIME);

        let target = match hit.entity {
            Some(entity) => host.damageable(entity),
            None => None,
        };
        let damaged = match target {
            Some(target) => {
                target.take_damage(self.config.attack_damage);
                true
            }
            None => false,
        };

        log::info!(
            "Swing hit {} at {:?} ({:.2}m){}",
            hit.entity
                .map_or_else(|| "unknown entity".to_string(), |e| format!("entity {e}")),
            hit.point,
            hit.distance,
            if damaged {
                format!(", {} damage", self.config.attack_damage)
            } else {
                String::new()
            }
        );

        Some(HitReport {
            point: hit.point,
            entity: hit.entity,
            damaged,
        })
    }

    pub fn phase(&self) -> CombatPhase {
        if self.attacking {
            CombatPhase::Attacking
        } else {
            CombatPhase::Idle
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_ready(&self) -> bool {
        self.ready_to_attack
    }

    pub fn attack_count(&self) -> u8 {
        self.attack_count
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::LayerMask;
    use crate::engine::timer::TimerQueue;
    use crate::game::characters::config::BASE_COMBAT;
    use crate::game::host::{Damageable, RayHit};

    #[derive(Default)]
    struct RecordingScheduler {
        armed: Vec<(CombatTask, f32)>,
    }

    impl Scheduler<CombatTask> for RecordingScheduler {
        fn schedule(&mut self, task: CombatTask, delay: f32) {
            self.armed.push((task, delay));
        }
    }

    #[derive(Default)]
    struct Dummy {
        damage_taken: i32,
    }

    impl Damageable for Dummy {
        fn take_damage(&mut self, amount: i32) {
            self.damage_taken += amount;
        }
    }

    #[derive(Default)]
    struct FakeHost {
        hit: Option<RayHit>,
        last_mask: std::cell::Cell<Option<LayerMask>>,
        sounds: Vec<(SoundClip, f32)>,
        crossfades: Vec<AnimationClip>,
        effects: Vec<(EffectKind, Vec3, f32)>,
        dummy: Dummy,
        dummy_id: EntityId,
    }

    impl Raycaster for FakeHost {
        fn cast_ray(
            &self,
            _origin: Vec3,
            _direction: Vec3,
            _max: f32,
            mask: LayerMask,
        ) -> Option<RayHit> {
            self.last_mask.set(Some(mask));
            self.hit
        }
    }

    impl AudioSink for FakeHost {
        fn play_one_shot(&mut self, clip: SoundClip, pitch: f32) {
            self.sounds.push((clip, pitch));
        }
    }

    impl Animator for FakeHost {
        fn crossfade(&mut self, clip: AnimationClip, _blend_duration: f32) {
            self.crossfades.push(clip);
        }
    }

    impl EffectSpawner for FakeHost {
        fn spawn_effect(&mut self, kind: EffectKind, position: Vec3, lifetime: f32) {
            self.effects.push((kind, position, lifetime));
        }
    }

    impl DamageTargets for FakeHost {
        fn damageable(&mut self, entity: EntityId) -> Option<&mut dyn Damageable> {
            if entity == self.dummy_id {
                Some(&mut self.dummy)
            } else {
                None
            }
        }
    }

    fn hit_at(entity: EntityId) -> RayHit {
        RayHit {
            point: Vec3::new(0.0, 1.6, -2.0),
            distance: 2.0,
            entity: Some(entity),
        }
    }

    #[test]
    fn test_starts_idle() {
        let combat = CombatState::new(BASE_COMBAT);
        assert_eq!(combat.phase(), CombatPhase::Idle);
        assert!(combat.is_ready());
        assert!(!combat.is_attacking());
        assert_eq!(combat.attack_count(), 0);
    }

    #[test]
    fn test_attack_arms_both_tasks_and_plays_swing() {
        let mut combat = CombatState::new(BASE_COMBAT);
        let mut scheduler = RecordingScheduler::default();
        let mut host = FakeHost::default();
        let mut animation = AnimationDriver::new();

        assert!(combat.try_attack(&mut scheduler, &mut host, &mut animation));
        assert_eq!(combat.phase(), CombatPhase::Attacking);
        assert!(!combat.is_ready());
        assert_eq!(
            scheduler.armed,
            vec![(CombatTask::ResetAttack, 1.0), (CombatTask::ResolveHit, 0.4)]
        );
        assert_eq!(host.sounds, vec![(SoundClip::SwordSwing, SWING_PITCH)]);
        assert_eq!(host.crossfades, vec![AnimationClip::AttackA]);
    }

    #[test]
    fn test_attack_while_attacking_is_rejected() {
        let mut combat = CombatState::new(BASE_COMBAT);
        let mut scheduler = RecordingScheduler::default();
        let mut host = FakeHost::default();
        let mut animation = AnimationDriver::new();

        combat.try_attack(&mut scheduler, &mut host, &mut animation);
        let count = combat.attack_count();

        for _ in 0..5 {
            assert!(!combat.try_attack(&mut scheduler, &mut host, &mut animation));
        }
        assert_eq!(scheduler.armed.len(), 2);
        assert_eq!(host.sounds.len(), 1);
        assert_eq!(host.crossfades.len(), 1);
        assert_eq!(combat.attack_count(), count);
    }

    #[test]
    fn test_clips_alternate_across_swings() {
        let mut combat = CombatState::new(BASE_COMBAT);
        let mut scheduler = RecordingScheduler::default();
        let mut host = FakeHost::default();
        let mut animation = AnimationDriver::new();

        for _ in 0..4 {
            assert!(combat.try_attack(&mut scheduler, &mut host, &mut animation));
            // Rejected attempt between swings must not consume the alternation
            assert!(!combat.try_attack(&mut scheduler, &mut host, &mut animation));
            combat.run_task(CombatTask::ResetAttack, Vec3::ZERO, Vec3::NEG_Z, &mut host);
        }

        assert_eq!(
            host.crossfades,
            vec![
                AnimationClip::AttackA,
                AnimationClip::AttackB,
                AnimationClip::AttackA,
                AnimationClip::AttackB
            ]
        );
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut combat = CombatState::new(BASE_COMBAT);
        let mut scheduler = RecordingScheduler::default();
        let mut host = FakeHost::default();
        let mut animation = AnimationDriver::new();

        combat.try_attack(&mut scheduler, &mut host, &mut animation);
        combat.run_task(CombatTask::ResetAttack, Vec3::ZERO, Vec3::NEG_Z, &mut host);

        assert_eq!(combat.phase(), CombatPhase::Idle);
        assert!(combat.is_ready());
    }

    #[test]
    fn test_hit_applies_sound_effect_and_damage() {
        let combat = CombatState::new(BASE_COMBAT);
        let mut host = FakeHost {
            hit: Some(hit_at(9)),
            dummy_id: 9,
            ..Default::default()
        };

        let report = combat
            .resolve_hit(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Z, &mut host)
            .expect("ray was scripted to hit");

        assert!(report.damaged);
        assert_eq!(report.entity, Some(9));
        assert_eq!(host.dummy.damage_taken, 1);
        assert_eq!(host.sounds, vec![(SoundClip::SwordHit, HIT_PITCH)]);
        assert_eq!(
            host.effects,
            vec![(EffectKind::HitImpact, report.point, HIT_EFFECT_LIFETIME)]
        );
    }

    #[test]
    fn test_hit_on_non_damageable_still_plays_effects() {
        let combat = CombatState::new(BASE_COMBAT);
        let mut host = FakeHost {
            hit: Some(hit_at(3)),
            dummy_id: 9,
            ..Default::default()
        };

        let report = combat
            .resolve_hit(Vec3::ZERO, Vec3::NEG_Z, &mut host)
            .expect("ray was scripted to hit");

        assert!(!report.damaged);
        assert_eq!(host.dummy.damage_taken, 0);
        assert_eq!(host.sounds.len(), 1);
        assert_eq!(host.effects.len(), 1);
    }

    #[test]
    fn test_hit_without_entity_is_skipped_quietly() {
        let combat = CombatState::new(BASE_COMBAT);
        let mut host = FakeHost {
            hit: Some(RayHit {
                entity: None,
                ..hit_at(0)
            }),
            ..Default::default()
        };

        let report = combat.resolve_hit(Vec3::ZERO, Vec3::NEG_Z, &mut host).unwrap();
        assert!(!report.damaged);
        assert_eq!(host.effects.len(), 1);
    }

    #[test]
    fn test_miss_has_no_side_effects() {
        let combat = CombatState::new(BASE_COMBAT);
        let mut host = FakeHost::default();

        assert!(combat.resolve_hit(Vec3::ZERO, Vec3::NEG_Z, &mut host).is_none());
        assert!(host.sounds.is_empty());
        assert!(host.effects.is_empty());
        assert_eq!(host.last_mask.get(), Some(LayerMask::ENEMY));
    }

    #[test]
    fn test_late_hit_lands_after_reset() {
        // attack_delay > attack_speed: the reset fires first and the hit still resolves
        let config = CombatConfig {
            attack_delay: 1.5,
            attack_speed: 1.0,
            ..BASE_COMBAT
        };
        let mut combat = CombatState::new(config);
        let mut timers = TimerQueue::new();
        let mut host = FakeHost {
            hit: Some(hit_at(9)),
            dummy_id: 9,
            ..Default::default()
        };
        let mut animation = AnimationDriver::new();

        combat.try_attack(&mut timers, &mut host, &mut animation);

        assert_eq!(timers.advance(1.0), vec![CombatTask::ResetAttack]);
        combat.run_task(CombatTask::ResetAttack, Vec3::ZERO, Vec3::NEG_Z, &mut host);
        assert_eq!(combat.phase(), CombatPhase::Idle);

        // A new swing starts before the first one's hit resolves
        assert!(combat.try_attack(&mut timers, &mut host, &mut animation));

        let due = timers.advance(0.5);
        assert_eq!(due, vec![CombatTask::ResolveHit]);
        for task in due {
            combat.run_task(task, Vec3::ZERO, Vec3::NEG_Z, &mut host);
        }

        // Damage from the first swing landed while the second one is in flight
        assert_eq!(host.dummy.damage_taken, 1);
        assert_eq!(combat.phase(), CombatPhase::Attacking);
    }
}
