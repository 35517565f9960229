// First-person character: ties locomotion, look, combat and animation together
//
// One `tick` per simulation step, in a fixed order:
// 1. fire due combat tasks (hit rays use the camera as it is at fire time)
// 2. locomotion
// 3. look
// 4. attack input
// 5. animation arbitration

use glam::Vec3;

use super::animation::{self, AnimationClip, AnimationDriver, AnimationLayer, LayerClaim};
use super::combat::{CombatPhase, CombatState, CombatTask, HitReport};
use super::config::ControllerConfig;
use super::locomotion::LocomotionState;
use super::look::{LookState, Orientation};
use crate::engine::input::FrameInput;
use crate::engine::timer::TimerQueue;
use crate::game::host::{EntityId, Host};

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Displacement submitted to the mover
    pub displacement: Vec3,
    /// Whether a swing started this tick
    pub attack_started: bool,
    /// Hits resolved this tick
    pub hits: Vec<HitReport>,
}

/// A first-person character driven by per-tick input
#[derive(Debug)]
pub struct Character {
    /// Entity the host knows this character by
    pub id: EntityId,
    /// Character name (for display)
    pub name: String,

    locomotion: LocomotionState,
    look: LookState,
    combat: CombatState,
    animation: AnimationDriver,
    orientation: Orientation,
    eye_height: f32,

    /// Deferred combat work, advanced at the start of every tick
    timers: TimerQueue<CombatTask>,
}

impl Character {
    pub fn new(id: EntityId, name: &str, config: &ControllerConfig) -> Self {
        log::info!("Spawning character '{}' (entity {})", name, id);
        Self {
            id,
            name: name.to_string(),
            locomotion: LocomotionState::new(config.locomotion.clone()),
            look: LookState::new(&config.look),
            combat: CombatState::new(config.combat.clone()),
            animation: AnimationDriver::new(),
            orientation: Orientation::default(),
            eye_height: config.look.eye_height,
            timers: TimerQueue::new(),
        }
    }

    /// Advance the character by `dt` seconds
    pub fn tick<H: Host + ?Sized>(
        &mut self,
        input: &FrameInput,
        dt: f32,
        host: &mut H,
    ) -> TickReport {
        let mut report = TickReport::default();

        for task in self.timers.advance(dt) {
            let origin = self.camera_origin(&*host);
            let direction = self.orientation.camera_forward();
            if let Some(hit) = self.combat.run_task(task, origin, direction, host) {
                report.hits.push(hit);
            }
        }

        report.displacement = self.locomotion.update(input, self.orientation.body, dt, host);

        self.look.update(input.look, self.locomotion.can_move(), &mut self.orientation);

        if input.attack {
            report.attack_started =
                self.combat.try_attack(&mut self.timers, host, &mut self.animation);
        }

        let claims = [
            LayerClaim::new(
                AnimationLayer::Locomotion,
                true,
                Some(AnimationClip::for_movement(input.forward, input.right)),
            ),
            LayerClaim::new(AnimationLayer::Attack, self.combat.is_attacking(), None),
        ];
        if let Some(clip) = animation::resolve(&claims) {
            self.animation.change(clip, host);
        }

        report
    }

    /// Freeze or release movement and look (e.g. while a menu owns the cursor)
    pub fn set_movement_enabled(&mut self, enabled: bool) {
        if enabled != self.locomotion.can_move() {
            log::debug!(
                "Movement {} for '{}'",
                if enabled { "enabled" } else { "disabled" },
                self.name
            );
        }
        self.locomotion.set_movement_enabled(enabled);
    }

    /// World-space camera position
    pub fn camera_origin<H: Host + ?Sized>(&self, host: &H) -> Vec3 {
        host.position() + Vec3::Y * self.eye_height
    }

    pub fn orientation(&self) -> &Orientation {
        &self.orientation
    }

    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    pub fn look(&self) -> &LookState {
        &self.look
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    pub fn combat_phase(&self) -> CombatPhase {
        self.combat.phase()
    }

    pub fn animation(&self) -> &AnimationDriver {
        &self.animation
    }

    /// Combat tasks armed but not fired yet
    pub fn pending_tasks(&self) -> usize {
        self.timers.pending()
    }
}
