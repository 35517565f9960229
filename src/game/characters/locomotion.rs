// Locomotion integrator
//
// Turns the movement part of a FrameInput into a displacement and hands it to
// the host mover. Horizontal velocity is rebuilt from input every tick; the
// vertical component carries over between ticks so gravity can accumulate.

use glam::{Quat, Vec3};

use super::config::LocomotionConfig;
use crate::core::math;
use crate::engine::input::FrameInput;
use crate::game::host::Mover;

/// Movement state owned by one character
#[derive(Debug, Clone)]
pub struct LocomotionState {
    config: LocomotionConfig,

    /// Current walking speed (crouch speed while crouched)
    walk_speed: f32,
    /// Current running speed (crouch speed while crouched)
    run_speed: f32,
    /// Walking speed captured at construction
    default_walk_speed: f32,
    /// Running speed captured at construction
    default_run_speed: f32,

    /// Velocity used for the last move; `y` persists across ticks
    move_direction: Vec3,
    /// Collider height last applied to the mover
    collider_height: f32,

    /// Grounded state reported by the mover on the last move
    grounded: bool,
    can_move: bool,
    crouching: bool,
}

impl LocomotionState {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            walk_speed: config.walk_speed,
            run_speed: config.run_speed,
            default_walk_speed: config.walk_speed,
            default_run_speed: config.run_speed,
            move_direction: Vec3::ZERO,
            collider_height: config.default_height,
            grounded: false,
            can_move: true,
            crouching: false,
            config,
        }
    }

    /// Advance one tick. `orientation` is the body rotation; only its yaw
    /// matters since forward and right come from it.
    ///
    /// Returns the displacement submitted to the mover.
    pub fn update<M: Mover + ?Sized>(
        &mut self,
        input: &FrameInput,
        orientation: Quat,
        dt: f32,
        mover: &mut M,
    ) -> Vec3 {
        let forward = orientation * math::FORWARD;
        let right = orientation * math::RIGHT;

        self.apply_crouch(input.crouch, mover);

        let speed = self.effective_speed(input.run, input.crouch);
        let vertical = self.move_direction.y;
        let mut motion = forward * (input.forward * speed) + right * (input.right * speed);

        motion.y = if input.jump && self.can_move && self.grounded {
            self.config.jump_power
        } else {
            vertical
        };

        // No terminal velocity
        if !self.grounded {
            motion.y -= self.config.gravity * dt;
        }

        self.move_direction = motion;
        let displacement = motion * dt;
        self.grounded = mover.move_by(displacement);
        displacement
    }

    /// Speed for the given modifiers, zero while movement is disabled
    pub fn effective_speed(&self, run: bool, crouch: bool) -> f32 {
        if !self.can_move {
            0.0
        } else if crouch {
            self.config.crouch_speed
        } else if run {
            self.run_speed
        } else {
            self.walk_speed
        }
    }

    fn apply_crouch<M: Mover + ?Sized>(&mut self, held: bool, mover: &mut M) {
        let crouch = held && self.can_move;

        if crouch {
            self.collider_height = self.config.crouch_height;
            self.walk_speed = self.config.crouch_speed;
            self.run_speed = self.config.crouch_speed;
        } else {
            self.collider_height = self.config.default_height;
            self.walk_speed = self.default_walk_speed;
            self.run_speed = self.default_run_speed;
        }
        mover.set_collider_height(self.collider_height);

        if crouch != self.crouching {
            self.crouching = crouch;
            log::debug!(
                "{} (height {:.2})",
                if crouch { "Crouched" } else { "Stood up" },
                self.collider_height
            );
        }
    }

    pub fn set_movement_enabled(&mut self, enabled: bool) {
        self.can_move = enabled;
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn walk_speed(&self) -> f32 {
        self.walk_speed
    }

    pub fn run_speed(&self) -> f32 {
        self.run_speed
    }

    pub fn collider_height(&self) -> f32 {
        self.collider_height
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Velocity used on the last tick
    pub fn move_direction(&self) -> Vec3 {
        self.move_direction
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.move_direction.y
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::config::BASE_LOCOMOTION;
    use approx::assert_abs_diff_eq;

    /// Mover that reports whatever grounded state the test scripts
    #[derive(Default)]
    struct ScriptedMover {
        grounded: bool,
        moves: Vec<Vec3>,
        heights: Vec<f32>,
    }

    impl Mover for ScriptedMover {
        fn position(&self) -> Vec3 {
            self.moves.iter().copied().sum()
        }

        fn move_by(&mut self, delta: Vec3) -> bool {
            self.moves.push(delta);
            self.grounded
        }

        fn set_collider_height(&mut self, height: f32) {
            self.heights.push(height);
        }
    }

    fn grounded_state(mover: &mut ScriptedMover) -> LocomotionState {
        let mut state = LocomotionState::new(BASE_LOCOMOTION);
        // First move reports the ground
        mover.grounded = true;
        state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, mover);
        state
    }

    #[test]
    fn test_walk_forward() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        let input = FrameInput {
            forward: 1.0,
            ..Default::default()
        };

        let moved = state.update(&input, Quat::IDENTITY, 0.5, &mut mover);
        assert_abs_diff_eq!(moved.z, -3.0, epsilon = 1e-5);
        assert_abs_diff_eq!(moved.x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_run_and_strafe() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        let input = FrameInput {
            right: -1.0,
            run: true,
            ..Default::default()
        };

        let moved = state.update(&input, Quat::IDENTITY, 0.5, &mut mover);
        assert_abs_diff_eq!(moved.x, -6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_direction_follows_body_yaw() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        let input = FrameInput {
            forward: 1.0,
            ..Default::default()
        };

        let moved = state.update(&input, math::yaw_rotation(90.0), 1.0, &mut mover);
        assert_abs_diff_eq!(moved, Vec3::new(6.0, moved.y, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_jump_requires_ground_and_movement() {
        let mut mover = ScriptedMover::default();
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };

        // Airborne: no impulse, gravity only
        let mut state = LocomotionState::new(BASE_LOCOMOTION);
        state.update(&jump, Quat::IDENTITY, 0.1, &mut mover);
        assert_abs_diff_eq!(state.vertical_velocity(), -1.0, epsilon = 1e-5);

        // Grounded: impulse replaces the vertical component
        let mut state = grounded_state(&mut mover);
        state.update(&jump, Quat::IDENTITY, 0.1, &mut mover);
        assert_abs_diff_eq!(state.vertical_velocity(), 7.0, epsilon = 1e-5);

        // Grounded but disabled: previous vertical component is kept
        let mut state = grounded_state(&mut mover);
        state.set_movement_enabled(false);
        state.update(&jump, Quat::IDENTITY, 0.1, &mut mover);
        assert_abs_diff_eq!(state.vertical_velocity(), -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_jump_does_not_accumulate() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        let jump = FrameInput {
            jump: true,
            ..Default::default()
        };

        for _ in 0..3 {
            state.update(&jump, Quat::IDENTITY, 0.1, &mut mover);
            assert_abs_diff_eq!(state.vertical_velocity(), 7.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_gravity_accumulates_without_cap() {
        let mut mover = ScriptedMover::default();
        let mut state = LocomotionState::new(BASE_LOCOMOTION);

        for _ in 0..1000 {
            state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, &mut mover);
        }
        assert_abs_diff_eq!(state.vertical_velocity(), -1000.0, epsilon = 1e-2);
    }

    #[test]
    fn test_vertical_component_preserved_on_ground() {
        let mut mover = ScriptedMover::default();
        let mut state = LocomotionState::new(BASE_LOCOMOTION);
        state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, &mut mover);
        assert_abs_diff_eq!(state.vertical_velocity(), -1.0, epsilon = 1e-5);

        // Landing keeps the last vertical value instead of zeroing it
        mover.grounded = true;
        state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, &mut mover);
        state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, &mut mover);
        assert_abs_diff_eq!(state.vertical_velocity(), -2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_displacement_scaled_by_dt() {
        let mut mover = ScriptedMover::default();
        let mut state = LocomotionState::new(BASE_LOCOMOTION);
        let moved = state.update(&FrameInput::default(), Quat::IDENTITY, 0.25, &mut mover);
        assert_abs_diff_eq!(moved.y, -2.5 * 0.25, epsilon = 1e-5);
        assert_eq!(mover.moves.last().copied(), Some(moved));
    }

    #[test]
    fn test_crouch_overrides_and_restores() {
        let config = LocomotionConfig {
            walk_speed: 4.5,
            run_speed: 9.25,
            ..BASE_LOCOMOTION
        };
        let mut mover = ScriptedMover::default();
        let mut state = LocomotionState::new(config);
        let crouch = FrameInput {
            crouch: true,
            ..Default::default()
        };

        state.update(&crouch, Quat::IDENTITY, 0.1, &mut mover);
        assert!(state.is_crouching());
        assert_eq!(state.walk_speed(), 3.0);
        assert_eq!(state.run_speed(), 3.0);
        assert_eq!(state.collider_height(), 1.0);
        assert_eq!(mover.heights.last().copied(), Some(1.0));
        assert_eq!(state.effective_speed(true, true), 3.0);

        state.update(&FrameInput::default(), Quat::IDENTITY, 0.1, &mut mover);
        assert!(!state.is_crouching());
        assert_eq!(state.walk_speed(), 4.5);
        assert_eq!(state.run_speed(), 9.25);
        assert_eq!(state.collider_height(), 2.0);
        assert_eq!(mover.heights.last().copied(), Some(2.0));
    }

    #[test]
    fn test_crouch_speed_applies_same_tick() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        let input = FrameInput {
            forward: 1.0,
            run: true,
            crouch: true,
            ..Default::default()
        };

        let moved = state.update(&input, Quat::IDENTITY, 1.0, &mut mover);
        assert_abs_diff_eq!(moved.z, -3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_disabled_movement_freezes_horizontal_and_crouch() {
        let mut mover = ScriptedMover::default();
        let mut state = grounded_state(&mut mover);
        state.set_movement_enabled(false);
        let input = FrameInput {
            forward: 1.0,
            crouch: true,
            ..Default::default()
        };

        let moved = state.update(&input, Quat::IDENTITY, 1.0, &mut mover);
        assert_abs_diff_eq!(moved.x, 0.0);
        assert_abs_diff_eq!(moved.z, 0.0);
        assert!(!state.is_crouching());
        assert_eq!(state.collider_height(), 2.0);
    }
}
