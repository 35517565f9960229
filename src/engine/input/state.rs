// Input state: folds raw key, button and pointer events into one FrameInput per tick

use super::action::{Action, InputSource};
use super::config::InputBindings;
use super::frame::FrameInput;
use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Scale from raw pointer counts to look-axis units
pub const POINTER_AXIS_SCALE: f32 = 0.1;

/// Input state for the local player
#[derive(Debug)]
pub struct InputState {
    bindings: InputBindings,

    /// Actions currently held
    pressed: HashSet<Action>,

    /// Actions pressed since the last snapshot
    just_pressed: HashSet<Action>,

    /// Pointer motion accumulated since the last snapshot
    look_delta: Vec2,
}

impl InputState {
    pub fn new(bindings: InputBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            look_delta: Vec2::ZERO,
        }
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut InputBindings {
        &mut self.bindings
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Register a press of `source`
    pub fn press(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.get_action(source) {
            if self.pressed.insert(action) {
                self.just_pressed.insert(action);
            }
        }
    }

    /// Register a release of `source`
    pub fn release(&mut self, source: InputSource) {
        if let Some(action) = self.bindings.get_action(source) {
            self.pressed.remove(&action);
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let source = InputSource::key(key_code);

        match event.state {
            ElementState::Pressed if !event.repeat => self.press(source),
            ElementState::Pressed => {}
            ElementState::Released => self.release(source),
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let source = InputSource::mouse(button);
        match state {
            ElementState::Pressed => self.press(source),
            ElementState::Released => self.release(source),
        }
    }

    /// Accumulate raw pointer motion (winit `DeviceEvent::MouseMotion`, +y down)
    pub fn add_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.look_delta += Vec2::new(dx as f32, -(dy as f32)) * POINTER_AXIS_SCALE;
    }

    /// Build the snapshot for this tick and clear per-tick state
    pub fn take_frame(&mut self) -> FrameInput {
        let frame = FrameInput {
            forward: self.axis(Action::MoveBack, Action::MoveForward),
            right: self.axis(Action::MoveLeft, Action::MoveRight),
            run: self.is_pressed(Action::Run),
            crouch: self.is_pressed(Action::Crouch),
            jump: self.is_pressed(Action::Jump),
            attack: self.just_pressed.contains(&Action::Attack),
            look: self.look_delta,
        };

        self.just_pressed.clear();
        self.look_delta = Vec2::ZERO;
        frame
    }

    /// Reset all input state (focus lost, menu opened)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.look_delta = Vec2::ZERO;
    }

    fn axis(&self, negative: Action, positive: Action) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        if self.is_pressed(positive) {
            value += 1.0;
        }
        value
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(InputBindings::defaults())
    }
}
