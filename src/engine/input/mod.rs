// Input handling system
//
// Turns raw winit keyboard, mouse button and pointer-motion events into one
// `FrameInput` snapshot per gameplay tick.
//
// ## Architecture
//
// - `action`: Game actions and default key bindings
// - `config`: Rebindable source -> action map
// - `state`: Held/pressed tracking and pointer accumulation
// - `frame`: The per-tick snapshot handed to the character
//
// ## Usage Example
//
// ```rust
// use fps_controller::engine::input::InputState;
//
// let mut input = InputState::default();
//
// // In your event loop
// input.process_keyboard_event(&key_event);
// input.add_mouse_motion(dx, dy);
//
// // Once per fixed tick
// let frame = input.take_frame();
// character.tick(&frame, dt, &mut host);
// ```

pub mod action;
pub mod config;
pub mod frame;
pub mod state;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputBindings;
pub use frame::FrameInput;
pub use state::InputState;
