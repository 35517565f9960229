// Engine modules: timing, input, physics, effects and the sandbox host

pub mod effects;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod sandbox;
pub mod timer;
