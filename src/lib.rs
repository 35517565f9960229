//! First-person character controller.
//!
//! `game` holds the controller itself (locomotion, look, melee combat and
//! animation arbitration) and the host capability traits it is driven
//! through. `engine` provides a reference host built on rapier, plus the
//! frame clock, timer queue and input mapping that feed it.

pub mod core;
pub mod engine;
pub mod game;
