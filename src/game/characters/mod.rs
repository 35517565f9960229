// Character system
//
// This module contains the first-person character controller:
// - Tuning loaded from config
// - Locomotion and mouse look
// - Melee combat state machine
// - Animation clip arbitration
// - Health for damageable targets

pub mod animation;
pub mod character;
pub mod combat;
pub mod config;
pub mod health;
pub mod locomotion;
pub mod look;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationDriver, AnimationLayer, LayerClaim};
pub use character::{Character, TickReport};
pub use combat::{CombatPhase, CombatState, CombatTask, HitReport};
pub use config::{CombatConfig, ConfigError, ControllerConfig, LocomotionConfig, LookConfig};
pub use health::Health;
pub use locomotion::LocomotionState;
pub use look::{LookState, Orientation};
