// Character tuning: movement, look and melee parameters
//
// Values are never rejected. Odd tuning (negative speeds, a hit that resolves
// after the attack already reset) still produces a playable, if strange,
// character, so loading only warns about it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::engine::physics::LayerMask;

/// Movement tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Walking speed (units/second)
    pub walk_speed: f32,
    /// Running speed (units/second)
    pub run_speed: f32,
    /// Speed while crouched, overrides both walk and run
    pub crouch_speed: f32,
    /// Upward velocity set by a jump
    pub jump_power: f32,
    /// Downward acceleration while airborne (units/second²)
    pub gravity: f32,
    /// Standing collider height
    pub default_height: f32,
    /// Crouched collider height
    pub crouch_height: f32,
}

/// Mouse look tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of rotation per unit of pointer axis
    pub look_speed: f32,
    /// Maximum pitch up or down, in degrees
    pub look_x_limit: f32,
    /// Camera height above the body centre
    pub eye_height: f32,
}

/// Melee tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Reach of the hit ray
    pub attack_distance: f32,
    /// Seconds from swing start to hit resolution
    pub attack_delay: f32,
    /// Seconds from swing start until the next swing is allowed
    pub attack_speed: f32,
    /// Damage dealt to a damageable target
    pub attack_damage: i32,
    /// Layers the hit ray may report
    pub attack_layer: LayerMask,
}

/// Full controller tuning
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub locomotion: LocomotionConfig,
    pub look: LookConfig,
    pub combat: CombatConfig,
}

pub const BASE_LOCOMOTION: LocomotionConfig = LocomotionConfig {
    walk_speed: 6.0,
    run_speed: 12.0,
    crouch_speed: 3.0,
    jump_power: 7.0,
    gravity: 10.0,
    default_height: 2.0,
    crouch_height: 1.0,
};

pub const BASE_LOOK: LookConfig = LookConfig {
    look_speed: 2.0,
    look_x_limit: 45.0,
    eye_height: 0.6,
};

pub const BASE_COMBAT: CombatConfig = CombatConfig {
    attack_distance: 3.0,
    attack_delay: 0.4,
    attack_speed: 1.0,
    attack_damage: 1,
    attack_layer: LayerMask::ENEMY,
};

impl Default for LocomotionConfig {
    fn default() -> Self {
        BASE_LOCOMOTION
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        BASE_LOOK
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        BASE_COMBAT
    }
}

/// Errors raised while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid controller config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ControllerConfig {
    /// Parse a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.warn_questionable();
        Ok(config)
    }

    /// Read and parse a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loading controller config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Tuning that is accepted but probably not intended
    pub fn questionable(&self) -> Vec<String> {
        let mut notes = Vec::new();
        let locomotion = &self.locomotion;
        for (name, value) in [
            ("walk_speed", locomotion.walk_speed),
            ("run_speed", locomotion.run_speed),
            ("crouch_speed", locomotion.crouch_speed),
        ] {
            if value < 0.0 {
                notes.push(format!("{name} is negative ({value})"));
            }
        }

        let combat = &self.combat;
        if combat.attack_delay > combat.attack_speed {
            notes.push(format!(
                "attack_delay ({}) exceeds attack_speed ({}); \
                 hits will land after the attack resets",
                combat.attack_delay, combat.attack_speed
            ));
        }
        if combat.attack_layer.is_empty() {
            notes.push("attack_layer is empty; swings can never connect".to_string());
        }
        notes
    }

    fn warn_questionable(&self) {
        for note in self.questionable() {
            log::warn!("Controller config: {note}");
        }
    }
}
