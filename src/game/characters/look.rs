// Mouse look: clamped camera pitch, unbounded body yaw

use glam::{Quat, Vec2, Vec3};

use super::config::LookConfig;
use crate::core::math;

/// Body and camera rotation of one character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// World rotation of the body, yaw only
    pub body: Quat,
    /// Camera rotation relative to the body, pitch only
    pub camera_local: Quat,
}

impl Orientation {
    pub fn camera_world(&self) -> Quat {
        self.body * self.camera_local
    }

    /// Body forward direction (horizontal)
    pub fn forward(&self) -> Vec3 {
        self.body * math::FORWARD
    }

    /// Direction the camera is looking
    pub fn camera_forward(&self) -> Vec3 {
        self.camera_world() * math::FORWARD
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            body: Quat::IDENTITY,
            camera_local: Quat::IDENTITY,
        }
    }
}

/// Look state: owns the pitch accumulator
#[derive(Debug, Clone)]
pub struct LookState {
    /// Degrees, positive looks down
    pitch: f32,
    sensitivity: f32,
    limit: f32,
}

impl LookState {
    pub fn new(config: &LookConfig) -> Self {
        Self {
            pitch: 0.0,
            sensitivity: config.look_speed,
            limit: config.look_x_limit,
        }
    }

    /// Apply one tick of pointer motion. Frozen while movement is disabled.
    pub fn update(&mut self, delta: Vec2, enabled: bool, orientation: &mut Orientation) {
        if !enabled {
            return;
        }

        self.pitch = math::clamp(
            self.pitch - delta.y * self.sensitivity,
            -self.limit,
            self.limit,
        );
        orientation.camera_local = math::pitch_rotation(self.pitch);

        let yaw = math::yaw_rotation(delta.x * self.sensitivity);
        orientation.body = (orientation.body * yaw).normalize();
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }
}
