// Per-tick input snapshot consumed by the character controller

use glam::Vec2;

/// Everything the controller reads from the input layer in one tick.
/// Axes are already clamped to [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Forward (+1) / back (-1)
    pub forward: f32,
    /// Right (+1) / left (-1)
    pub right: f32,
    /// Run modifier held
    pub run: bool,
    /// Crouch modifier held
    pub crouch: bool,
    /// Jump held
    pub jump: bool,
    /// Attack pressed this tick
    pub attack: bool,
    /// Pointer delta in axis units, +x right, +y up
    pub look: Vec2,
}
