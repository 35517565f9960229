// Character animation: clip selection and crossfade requests
//
// Blending itself is the host animator's job. This side decides which clip
// should be playing, drops redundant requests, and arbitrates between the
// layers that want to drive the body.

use crate::game::host::Animator;

/// Blend time used for every clip change, in seconds
pub const CROSSFADE_DURATION: f32 = 0.2;

/// Clips the controller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationClip {
    Idle,
    Walk,
    /// First swing of the alternating pair
    AttackA,
    /// Second swing of the alternating pair
    AttackB,
}

impl AnimationClip {
    /// Name of the clip in the host's animation controller
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walk => "Walk",
            Self::AttackA => "Attack 1",
            Self::AttackB => "Attack 2",
        }
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Self::AttackA | Self::AttackB)
    }

    /// Locomotion clip for the given movement intent
    pub fn for_movement(forward: f32, right: f32) -> Self {
        if forward == 0.0 && right == 0.0 {
            Self::Idle
        } else {
            Self::Walk
        }
    }
}

/// Layers competing for the body, lowest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationLayer {
    Locomotion,
    Attack,
}

/// One layer's wish for this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerClaim {
    pub layer: AnimationLayer,
    /// Whether the layer currently owns the body
    pub active: bool,
    /// Clip to switch to, or `None` to hold whatever the layer already started
    pub clip: Option<AnimationClip>,
}

impl LayerClaim {
    pub fn new(layer: AnimationLayer, active: bool, clip: Option<AnimationClip>) -> Self {
        Self {
            layer,
            active,
            clip,
        }
    }
}

/// Pick the clip to request this tick.
///
/// The highest-priority active layer wins outright, even when it has nothing
/// new to request. That is what keeps a swing from being cut short by the
/// walk cycle.
pub fn resolve(claims: &[LayerClaim]) -> Option<AnimationClip> {
    claims
        .iter()
        .filter(|claim| claim.active)
        .max_by_key(|claim| claim.layer)
        .and_then(|claim| claim.clip)
}

/// Tracks the playing clip and forwards changes to the host animator
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    current: Option<AnimationClip>,
    blend_duration: f32,
    /// Number of crossfades actually issued
    transitions: u32,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self::with_blend_duration(CROSSFADE_DURATION)
    }

    pub fn with_blend_duration(blend_duration: f32) -> Self {
        Self {
            current: None,
            blend_duration,
            transitions: 0,
        }
    }

    /// Crossfade to `clip` unless it is already playing.
    /// Returns whether a crossfade was issued.
    pub fn change<A: Animator + ?Sized>(&mut self, clip: AnimationClip, animator: &mut A) -> bool {
        if self.current == Some(clip) {
            return false;
        }

        log::trace!(
            "Animation {} -> {}",
            self.current.map_or("<none>", |c| c.name()),
            clip.name()
        );
        self.current = Some(clip);
        self.transitions += 1;
        animator.crossfade(clip, self.blend_duration);
        true
    }

    /// Get the current clip
    pub fn current(&self) -> Option<AnimationClip> {
        self.current
    }

    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn blend_duration(&self) -> f32 {
        self.blend_duration
    }
}
