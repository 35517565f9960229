// Gameplay: the character controller and the capabilities it needs from a host

pub mod characters;
pub mod host;
