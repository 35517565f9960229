// Game action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,

    // Modifiers (held)
    Run,
    Crouch,
    Jump,

    // Combat
    Attack,
}

impl Action {
    /// Every action, in declaration order
    pub const ALL: [Action; 8] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Run,
        Action::Crouch,
        Action::Jump,
        Action::Attack,
    ];
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings (WASD, shift to run, ctrl to crouch)
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::KeyW), Action::MoveForward),
        (InputSource::key(KeyCode::KeyS), Action::MoveBack),
        (InputSource::key(KeyCode::KeyA), Action::MoveLeft),
        (InputSource::key(KeyCode::KeyD), Action::MoveRight),
        (InputSource::key(KeyCode::ShiftLeft), Action::Run),
        (InputSource::key(KeyCode::ControlLeft), Action::Crouch),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::mouse(MouseButton::Left), Action::Attack),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_every_action_has_a_default_binding() {
        let bindings = default_bindings();
        for action in Action::ALL {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "{action:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_attack_on_left_mouse() {
        let bindings = default_bindings();
        let attack = bindings.iter().find(|(_, action)| *action == Action::Attack);
        assert!(matches!(
            attack,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
    }

    #[test]
    fn test_no_duplicate_inputs() {
        let mut seen_sources = std::collections::HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen_sources.insert(source), "Duplicate input source found");
        }
    }
}
