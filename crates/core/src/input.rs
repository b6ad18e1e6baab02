//! Edge-triggered input sampling.

use serde::{Deserialize, Serialize};

use crate::backend::{InputDevice, MouseButtons};

/// Logical actions the interpreter reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Advance text, confirm a choice. Left mouse button.
    Decide,
    /// Right mouse button. Sampled but unused by the script commands.
    Cancel,
    /// Escape key.
    Exit,
}

/// Current and previous frame samples, used to tell a press from a hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputManager {
    fresh_buttons: MouseButtons,
    last_buttons: MouseButtons,
    fresh_exit: bool,
    last_exit: bool,
    cursor: (i32, i32),
}

impl InputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shifts the previous sample out and reads a new one from `device`.
    pub fn update<I: InputDevice + ?Sized>(&mut self, device: &I) {
        self.last_buttons = self.fresh_buttons;
        self.fresh_buttons = device.mouse_buttons();
        self.last_exit = self.fresh_exit;
        self.fresh_exit = device.exit_key_down();
        self.cursor = device.mouse_position();
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    /// True while the action's input is held.
    pub fn is_held(&self, action: InputAction) -> bool {
        match action {
            InputAction::Exit => self.fresh_exit,
            _ => self.fresh_buttons.contains(button_for(action)),
        }
    }

    /// True only on the frame the action's input went from released to pressed.
    pub fn is_pressed(&self, action: InputAction) -> bool {
        match action {
            InputAction::Exit => !self.last_exit && self.fresh_exit,
            _ => {
                let button = button_for(action);
                !self.last_buttons.contains(button) && self.fresh_buttons.contains(button)
            }
        }
    }

    pub fn is_click(&self) -> bool {
        self.is_pressed(InputAction::Decide)
    }

    pub fn is_exit(&self) -> bool {
        self.is_pressed(InputAction::Exit)
    }
}

fn button_for(action: InputAction) -> MouseButtons {
    match action {
        InputAction::Decide => MouseButtons::LEFT,
        InputAction::Cancel => MouseButtons::RIGHT,
        InputAction::Exit => MouseButtons::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        buttons: MouseButtons,
        exit: bool,
    }

    impl InputDevice for Sample {
        fn mouse_position(&self) -> (i32, i32) {
            (5, 7)
        }

        fn mouse_buttons(&self) -> MouseButtons {
            self.buttons
        }

        fn exit_key_down(&self) -> bool {
            self.exit
        }
    }

    fn sample(buttons: MouseButtons, exit: bool) -> Sample {
        Sample { buttons, exit }
    }

    #[test]
    fn click_fires_only_on_rising_edge() {
        let mut input = InputManager::new();
        input.update(&sample(MouseButtons::LEFT, false));
        assert!(input.is_click());
        assert!(input.is_held(InputAction::Decide));

        input.update(&sample(MouseButtons::LEFT, false));
        assert!(!input.is_click(), "holding must not re-trigger");
        assert!(input.is_held(InputAction::Decide));

        input.update(&sample(MouseButtons::NONE, false));
        assert!(!input.is_click());
        input.update(&sample(MouseButtons::LEFT, false));
        assert!(input.is_click());
    }

    #[test]
    fn buttons_are_tracked_independently() {
        let mut input = InputManager::new();
        input.update(&sample(MouseButtons::RIGHT, false));
        assert!(input.is_pressed(InputAction::Cancel));
        assert!(!input.is_click());

        input.update(&sample(MouseButtons::RIGHT | MouseButtons::LEFT, false));
        assert!(input.is_click());
        assert!(!input.is_pressed(InputAction::Cancel));
    }

    #[test]
    fn exit_uses_key_edge_and_cursor_is_recorded() {
        let mut input = InputManager::new();
        input.update(&sample(MouseButtons::NONE, true));
        assert!(input.is_exit());
        assert_eq!(input.cursor(), (5, 7));
        input.update(&sample(MouseButtons::NONE, true));
        assert!(!input.is_exit());
        assert!(input.is_held(InputAction::Exit));
    }
}
