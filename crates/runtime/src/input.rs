use std::collections::{HashMap, HashSet};

use script_engine::{InputAction, InputDevice, MouseButtons};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Held-state tracker fed by winit events and sampled once per frame by
/// the engine. Keys can stand in for mouse buttons through the key map.
#[derive(Clone, Debug)]
pub struct WindowInput {
    key_map: HashMap<KeyCode, InputAction>,
    cursor: (i32, i32),
    buttons: MouseButtons,
    held_keys: HashSet<KeyCode>,
}

impl WindowInput {
    pub fn new(key_map: HashMap<KeyCode, InputAction>) -> Self {
        Self {
            key_map,
            cursor: (0, 0),
            buttons: MouseButtons::NONE,
            held_keys: HashSet::new(),
        }
    }

    /// Applies button and key events. Cursor motion is delivered through
    /// [`Self::set_cursor`] once mapped into framebuffer coordinates.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::Focused(false) => self.release_all(),
            _ => {}
        }
    }

    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    pub fn set_button(&mut self, button: MouseButton, pressed: bool) {
        let mask = match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
            _ => return,
        };
        if pressed {
            self.buttons.insert(mask);
        } else {
            self.buttons.remove(mask);
        }
    }

    pub fn set_key(&mut self, key: KeyCode, pressed: bool) {
        if !self.key_map.contains_key(&key) {
            return;
        }
        if pressed {
            self.held_keys.insert(key);
        } else {
            self.held_keys.remove(&key);
        }
    }

    pub fn release_all(&mut self) {
        self.buttons = MouseButtons::NONE;
        self.held_keys.clear();
    }

    fn key_held(&self, action: InputAction) -> bool {
        self.held_keys
            .iter()
            .any(|key| self.key_map.get(key) == Some(&action))
    }
}

impl Default for WindowInput {
    fn default() -> Self {
        let mut map = HashMap::new();
        map.insert(KeyCode::Escape, InputAction::Exit);
        map.insert(KeyCode::Space, InputAction::Decide);
        map.insert(KeyCode::Enter, InputAction::Decide);
        map.insert(KeyCode::Backspace, InputAction::Cancel);
        Self::new(map)
    }
}

impl InputDevice for WindowInput {
    fn mouse_position(&self) -> (i32, i32) {
        self.cursor
    }

    fn mouse_buttons(&self) -> MouseButtons {
        let mut buttons = self.buttons;
        if self.key_held(InputAction::Decide) {
            buttons.insert(MouseButtons::LEFT);
        }
        if self.key_held(InputAction::Cancel) {
            buttons.insert(MouseButtons::RIGHT);
        }
        buttons
    }

    fn exit_key_down(&self) -> bool {
        self.key_held(InputAction::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_buttons_track_press_and_release() {
        let mut input = WindowInput::default();
        input.set_button(MouseButton::Left, true);
        assert!(input.mouse_buttons().contains(MouseButtons::LEFT));
        input.set_button(MouseButton::Left, false);
        assert_eq!(input.mouse_buttons(), MouseButtons::NONE);
    }

    #[test]
    fn mapped_keys_stand_in_for_buttons() {
        let mut input = WindowInput::default();
        input.set_key(KeyCode::Space, true);
        assert!(input.mouse_buttons().contains(MouseButtons::LEFT));
        input.set_key(KeyCode::Escape, true);
        assert!(input.exit_key_down());
        input.release_all();
        assert!(!input.exit_key_down());
        assert_eq!(input.mouse_buttons(), MouseButtons::NONE);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut input = WindowInput::default();
        input.set_key(KeyCode::KeyQ, true);
        assert!(!input.exit_key_down());
        assert_eq!(input.mouse_buttons(), MouseButtons::NONE);
    }
}
