//! # Input Manager
//!
//! This module handles input processing for the application, including:
//! - Keyboard input state tracking
//! - Mouse button and pointer movement tracking
//! - Per-frame snapshots with pressed/held/released transitions

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{MouseInput, ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 14] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::KeyL,
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

const MOUSE_BUTTONS: [MouseButton; 2] = [MouseButton::Left, MouseButton::Right];

/// Manages the state of all input devices and processes input events.
///
/// Only the keys and buttons the session reacts to are tracked; events for
/// anything else are ignored.
pub struct InputManager {
    /// Previous state of all tracked keyboard keys
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Current state of all tracked keyboard keys
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Current state of mouse inputs
    pub mouse_inputs: MouseInput,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Creates a new InputManager with every tracked key and button released.
    pub fn new() -> Self {
        let keyboard_inputs_old: HashMap<KeyCode, bool> =
            KEY_CODES.iter().map(|key| (*key, false)).collect();
        let keyboard_inputs_new = keyboard_inputs_old.clone();

        let mouse_button_inputs_old: HashMap<MouseButton, bool> =
            MOUSE_BUTTONS.iter().map(|button| (*button, false)).collect();
        let mouse_button_inputs_new = mouse_button_inputs_old.clone();

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            mouse_inputs: MouseInput {
                mouse_button_inputs_old,
                mouse_button_inputs_new,
                mouse_delta: None,
                clicks: Vec::new(),
            },
        }
    }

    /// Updates the old state with the current state to prepare for the next frame.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }

        for (button, new_state) in self.mouse_inputs.mouse_button_inputs_new.iter() {
            if let Some(old_state) = self.mouse_inputs.mouse_button_inputs_old.get_mut(button) {
                *old_state = *new_state;
            }
        }
    }

    /// Processes a window event and updates internal input state.
    ///
    /// # Arguments
    /// * `event` - The window event to process
    pub fn intake_input(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.intake_key(*key, *state == ElementState::Pressed),
            WindowEvent::MouseInput { button, state, .. } => {
                self.intake_mouse_button(*button, *state == ElementState::Pressed)
            }
            _ => {}
        }
    }

    /// Records a key going down or up. Untracked keys are ignored.
    pub fn intake_key(&mut self, key: KeyCode, pressed: bool) {
        if let Some(key_state) = self.keyboard_inputs_new.get_mut(&key) {
            *key_state = pressed;
        }
    }

    /// Records a mouse button going down or up. Untracked buttons are ignored.
    ///
    /// Every press is also queued as a click, so presses shorter than a frame
    /// are not lost.
    pub fn intake_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if let Some(button_state) = self.mouse_inputs.mouse_button_inputs_new.get_mut(&button) {
            *button_state = pressed;
            if pressed {
                self.mouse_inputs.clicks.push(button);
            }
        }
    }

    /// Adds pointer movement to this frame's delta.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) pointer movement reported by the device
    pub fn intake_mouse_motion(&mut self, delta: (f64, f64)) {
        let (x, y) = self.mouse_inputs.mouse_delta.unwrap_or((0.0, 0.0));
        self.mouse_inputs.mouse_delta = Some((x + delta.0, y + delta.1));
    }

    /// Creates a processed input state from the current raw boolean states.
    pub fn create_processed_input_state(&self) -> ProcessedInputState {
        let keyboard_states = self
            .keyboard_inputs_new
            .iter()
            .map(|(key, &new_state)| {
                let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
                (*key, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        let mouse_button_states = self
            .mouse_inputs
            .mouse_button_inputs_new
            .iter()
            .map(|(button, &new_state)| {
                let old_state = self
                    .mouse_inputs
                    .mouse_button_inputs_old
                    .get(button)
                    .copied()
                    .unwrap_or(false);
                (*button, RawInputState::from_raw_states(old_state, new_state))
            })
            .collect();

        ProcessedInputState {
            keyboard_states,
            mouse_button_states,
            mouse_delta: self.mouse_inputs.mouse_delta,
            clicks: self.mouse_inputs.clicks.clone(),
        }
    }

    /// Returns this frame's processed input state and advances to the next frame.
    pub fn get_and_reset_processed_input(&mut self) -> ProcessedInputState {
        let processed_input = self.create_processed_input_state();
        self.reset_inputs();
        processed_input
    }

    /// Advances the old states and clears pointer movement and clicks.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.mouse_inputs.mouse_delta = None;
        self.mouse_inputs.clicks.clear();
    }

    /// Releases every key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for state in self.keyboard_inputs_new.values_mut() {
            *state = false;
        }
        for state in self.mouse_inputs.mouse_button_inputs_new.values_mut() {
            *state = false;
        }
        self.mouse_inputs.mouse_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_goes_pressed_held_released() {
        let mut manager = InputManager::new();

        manager.intake_key(KeyCode::KeyW, true);
        assert_eq!(
            manager.get_and_reset_processed_input().get_key_state(KeyCode::KeyW),
            RawInputState::Pressed
        );
        assert_eq!(
            manager.get_and_reset_processed_input().get_key_state(KeyCode::KeyW),
            RawInputState::Held
        );

        manager.intake_key(KeyCode::KeyW, false);
        assert_eq!(
            manager.get_and_reset_processed_input().get_key_state(KeyCode::KeyW),
            RawInputState::Released
        );
        assert_eq!(
            manager.get_and_reset_processed_input().get_key_state(KeyCode::KeyW),
            RawInputState::NotPressed
        );
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut manager = InputManager::new();
        manager.intake_key(KeyCode::KeyQ, true);

        let input = manager.get_and_reset_processed_input();

        assert!(!input.keyboard_states.contains_key(&KeyCode::KeyQ));
    }

    #[test]
    fn click_is_pressed_for_one_frame() {
        let mut manager = InputManager::new();
        manager.intake_mouse_button(MouseButton::Right, true);

        let first = manager.get_and_reset_processed_input();
        let second = manager.get_and_reset_processed_input();

        assert!(first.get_mouse_button_state(MouseButton::Right).is_just_pressed());
        assert!(!second.get_mouse_button_state(MouseButton::Right).is_just_pressed());
    }

    #[test]
    fn click_shorter_than_a_frame_is_queued() {
        let mut manager = InputManager::new();
        manager.intake_mouse_button(MouseButton::Right, true);
        manager.intake_mouse_button(MouseButton::Right, false);

        let input = manager.get_and_reset_processed_input();

        assert_eq!(input.get_clicks(), &[MouseButton::Right]);
        assert!(!input.get_mouse_button_state(MouseButton::Right).is_active());
        assert!(manager.get_and_reset_processed_input().get_clicks().is_empty());
    }

    #[test]
    fn clicks_keep_arrival_order() {
        let mut manager = InputManager::new();
        manager.intake_mouse_button(MouseButton::Right, true);
        manager.intake_mouse_button(MouseButton::Left, true);
        manager.intake_mouse_button(MouseButton::Right, false);
        manager.intake_mouse_button(MouseButton::Right, true);
        manager.intake_mouse_button(MouseButton::Middle, true);

        assert_eq!(
            manager.get_and_reset_processed_input().get_clicks(),
            &[MouseButton::Right, MouseButton::Left, MouseButton::Right]
        );
    }

    #[test]
    fn pointer_motion_accumulates_within_a_frame() {
        let mut manager = InputManager::new();
        manager.intake_mouse_motion((3.0, -1.0));
        manager.intake_mouse_motion((2.0, 4.0));

        assert_eq!(
            manager.get_and_reset_processed_input().get_mouse_delta(),
            Some((5.0, 3.0))
        );
        assert_eq!(manager.get_and_reset_processed_input().get_mouse_delta(), None);
    }

    #[test]
    fn release_all_clears_held_keys() {
        let mut manager = InputManager::new();
        manager.intake_key(KeyCode::KeyD, true);
        manager.get_and_reset_processed_input();

        manager.release_all();

        assert!(manager
            .get_and_reset_processed_input()
            .get_key_state(KeyCode::KeyD)
            .is_just_released());
    }
}
