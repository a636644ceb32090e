//! Keyboard state tracking

use crate::scripting::KeySnapshot;
use std::collections::HashSet;
use tracing::trace;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks which keys the host currently sees as held
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Currently pressed keys
    pub keys_pressed: HashSet<KeyCode>,
}

impl InputState {
    /// Create a new empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keyboard event from the window
    pub fn handle_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.set_key(key_code, event.state);
        }
    }

    /// Apply a press or release for one key
    pub fn set_key(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                self.keys_pressed.insert(key_code);
                trace!("Key pressed: {:?}", key_code);
            }
            ElementState::Released => {
                self.keys_pressed.remove(&key_code);
                trace!("Key released: {:?}", key_code);
            }
        }
    }

    /// Forget all held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.keys_pressed.clear();
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key_code: KeyCode) -> bool {
        self.keys_pressed.contains(&key_code)
    }

    /// Snapshot for the current tick, keys named by their `KeyCode` variant
    pub fn to_key_snapshot(&self) -> KeySnapshot {
        let mut snapshot = KeySnapshot::new();
        for key in &self.keys_pressed {
            snapshot.set_key_pressed(format!("{key:?}"), true);
        }
        snapshot
    }
}
