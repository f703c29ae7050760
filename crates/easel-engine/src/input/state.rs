use std::collections::HashSet;

use easel_bridge::{Modifiers, MouseButton, MouseEvent};

use super::types::{ButtonState, InputEvent, Key, KeyState, LifecycleCall, WheelDelta};

/// Pixel scroll distance counted as one wheel notch.
const PIXELS_PER_NOTCH: f32 = 40.0;

/// Current input state of the sketch window.
///
/// `apply` is the only mutator: it updates the state and returns the
/// lifecycle calls the event stands for, in delivery order.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,

    /// Last known pointer position in sketch pixels. Kept after the pointer
    /// leaves the window.
    pub pointer: (f32, f32),
    pub pointer_inside: bool,
    /// Position before the latest pointer move.
    pub prev_pointer: (f32, f32),

    pub buttons_down: HashSet<MouseButton>,
    pub last_button: Option<MouseButton>,

    pub keys_down: HashSet<Key>,
    pub last_key: Option<Key>,
    pub last_char: Option<char>,

    /// Pointer moved while a button was held since the last press.
    dragged: bool,
}

impl InputState {
    pub fn apply(&mut self, ev: InputEvent) -> Vec<LifecycleCall> {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = m;
                Vec::new()
            }

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Avoid stuck keys/buttons when focus changes mid-press.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
                Vec::new()
            }

            InputEvent::PointerEntered => {
                self.pointer_inside = true;
                vec![LifecycleCall::MouseEntered]
            }

            InputEvent::PointerLeft => {
                self.pointer_inside = false;
                vec![LifecycleCall::MouseExited]
            }

            InputEvent::PointerMoved { x, y } => {
                self.prev_pointer = self.pointer;
                self.pointer = (x, y);
                self.pointer_inside = true;
                if self.buttons_down.is_empty() {
                    vec![LifecycleCall::MouseMoved]
                } else {
                    self.dragged = true;
                    vec![LifecycleCall::MouseDragged]
                }
            }

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    self.buttons_down.insert(button);
                    self.last_button = Some(button);
                    self.dragged = false;
                    vec![LifecycleCall::MousePressed]
                }
                ButtonState::Released => {
                    if !self.buttons_down.remove(&button) {
                        return Vec::new();
                    }
                    self.last_button = Some(button);
                    if self.dragged {
                        vec![LifecycleCall::MouseReleased]
                    } else {
                        vec![LifecycleCall::MouseReleased, LifecycleCall::MouseClicked]
                    }
                }
            },

            InputEvent::Wheel(delta) => {
                let count = wheel_count(delta);
                if count == 0 {
                    return Vec::new();
                }
                let (x, y) = self.position();
                vec![LifecycleCall::MouseWheel(MouseEvent::wheel(x, y, count, self.modifiers))]
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                    self.last_key = Some(key);
                    let mut calls = vec![LifecycleCall::KeyPressed];
                    if let Some(c) = key.typed_char() {
                        if !self.modifiers.ctrl && !self.modifiers.meta {
                            self.last_char = Some(c);
                            calls.push(LifecycleCall::KeyTyped);
                        }
                    }
                    if repeat {
                        log::trace!("key repeat {key:?}");
                    }
                    calls
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                    self.last_key = Some(key);
                    vec![LifecycleCall::KeyReleased]
                }
            },
        }
    }

    /// Pointer position, or the last known one once it has left.
    pub fn position(&self) -> (f32, f32) {
        self.pointer
    }

    pub fn is_mouse_pressed(&self) -> bool {
        !self.buttons_down.is_empty()
    }

    pub fn is_key_pressed(&self) -> bool {
        !self.keys_down.is_empty()
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

/// Wheel notches, positive when scrolling towards the user.
fn wheel_count(delta: WheelDelta) -> i32 {
    let notches = match delta {
        WheelDelta::Line { y, .. } => -y,
        WheelDelta::Pixel { y, .. } => -y / PIXELS_PER_NOTCH,
    };
    let rounded = notches.round() as i32;
    if rounded == 0 && notches != 0.0 {
        notches.signum() as i32
    } else {
        rounded
    }
}
