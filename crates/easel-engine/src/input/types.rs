use easel_bridge::{Lifecycle, Modifiers, MouseButton, MouseEvent};

/// Keyboard key as seen by sketches.
///
/// Printable keys carry their character; a few named keys are kept for
/// `key_code`-style checks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Character(char),
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Shift,
    Control,
    Alt,
    Meta,
    /// Anything else, keyed by the platform's physical code.
    Other(u32),
}

impl Key {
    /// Character produced when the key is typed, if any.
    pub fn typed_char(self) -> Option<char> {
        match self {
            Key::Character(c) => Some(c),
            Key::Enter => Some('\n'),
            Key::Tab => Some('\t'),
            Key::Backspace => Some('\u{8}'),
            Key::Escape => Some('\u{1b}'),
            Key::Delete => Some('\u{7f}'),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Scroll amount as reported by the platform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    /// Notches; positive `y` scrolls away from the user.
    Line { x: f32, y: f32 },
    /// Sketch pixels; same sign convention.
    Pixel { x: f32, y: f32 },
}

/// Platform-agnostic input event, in sketch coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),
    Focused(bool),
    PointerEntered,
    PointerLeft,
    PointerMoved { x: f32, y: f32 },
    PointerButton { button: MouseButton, state: ButtonState },
    Wheel(WheelDelta),
    Key { key: Key, state: KeyState, repeat: bool },
}

/// One engine lifecycle call produced by input.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleCall {
    MousePressed,
    MouseReleased,
    MouseClicked,
    MouseDragged,
    MouseMoved,
    MouseEntered,
    MouseExited,
    MouseWheel(MouseEvent),
    KeyPressed,
    KeyReleased,
    KeyTyped,
}

impl LifecycleCall {
    pub fn deliver(&self, target: &mut dyn Lifecycle) {
        match self {
            LifecycleCall::MousePressed => target.mouse_pressed(),
            LifecycleCall::MouseReleased => target.mouse_released(),
            LifecycleCall::MouseClicked => target.mouse_clicked(),
            LifecycleCall::MouseDragged => target.mouse_dragged(),
            LifecycleCall::MouseMoved => target.mouse_moved(),
            LifecycleCall::MouseEntered => target.mouse_entered(),
            LifecycleCall::MouseExited => target.mouse_exited(),
            LifecycleCall::MouseWheel(ev) => target.mouse_wheel(ev),
            LifecycleCall::KeyPressed => target.key_pressed(),
            LifecycleCall::KeyReleased => target.key_released(),
            LifecycleCall::KeyTyped => target.key_typed(),
        }
    }
}
