/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Center,
    Other(u16),
}

/// Modifier keys held when an event was produced.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseAction {
    Press,
    Release,
    Click,
    Drag,
    Move,
    Enter,
    Exit,
    Wheel,
}

/// Mouse event handed to event-taking phases.
///
/// Coordinates are in sketch pixels. For wheel events `count` is the number
/// of wheel notches, positive when scrolling towards the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub x: f32,
    pub y: f32,
    pub button: Option<MouseButton>,
    pub count: i32,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    pub fn wheel(x: f32, y: f32, count: i32, modifiers: Modifiers) -> Self {
        Self {
            action: MouseAction::Wheel,
            x,
            y,
            button: None,
            count,
            modifiers,
        }
    }
}
