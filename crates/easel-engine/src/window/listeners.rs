use anyhow::{Result, bail};
use winit::event::WindowEvent;

use easel_bridge::shutdown::{ListenerId, ListenerKind};

use crate::input::InputEvent;
use crate::input::platform::{translate_key_event, translate_mouse_event, translate_window_event};

/// Something attached to the native window that turns its events into
/// input.
pub trait EventListener {
    fn kind(&self) -> ListenerKind;

    /// `pixel_scale` is physical pixels per sketch pixel.
    fn handle(&mut self, event: &WindowEvent, pixel_scale: f64) -> Option<InputEvent>;
}

/// Focus changes.
pub struct WindowStateListener;

impl EventListener for WindowStateListener {
    fn kind(&self) -> ListenerKind {
        ListenerKind::Window
    }

    fn handle(&mut self, event: &WindowEvent, _: f64) -> Option<InputEvent> {
        translate_window_event(event)
    }
}

pub struct KeyListener;

impl EventListener for KeyListener {
    fn kind(&self) -> ListenerKind {
        ListenerKind::Key
    }

    fn handle(&mut self, event: &WindowEvent, _: f64) -> Option<InputEvent> {
        translate_key_event(event)
    }
}

pub struct MouseListener;

impl EventListener for MouseListener {
    fn kind(&self) -> ListenerKind {
        ListenerKind::Mouse
    }

    fn handle(&mut self, event: &WindowEvent, pixel_scale: f64) -> Option<InputEvent> {
        translate_mouse_event(event, pixel_scale)
    }
}

/// Listeners attached to a window, in attachment order.
///
/// Ids start at 1 and are never reused.
pub struct ListenerTable {
    next_id: ListenerId,
    entries: Vec<(ListenerId, Box<dyn EventListener>)>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// The window, key and mouse listeners every sketch window carries.
    pub fn attach_input_listeners(&mut self) {
        self.add(Box::new(WindowStateListener));
        self.add(Box::new(KeyListener));
        self.add(Box::new(MouseListener));
    }

    pub fn add(&mut self, listener: Box<dyn EventListener>) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        log::trace!("attached {} listener {id}", listener.kind());
        self.entries.push((id, listener));
        id
    }

    pub fn ids(&self, kind: ListenerKind) -> Vec<ListenerId> {
        self.entries
            .iter()
            .filter(|(_, l)| l.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn remove(&mut self, kind: ListenerKind, id: ListenerId) -> Result<()> {
        let Some(pos) = self
            .entries
            .iter()
            .position(|(i, l)| *i == id && l.kind() == kind)
        else {
            bail!("no {kind} listener with id {id}");
        };
        self.entries.remove(pos);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Offers `event` to every listener; returns what they produced.
    pub fn dispatch(&mut self, event: &WindowEvent, pixel_scale: f64) -> Vec<InputEvent> {
        self.entries
            .iter_mut()
            .filter_map(|(_, l)| l.handle(event, pixel_scale))
            .collect()
    }
}

impl Default for ListenerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_listeners_get_one_id_each() {
        let mut t = ListenerTable::new();
        t.attach_input_listeners();
        assert_eq!(t.ids(ListenerKind::Window), vec![1]);
        assert_eq!(t.ids(ListenerKind::Key), vec![2]);
        assert_eq!(t.ids(ListenerKind::Mouse), vec![3]);
        assert!(t.ids(ListenerKind::GlEvent).is_empty());
    }

    #[test]
    fn removed_listener_stops_producing_input() {
        let mut t = ListenerTable::new();
        t.attach_input_listeners();
        assert_eq!(t.dispatch(&WindowEvent::Focused(true), 1.0), vec![InputEvent::Focused(true)]);

        t.remove(ListenerKind::Window, 1).unwrap();
        assert!(t.dispatch(&WindowEvent::Focused(true), 1.0).is_empty());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn removal_checks_kind_and_id() {
        let mut t = ListenerTable::new();
        t.attach_input_listeners();
        assert!(t.remove(ListenerKind::Mouse, 1).is_err());
        assert!(t.remove(ListenerKind::Key, 99).is_err());
        t.remove(ListenerKind::Key, 2).unwrap();
        assert!(t.remove(ListenerKind::Key, 2).is_err());
    }
}
