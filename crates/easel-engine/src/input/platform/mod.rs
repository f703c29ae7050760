//! Platform event translation.

mod winit;

pub use self::winit::{translate_key_event, translate_mouse_event, translate_window_event};
