use std::fmt;

/// Engine-assigned listener identifier, unique per window.
pub type ListenerId = u64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ListenerKind {
    /// GPU-side listener (render callbacks bound to the window's context).
    GlEvent,
    Window,
    Key,
    Mouse,
}

impl ListenerKind {
    /// Input-side kinds, in removal order.
    pub const INPUT: [ListenerKind; 3] = [ListenerKind::Window, ListenerKind::Key, ListenerKind::Mouse];
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListenerKind::GlEvent => "gl-event",
            ListenerKind::Window => "window",
            ListenerKind::Key => "key",
            ListenerKind::Mouse => "mouse",
        })
    }
}

/// A native window the engine created and owns.
///
/// The bridge never holds one outside of shutdown.
pub trait NativeWindow {
    /// Whether the window carries GPU listeners that must be disposed first.
    fn is_gpu_backed(&self) -> bool {
        false
    }

    fn listeners(&mut self, kind: ListenerKind) -> anyhow::Result<Vec<ListenerId>>;

    /// Removes (or, for `GlEvent`, disposes) one listener.
    fn detach_listener(&mut self, kind: ListenerKind, id: ListenerId) -> anyhow::Result<()>;

    fn destroy(&mut self) -> anyhow::Result<()>;
}

/// A software window living inside a toolkit frame.
pub trait FramedWindow {
    fn dispose_frame(&mut self) -> anyhow::Result<()>;
}

/// Any other surface (offscreen, headless). It can only be hidden.
pub trait HeadlessSurface {
    fn set_visible(&mut self, visible: bool) -> anyhow::Result<()>;
}

/// The engine's surface, as seen at shutdown.
pub enum SurfaceHandle<'a> {
    Native(&'a mut dyn NativeWindow),
    Framed(&'a mut dyn FramedWindow),
    Headless(&'a mut dyn HeadlessSurface),
}
