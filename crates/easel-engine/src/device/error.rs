use std::fmt;

/// What the runtime should do after a swapchain error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Lost or outdated; the surface was configured again.
    Reconfigured,
    /// Timeout or other transient error; the frame is dropped.
    SkipFrame,
    /// Out of memory. The session has to end.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn is_fatal(self) -> bool {
        self == SurfaceErrorAction::Fatal
    }
}

impl fmt::Display for SurfaceErrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SurfaceErrorAction::Reconfigured => "surface reconfigured",
            SurfaceErrorAction::SkipFrame => "frame skipped",
            SurfaceErrorAction::Fatal => "surface out of memory",
        })
    }
}
