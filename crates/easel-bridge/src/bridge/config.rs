/// What a draw call does when the session registered no draw handler.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum UnregisteredDrawPolicy {
    /// Ask the engine to stop looping: a static sketch renders once.
    #[default]
    StopLoop,
    /// Run the engine's default draw every frame.
    DefaultDraw,
}

/// Bridge configuration.
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    pub unregistered_draw: UnregisteredDrawPolicy,
}
