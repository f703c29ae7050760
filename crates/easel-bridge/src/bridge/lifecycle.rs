use crate::event::MouseEvent;
use crate::shutdown::SurfaceHandle;

/// Lifecycle contract the engine drives.
///
/// The engine calls these from its render/event thread, one at a time, in
/// the order settings → setup → (draw | input)* → exit_actual.
pub trait Lifecycle {
    fn settings(&mut self);
    fn setup(&mut self);
    fn draw(&mut self);

    fn mouse_pressed(&mut self);
    fn mouse_released(&mut self);
    fn mouse_clicked(&mut self);
    fn mouse_dragged(&mut self);
    fn mouse_moved(&mut self);
    fn mouse_entered(&mut self);
    fn mouse_exited(&mut self);
    fn mouse_wheel(&mut self, event: &MouseEvent);

    fn key_pressed(&mut self);
    fn key_released(&mut self);
    fn key_typed(&mut self);

    /// Final call. The engine has stopped issuing lifecycle calls.
    fn exit_actual(&mut self);
}

/// What the bridge needs from the engine it is composed with.
pub trait Engine {
    /// Engine behavior when no `settings` handler exists.
    fn default_settings(&mut self) {}

    /// Engine behavior when no `setup` handler exists.
    fn default_setup(&mut self) {}

    /// Engine behavior when no `draw` handler exists (under
    /// [`UnregisteredDrawPolicy::DefaultDraw`](super::UnregisteredDrawPolicy)).
    fn default_draw(&mut self) {}

    /// Stop calling `draw` every frame.
    fn no_loop(&mut self);

    /// The surface the sketch renders into, for shutdown.
    fn surface(&mut self) -> SurfaceHandle<'_>;
}
