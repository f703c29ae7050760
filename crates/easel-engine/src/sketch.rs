use std::cell::{Ref, RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use easel_bridge::geometry::submit_to;
use easel_bridge::pixels::{apply_bytes, from_bytes, load_and_get_pixels, to_bytes};
use easel_bridge::{
    BridgeResult, GeometryBatch, GeometryCall, GeometryKind, Modifiers, MouseButton, PixelCache, PixelImage,
    Point, Recording,
};

use crate::canvas::Canvas;
use crate::capture::insert_frame_path;
use crate::input::{InputEvent, InputState, Key, LifecycleCall};

struct SketchState {
    canvas: Canvas,
    input: InputState,
    frame_count: u64,
    frame_rate: f32,
    target_fps: f32,
    looping: bool,
    redraw: bool,
    exit_requested: bool,
    /// The window exists; size and density are fixed from here on.
    started: bool,
}

/// Shared handle to the sketch's canvas and input state.
///
/// Cheap to clone. Handlers capture a clone and call into it; the runtime
/// holds one too. Every method borrows the state only for its own duration,
/// so calls may be freely interleaved.
///
/// ```rust,ignore
/// let sketch = SketchHandle::new(400, 300);
/// let handlers = ClosureHandlers::new().draw({
///     let s = sketch.clone();
///     move || {
///         s.background(color::gray(30));
///         s.point(s.mouse_x(), s.mouse_y());
///         Ok(())
///     }
/// });
/// ```
#[derive(Clone)]
pub struct SketchHandle(Rc<RefCell<SketchState>>);

impl SketchHandle {
    pub fn new(width: u32, height: u32) -> Self {
        Self(Rc::new(RefCell::new(SketchState {
            canvas: Canvas::new(width, height, 1),
            input: InputState::default(),
            frame_count: 0,
            frame_rate: 60.0,
            target_fps: 60.0,
            looping: true,
            redraw: false,
            exit_requested: false,
            started: false,
        })))
    }

    fn state(&self) -> Ref<'_, SketchState> {
        self.0.borrow()
    }

    fn state_mut(&self) -> RefMut<'_, SketchState> {
        self.0.borrow_mut()
    }

    /// Direct canvas access for anything not wrapped here.
    pub fn with_canvas<R>(&self, f: impl FnOnce(&mut Canvas) -> R) -> R {
        f(&mut self.state_mut().canvas)
    }

    // ── Configuration (settings phase) ────────────────────────────────────

    /// Sets the canvas size. Only effective before the window opens.
    pub fn size(&self, width: u32, height: u32) {
        let mut st = self.state_mut();
        if st.started {
            log::warn!("size() after the window opened is ignored");
            return;
        }
        let density = st.canvas.raster().density();
        st.canvas.resize(width, height, density);
    }

    /// Physical pixels per sketch pixel. Only effective before the window
    /// opens.
    pub fn pixel_density(&self, density: u32) {
        let mut st = self.state_mut();
        if st.started {
            log::warn!("pixel_density() after the window opened is ignored");
            return;
        }
        let (w, h) = (st.canvas.raster().width(), st.canvas.raster().height());
        st.canvas.resize(w, h, density.max(1));
    }

    pub fn width(&self) -> u32 {
        self.state().canvas.raster().width()
    }

    pub fn height(&self) -> u32 {
        self.state().canvas.raster().height()
    }

    pub fn density(&self) -> u32 {
        self.state().canvas.raster().density()
    }

    // ── Loop control ──────────────────────────────────────────────────────

    pub fn frame_count(&self) -> u64 {
        self.state().frame_count
    }

    /// Smoothed frames per second actually achieved.
    pub fn frame_rate(&self) -> f32 {
        self.state().frame_rate
    }

    pub fn set_frame_rate(&self, fps: f32) {
        self.state_mut().target_fps = fps;
    }

    pub fn target_frame_rate(&self) -> f32 {
        self.state().target_fps
    }

    pub fn no_loop(&self) {
        self.state_mut().looping = false;
    }

    pub fn resume_loop(&self) {
        self.state_mut().looping = true;
    }

    pub fn is_looping(&self) -> bool {
        self.state().looping
    }

    /// Draw one more frame while not looping.
    pub fn redraw(&self) {
        self.state_mut().redraw = true;
    }

    /// Ends the session after the current call returns.
    pub fn exit(&self) {
        self.state_mut().exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.state().exit_requested
    }

    // ── Drawing ───────────────────────────────────────────────────────────

    pub fn background(&self, c: u32) {
        self.state_mut().canvas.raster_mut().background(c);
    }

    pub fn fill(&self, c: u32) {
        self.state_mut().canvas.raster_mut().style.fill = Some(c);
    }

    pub fn no_fill(&self) {
        self.state_mut().canvas.raster_mut().style.fill = None;
    }

    pub fn stroke(&self, c: u32) {
        self.state_mut().canvas.raster_mut().style.stroke = Some(c);
    }

    pub fn no_stroke(&self) {
        self.state_mut().canvas.raster_mut().style.stroke = None;
    }

    pub fn stroke_weight(&self, w: f32) {
        self.state_mut().canvas.raster_mut().style.stroke_weight = w;
    }

    pub fn point(&self, x: f32, y: f32) {
        self.issue(GeometryCall::Point(Point::xy(x, y)));
    }

    pub fn line(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.issue(GeometryCall::Line(Point::xy(x1, y1), Point::xy(x2, y2)));
    }

    pub fn begin_shape(&self) {
        self.state_mut().canvas.raster_mut().begin_shape();
    }

    pub fn vertex(&self, x: f32, y: f32) {
        self.issue(GeometryCall::Vertex(Point::xy(x, y)));
    }

    pub fn bezier_vertex(&self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.issue(GeometryCall::BezierVertex(
            Point::xy(x1, y1),
            Point::xy(x2, y2),
            Point::xy(x3, y3),
        ));
    }

    pub fn curve_vertex(&self, x: f32, y: f32) {
        self.issue(GeometryCall::CurveVertex(Point::xy(x, y)));
    }

    pub fn quadratic_vertex(&self, cx: f32, cy: f32, x: f32, y: f32) {
        self.issue(GeometryCall::QuadraticVertex(Point::xy(cx, cy), Point::xy(x, y)));
    }

    pub fn end_shape(&self, close: bool) {
        self.state_mut().canvas.raster_mut().end_shape(close);
    }

    fn issue(&self, call: GeometryCall) {
        self.state_mut().canvas.issue(call);
    }

    // ── Batched geometry ──────────────────────────────────────────────────

    /// Submits one `kind` call per batch row. Returns the number of rows.
    pub fn submit(&self, kind: GeometryKind, batch: &GeometryBatch) -> BridgeResult<usize> {
        submit_to(kind, batch, &mut self.state_mut().canvas)
    }

    pub fn points(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::Point, batch)
    }

    pub fn lines(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::Line, batch)
    }

    pub fn vertices(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::Vertex, batch)
    }

    pub fn bezier_vertices(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::BezierVertex, batch)
    }

    pub fn curve_vertices(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::CurveVertex, batch)
    }

    pub fn quadratic_vertices(&self, batch: &GeometryBatch) -> BridgeResult<usize> {
        self.submit(GeometryKind::QuadraticVertex, batch)
    }

    /// Mirror every following geometry call into a recording.
    pub fn begin_record(&self) {
        self.state_mut().canvas.begin_record();
    }

    pub fn end_record(&self) -> Option<Recording> {
        self.state_mut().canvas.end_record()
    }

    // ── Pixels ────────────────────────────────────────────────────────────

    pub fn load_pixels(&self) {
        self.state_mut().canvas.load_pixels();
    }

    pub fn update_pixels(&self) {
        self.state_mut().canvas.update_pixels();
    }

    /// Mutable access to the pixel cache. Pair with `load_pixels` and
    /// `update_pixels`.
    pub fn with_pixels<R>(&self, f: impl FnOnce(&mut [u32]) -> R) -> R {
        f(self.state_mut().canvas.pixels_mut())
    }

    /// Loads the cache and returns it as big-endian bytes.
    pub fn load_and_get_pixels(&self) -> Vec<u8> {
        load_and_get_pixels(&mut self.state_mut().canvas)
    }

    /// Overwrites the cache with `bytes` and commits it to the display.
    pub fn set_and_update_pixels(&self, bytes: &[u8]) -> BridgeResult<()> {
        apply_bytes(&mut self.state_mut().canvas, bytes)
    }

    pub fn convert_bytes_to_image(&self, bytes: &[u8], width: u32, height: u32) -> BridgeResult<PixelImage> {
        from_bytes(bytes, width, height)
    }

    /// Copy of the displayed frame. Leaves the pixel cache alone.
    pub fn grab_frame(&self) -> BridgeResult<PixelImage> {
        let (bytes, (w, h)) = {
            let st = self.state();
            let raster = st.canvas.raster();
            (to_bytes(raster.pixels()), raster.pixel_size())
        };
        from_bytes(&bytes, w, h)
    }

    /// Saves the displayed frame and returns the path written.
    ///
    /// A run of `#` in `path` is replaced by the zero-padded frame count, so
    /// `frame-####.png` on frame 42 becomes `frame-0042.png`.
    pub fn save_frame(&self, path: impl AsRef<Path>) -> BridgeResult<PathBuf> {
        self.save_numbered_frame(path, self.frame_count())
    }

    /// [`save_frame`](Self::save_frame) with `num` substituted instead of the
    /// frame count.
    pub fn save_numbered_frame(&self, path: impl AsRef<Path>, num: u64) -> BridgeResult<PathBuf> {
        let path = insert_frame_path(path.as_ref(), num);
        self.grab_frame()?.save(&path)?;
        Ok(path)
    }

    // ── Input ─────────────────────────────────────────────────────────────

    pub fn mouse_x(&self) -> f32 {
        self.state().input.position().0
    }

    pub fn mouse_y(&self) -> f32 {
        self.state().input.position().1
    }

    pub fn pmouse_x(&self) -> f32 {
        self.state().input.prev_pointer.0
    }

    pub fn pmouse_y(&self) -> f32 {
        self.state().input.prev_pointer.1
    }

    pub fn is_mouse_pressed(&self) -> bool {
        self.state().input.is_mouse_pressed()
    }

    pub fn mouse_button(&self) -> Option<MouseButton> {
        self.state().input.last_button
    }

    pub fn key(&self) -> Option<char> {
        self.state().input.last_char
    }

    pub fn key_code(&self) -> Option<Key> {
        self.state().input.last_key
    }

    pub fn is_key_pressed(&self) -> bool {
        self.state().input.is_key_pressed()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.state().input.modifiers
    }

    // ── Runtime side ──────────────────────────────────────────────────────

    pub(crate) fn apply_input(&self, ev: InputEvent) -> Vec<LifecycleCall> {
        self.state_mut().input.apply(ev)
    }

    pub(crate) fn begin_frame(&self, frame_count: u64, frame_rate: f32) {
        let mut st = self.state_mut();
        st.frame_count = frame_count;
        st.frame_rate = frame_rate;
    }

    /// Whether a frame should be drawn now; consumes a pending `redraw`.
    pub(crate) fn take_draw_request(&self) -> bool {
        let mut st = self.state_mut();
        st.looping || std::mem::take(&mut st.redraw)
    }

    pub(crate) fn wants_frames(&self) -> bool {
        let st = self.state();
        st.looping || st.redraw
    }

    pub(crate) fn mark_started(&self) {
        self.state_mut().started = true;
    }

    pub(crate) fn pixel_size(&self) -> (u32, u32) {
        self.state().canvas.raster().pixel_size()
    }

    /// Runs `f` on the displayed frame.
    pub(crate) fn with_display<R>(&self, f: impl FnOnce(&[u32], u32, u32) -> R) -> R {
        let st = self.state();
        let raster = st.canvas.raster();
        let (w, h) = raster.pixel_size();
        f(raster.pixels(), w, h)
    }
}

impl Default for SketchHandle {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::color;
    use easel_bridge::BridgeError;

    #[test]
    fn size_is_locked_once_started() {
        let s = SketchHandle::new(10, 10);
        s.size(20, 5);
        s.pixel_density(2);
        assert_eq!((s.width(), s.height(), s.density()), (20, 5, 2));
        assert_eq!(s.pixel_size(), (40, 10));

        s.mark_started();
        s.size(1, 1);
        assert_eq!(s.width(), 20);
    }

    #[test]
    fn pixel_bytes_round_trip_through_the_handle() {
        let s = SketchHandle::new(2, 2);
        s.background(color::rgb(1, 2, 3));
        let bytes = s.load_and_get_pixels();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..4], &[0xFF, 1, 2, 3]);

        let image = s.convert_bytes_to_image(&bytes, 2, 2).unwrap();
        assert_eq!(image.get(1, 1), Some(color::rgb(1, 2, 3)));

        assert!(matches!(
            s.set_and_update_pixels(&bytes[..12]),
            Err(BridgeError::SizeMismatch { expected: 16, actual: 12 })
        ));
    }

    #[test]
    fn with_pixels_edits_are_committed_by_update() {
        let s = SketchHandle::new(1, 1);
        s.load_pixels();
        s.with_pixels(|px| px[0] = color::WHITE);
        s.with_display(|px, _, _| assert_eq!(px[0], color::DEFAULT_BACKGROUND));
        s.update_pixels();
        s.with_display(|px, w, h| {
            assert_eq!((w, h), (1, 1));
            assert_eq!(px[0], color::WHITE);
        });
    }

    #[test]
    fn save_frame_numbers_the_file() {
        let dir = std::env::temp_dir().join(format!("easel-sketch-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let s = SketchHandle::new(3, 2);
        s.background(color::rgb(9, 8, 7));
        s.begin_frame(42, 60.0);
        let path = s.save_frame(dir.join("frame-####.png")).unwrap();
        assert_eq!(path, dir.join("frame-0042.png"));

        let back = s.convert_bytes_to_image(&s.load_and_get_pixels(), 3, 2).unwrap();
        assert_eq!(s.grab_frame().unwrap(), back);
        assert!(path.is_file());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn batched_points_are_recorded() {
        let s = SketchHandle::new(8, 8);
        s.begin_record();
        let n = s
            .points(&GeometryBatch::from_rows(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]))
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(s.end_record().map(|r| r.len()), Some(3));
        assert!(s.lines(&GeometryBatch::from_rows(&[[0.0, 0.0]])).is_err());
    }

    #[test]
    fn redraw_is_consumed_once() {
        let s = SketchHandle::new(1, 1);
        s.no_loop();
        assert!(!s.take_draw_request());
        s.redraw();
        assert!(s.wants_frames());
        assert!(s.take_draw_request());
        assert!(!s.take_draw_request());
    }

    #[test]
    fn input_reaches_sketch_queries() {
        let s = SketchHandle::new(100, 100);
        s.apply_input(InputEvent::PointerMoved { x: 4.0, y: 5.0 });
        s.apply_input(InputEvent::PointerMoved { x: 6.0, y: 7.0 });
        assert_eq!((s.mouse_x(), s.mouse_y()), (6.0, 7.0));
        assert_eq!((s.pmouse_x(), s.pmouse_y()), (4.0, 5.0));
        assert!(!s.is_mouse_pressed());
    }
}
