use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use easel_bridge::{BridgeError, BridgeResult, Hook, HookStatus, Hooks, Phase, PixelImage};

use crate::sketch::SketchHandle;

struct CaptureState<T> {
    output: T,
    ready: bool,
    terminated: bool,
    error: Option<BridgeError>,
}

/// Result side of a capture hook, shared with the hook itself.
///
/// `is_ready` once the hook has collected everything it was asked for. A
/// capture that fails stores its error, detaches itself and leaves the
/// sketch running; so does one whose session ends first (`is_terminated`).
pub struct Capture<T>(Rc<RefCell<CaptureState<T>>>);

impl<T> Clone for Capture<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Default> Capture<T> {
    fn new() -> Self {
        Self(Rc::new(RefCell::new(CaptureState {
            output: T::default(),
            ready: false,
            terminated: false,
            error: None,
        })))
    }

    /// Takes what has been captured so far.
    pub fn take_output(&self) -> T {
        std::mem::take(&mut self.0.borrow_mut().output)
    }
}

impl<T> Capture<T> {
    pub fn is_ready(&self) -> bool {
        self.0.borrow().ready
    }

    pub fn is_terminated(&self) -> bool {
        self.0.borrow().terminated
    }

    pub fn has_error(&self) -> bool {
        self.0.borrow().error.is_some()
    }

    pub fn take_error(&self) -> Option<BridgeError> {
        self.0.borrow_mut().error.take()
    }

    pub fn with_output<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().output)
    }

    fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.borrow_mut().output);
    }

    fn finish(&self) -> HookStatus {
        self.0.borrow_mut().ready = true;
        HookStatus::Finished
    }

    /// Keeps the error for the caller and detaches the hook.
    fn fail(&self, name: &str, err: BridgeError) -> HookStatus {
        log::warn!("{name} hook stopped: {err}");
        let mut st = self.0.borrow_mut();
        st.error = Some(err);
        st.terminated = true;
        HookStatus::Finished
    }

    fn terminate(&self) {
        self.0.borrow_mut().terminated = true;
    }
}

/// Throttle shared by the periodic hooks.
#[derive(Debug, Clone, Copy)]
struct Period {
    every: Duration,
    last: Option<Instant>,
}

impl Period {
    fn new(every: Duration) -> Self {
        Self { every, last: None }
    }

    fn due(&self) -> bool {
        self.last.is_none_or(|t| t.elapsed() >= self.every)
    }

    fn mark(&mut self) {
        self.last = Some(Instant::now());
    }
}

/// Saves the next drawn frame once, then detaches.
pub struct ScreenshotHook {
    sketch: SketchHandle,
    path: PathBuf,
    capture: Capture<Option<PathBuf>>,
}

impl ScreenshotHook {
    pub const NAME: &'static str = "screenshot";

    /// Attaches after `draw`. `#` runs in `path` take the frame number.
    pub fn attach(hooks: &Hooks, sketch: &SketchHandle, path: impl Into<PathBuf>) -> Capture<Option<PathBuf>> {
        let capture = Capture::new();
        hooks.add_post(Phase::Draw, Self::NAME, Self {
            sketch: sketch.clone(),
            path: path.into(),
            capture: capture.clone(),
        });
        capture
    }
}

impl Hook for ScreenshotHook {
    fn call(&mut self) -> anyhow::Result<HookStatus> {
        Ok(match self.sketch.save_frame(&self.path) {
            Ok(path) => {
                log::info!("screenshot saved to {}", path.display());
                self.capture.update(|out| *out = Some(path));
                self.capture.finish()
            }
            Err(e) => self.capture.fail(Self::NAME, e),
        })
    }

    fn sketch_terminated(&mut self) {
        self.capture.terminate();
    }
}

/// Saves numbered frames to disk every `period` until `limit` files exist.
pub struct SaveFramesHook {
    sketch: SketchHandle,
    template: PathBuf,
    period: Period,
    start: Option<u64>,
    limit: Option<usize>,
    first_frame: Option<u64>,
    capture: Capture<Vec<PathBuf>>,
}

impl SaveFramesHook {
    pub const NAME: &'static str = "save_frames";

    /// `template` is a file name inside `dir`, e.g. `frame-####.png`.
    /// Numbering begins at `start` when given, else follows the frame count.
    /// `limit: None` keeps saving until the session ends.
    pub fn attach(
        hooks: &Hooks,
        sketch: &SketchHandle,
        dir: impl Into<PathBuf>,
        template: &str,
        period: Duration,
        start: Option<u64>,
        limit: Option<usize>,
    ) -> Capture<Vec<PathBuf>> {
        let capture = Capture::new();
        hooks.add_post(Phase::Draw, Self::NAME, Self {
            sketch: sketch.clone(),
            template: dir.into().join(template),
            period: Period::new(period),
            start,
            limit,
            first_frame: None,
            capture: capture.clone(),
        });
        capture
    }

    fn save(&mut self) -> BridgeResult<HookStatus> {
        let frame = self.sketch.frame_count();
        let first = *self.first_frame.get_or_insert(frame);
        let num = match self.start {
            Some(start) => start + frame.saturating_sub(first),
            None => frame,
        };

        let path = self.sketch.save_numbered_frame(&self.template, num)?;
        self.period.mark();
        self.capture.update(|out| out.push(path));

        let saved = self.capture.with_output(Vec::len);
        if self.limit == Some(saved) {
            log::info!("saved {saved} frames");
            return Ok(self.capture.finish());
        }
        Ok(HookStatus::Keep)
    }
}

impl Hook for SaveFramesHook {
    fn call(&mut self) -> anyhow::Result<HookStatus> {
        if !self.period.due() {
            return Ok(HookStatus::Keep);
        }
        Ok(self.save().unwrap_or_else(|e| self.capture.fail(Self::NAME, e)))
    }

    fn sketch_terminated(&mut self) {
        self.capture.terminate();
    }
}

/// Keeps copies of drawn frames in memory every `period` until `limit`.
pub struct GrabFramesHook {
    sketch: SketchHandle,
    period: Period,
    limit: usize,
    capture: Capture<Vec<PixelImage>>,
}

impl GrabFramesHook {
    pub const NAME: &'static str = "grab_frames";

    pub fn attach(hooks: &Hooks, sketch: &SketchHandle, period: Duration, limit: usize) -> Capture<Vec<PixelImage>> {
        let capture = Capture::new();
        hooks.add_post(Phase::Draw, Self::NAME, Self {
            sketch: sketch.clone(),
            period: Period::new(period),
            limit,
            capture: capture.clone(),
        });
        capture
    }
}

impl Hook for GrabFramesHook {
    fn call(&mut self) -> anyhow::Result<HookStatus> {
        if !self.period.due() {
            return Ok(HookStatus::Keep);
        }
        let frame = match self.sketch.grab_frame() {
            Ok(frame) => frame,
            Err(e) => return Ok(self.capture.fail(Self::NAME, e)),
        };
        self.period.mark();
        self.capture.update(|out| out.push(frame));

        if self.capture.with_output(Vec::len) >= self.limit {
            return Ok(self.capture.finish());
        }
        Ok(HookStatus::Keep)
    }

    fn sketch_terminated(&mut self) {
        self.capture.terminate();
    }
}
