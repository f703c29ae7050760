//! Fakes shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, anyhow, bail};
use easel_bridge::shutdown::{FramedWindow, HeadlessSurface, ListenerId, ListenerKind, NativeWindow};
use easel_bridge::{Engine, HandlerProvider, MouseEvent, Phase, SurfaceHandle};

/// Ordered trace shared between the provider and the surface, so tests can
/// check interleaving across both.
pub type Trace = Rc<RefCell<Vec<String>>>;

pub fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(t: &Trace) -> Vec<String> {
    t.borrow().clone()
}

/// Provider whose handlers succeed unless a failure rule says otherwise.
pub struct RecordingProvider {
    names: Vec<String>,
    fail_always: Vec<Phase>,
    fail_on_call: HashMap<Phase, usize>,
    counts: HashMap<Phase, usize>,
    pub events: Vec<MouseEvent>,
    pub shutdown_calls: usize,
    pub shutdown_error: Option<String>,
    pub unreachable: bool,
    trace: Trace,
}

impl RecordingProvider {
    pub fn new(names: &[&str], trace: &Trace) -> Self {
        Self {
            names: names.iter().map(|s| s.to_string()).collect(),
            fail_always: Vec::new(),
            fail_on_call: HashMap::new(),
            counts: HashMap::new(),
            events: Vec::new(),
            shutdown_calls: 0,
            shutdown_error: None,
            unreachable: false,
            trace: trace.clone(),
        }
    }

    pub fn failing(mut self, phase: Phase) -> Self {
        self.fail_always.push(phase);
        self
    }

    /// Fail only the `n`th (1-based) invocation of `phase`.
    pub fn failing_on(mut self, phase: Phase, n: usize) -> Self {
        self.fail_on_call.insert(phase, n);
        self
    }

    pub fn calls(&self, phase: Phase) -> usize {
        self.counts.get(&phase).copied().unwrap_or(0)
    }
}

impl HandlerProvider for RecordingProvider {
    fn phase_names(&self) -> Result<Vec<String>> {
        if self.unreachable {
            bail!("provider boundary closed");
        }
        Ok(self.names.clone())
    }

    fn invoke(&mut self, phase: Phase, event: Option<&MouseEvent>) -> bool {
        let n = self.counts.entry(phase).or_insert(0);
        *n += 1;
        let n = *n;
        self.trace.borrow_mut().push(phase.name().to_string());
        if let Some(ev) = event {
            self.events.push(*ev);
        }
        !(self.fail_always.contains(&phase) || self.fail_on_call.get(&phase) == Some(&n))
    }

    fn shutdown(&mut self) -> Result<()> {
        self.shutdown_calls += 1;
        self.trace.borrow_mut().push("runtime_shutdown".into());
        match &self.shutdown_error {
            Some(msg) => Err(anyhow!("{msg}")),
            None => Ok(()),
        }
    }
}

/// Native window with scripted listener tables and failure switches.
pub struct FakeWindow {
    pub gpu: bool,
    pub listeners: HashMap<ListenerKind, Vec<ListenerId>>,
    pub fail_enumerate: Vec<ListenerKind>,
    pub fail_detach: Vec<ListenerId>,
    pub fail_destroy: bool,
    pub destroyed: usize,
    trace: Trace,
}

impl FakeWindow {
    pub fn new(trace: &Trace) -> Self {
        let mut listeners = HashMap::new();
        listeners.insert(ListenerKind::Window, vec![1]);
        listeners.insert(ListenerKind::Key, vec![2, 3]);
        listeners.insert(ListenerKind::Mouse, vec![4]);
        Self {
            gpu: false,
            listeners,
            fail_enumerate: Vec::new(),
            fail_detach: Vec::new(),
            fail_destroy: false,
            destroyed: 0,
            trace: trace.clone(),
        }
    }

    pub fn gpu(mut self, ids: &[ListenerId]) -> Self {
        self.gpu = true;
        self.listeners.insert(ListenerKind::GlEvent, ids.to_vec());
        self
    }

    pub fn attached(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

impl NativeWindow for FakeWindow {
    fn is_gpu_backed(&self) -> bool {
        self.gpu
    }

    fn listeners(&mut self, kind: ListenerKind) -> Result<Vec<ListenerId>> {
        if self.fail_enumerate.contains(&kind) {
            bail!("{kind} listener list unavailable");
        }
        Ok(self.listeners.get(&kind).cloned().unwrap_or_default())
    }

    fn detach_listener(&mut self, kind: ListenerKind, id: ListenerId) -> Result<()> {
        if self.destroyed > 0 {
            bail!("detach after destroy");
        }
        if self.fail_detach.contains(&id) {
            bail!("listener {id} refused removal");
        }
        if let Some(ids) = self.listeners.get_mut(&kind) {
            ids.retain(|&l| l != id);
        }
        self.trace.borrow_mut().push(format!("detach {kind} {id}"));
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.destroyed += 1;
        self.trace
            .borrow_mut()
            .push(format!("destroy with {} attached", self.attached()));
        if self.fail_destroy {
            bail!("window already gone");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeFrame {
    pub disposed: usize,
}

impl FramedWindow for FakeFrame {
    fn dispose_frame(&mut self) -> Result<()> {
        self.disposed += 1;
        Ok(())
    }
}

pub struct FakeOffscreen {
    pub visible: bool,
}

impl HeadlessSurface for FakeOffscreen {
    fn set_visible(&mut self, visible: bool) -> Result<()> {
        self.visible = visible;
        Ok(())
    }
}

pub enum FakeSurface {
    Native(FakeWindow),
    Framed(FakeFrame),
    Headless(FakeOffscreen),
}

/// Engine that counts default/loop calls and exposes a fake surface.
pub struct FakeEngine {
    pub surface: FakeSurface,
    pub looping: bool,
    pub no_loop_calls: usize,
    pub default_settings: usize,
    pub default_setup: usize,
    pub default_draw: usize,
}

impl FakeEngine {
    pub fn with(surface: FakeSurface) -> Self {
        Self {
            surface,
            looping: true,
            no_loop_calls: 0,
            default_settings: 0,
            default_setup: 0,
            default_draw: 0,
        }
    }

    pub fn native(trace: &Trace) -> Self {
        Self::with(FakeSurface::Native(FakeWindow::new(trace)))
    }

    pub fn headless() -> Self {
        Self::with(FakeSurface::Headless(FakeOffscreen { visible: true }))
    }

    pub fn window(&self) -> &FakeWindow {
        match &self.surface {
            FakeSurface::Native(w) => w,
            _ => panic!("not a native surface"),
        }
    }
}

impl Engine for FakeEngine {
    fn default_settings(&mut self) {
        self.default_settings += 1;
    }

    fn default_setup(&mut self) {
        self.default_setup += 1;
    }

    fn default_draw(&mut self) {
        self.default_draw += 1;
    }

    fn no_loop(&mut self) {
        self.looping = false;
        self.no_loop_calls += 1;
    }

    fn surface(&mut self) -> SurfaceHandle<'_> {
        match &mut self.surface {
            FakeSurface::Native(w) => SurfaceHandle::Native(w),
            FakeSurface::Framed(f) => SurfaceHandle::Framed(f),
            FakeSurface::Headless(h) => SurfaceHandle::Headless(h),
        }
    }
}
