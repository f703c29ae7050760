use crate::phase::Phase;
use crate::provider::HandlerProvider;
use crate::registry::HandlerSet;

use super::report::{TeardownFault, TeardownReport, TeardownStep};
use super::surface::{FramedWindow, HeadlessSurface, ListenerKind, NativeWindow, SurfaceHandle};

/// Runs the shutdown steps in order, capturing each step's outcome.
///
/// 1. `exiting` handler, if registered, regardless of run state
/// 2. provider shutdown, unconditionally
/// 3. surface release: GL listeners → window/key/mouse listeners → destroy
///    for native windows; dispose the frame for framed windows; hide anything
///    else
///
/// No step's failure stops a later step.
pub struct ShutdownSequencer<'a> {
    handlers: &'a HandlerSet,
    provider: &'a mut dyn HandlerProvider,
    report: TeardownReport,
}

impl<'a> ShutdownSequencer<'a> {
    pub fn new(handlers: &'a HandlerSet, provider: &'a mut dyn HandlerProvider) -> Self {
        Self {
            handlers,
            provider,
            report: TeardownReport::default(),
        }
    }

    pub fn run(mut self, surface: SurfaceHandle<'_>) -> TeardownReport {
        self.notify_exit();
        self.shutdown_runtime();

        match surface {
            SurfaceHandle::Native(window) => self.release_native(window),
            SurfaceHandle::Framed(frame) => self.release_framed(frame),
            SurfaceHandle::Headless(surface) => self.hide(surface),
        }

        self.report
    }

    fn notify_exit(&mut self) {
        if !self.handlers.contains(Phase::Exiting) {
            return;
        }
        let result = if self.provider.invoke(Phase::Exiting, None) {
            Ok(())
        } else {
            Err(TeardownFault::ExitHandler)
        };
        self.report.record(TeardownStep::ExitNotification, result);
    }

    fn shutdown_runtime(&mut self) {
        let result = self
            .provider
            .shutdown()
            .map_err(|e| TeardownFault::Runtime(format!("{e:#}")));
        self.report.record(TeardownStep::RuntimeShutdown, result);
    }

    fn release_native(&mut self, window: &mut dyn NativeWindow) {
        if window.is_gpu_backed() {
            self.detach_all(window, ListenerKind::GlEvent);
        }
        for kind in ListenerKind::INPUT {
            self.detach_all(window, kind);
        }

        let result = window
            .destroy()
            .map_err(|e| TeardownFault::Destroy(format!("{e:#}")));
        self.report.record(TeardownStep::DestroyWindow, result);
    }

    fn detach_all(&mut self, window: &mut dyn NativeWindow, kind: ListenerKind) {
        let ids = match window.listeners(kind) {
            Ok(ids) => {
                self.report.record(TeardownStep::EnumerateListeners(kind), Ok(()));
                ids
            }
            Err(e) => {
                let fault = TeardownFault::Enumerate {
                    kind,
                    reason: format!("{e:#}"),
                };
                self.report.record(TeardownStep::EnumerateListeners(kind), Err(fault));
                return;
            }
        };

        for id in ids {
            let result = window
                .detach_listener(kind, id)
                .map_err(|e| TeardownFault::Detach {
                    kind,
                    id,
                    reason: format!("{e:#}"),
                });
            self.report.record(TeardownStep::DetachListener(kind, id), result);
        }
    }

    fn release_framed(&mut self, frame: &mut dyn FramedWindow) {
        let result = frame
            .dispose_frame()
            .map_err(|e| TeardownFault::Dispose(format!("{e:#}")));
        self.report.record(TeardownStep::DisposeFrame, result);
    }

    fn hide(&mut self, surface: &mut dyn HeadlessSurface) {
        let result = surface
            .set_visible(false)
            .map_err(|e| TeardownFault::Hide(format!("{e:#}")));
        self.report.record(TeardownStep::HideSurface, result);
    }
}
