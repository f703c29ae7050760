use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::phase::Phase;

/// What a hook wants after it ran.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HookStatus {
    /// Run again on the next invocation of the phase.
    Keep,
    /// Done; remove this hook.
    Finished,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum HookStage {
    Pre,
    Post,
}

/// Extra work attached around a phase handler (frame grabbers, screenshot
/// savers, profilers).
pub trait Hook {
    fn call(&mut self) -> anyhow::Result<HookStatus>;

    /// The session ended while this hook was still attached.
    fn sketch_terminated(&mut self) {}
}

impl<F> Hook for F
where
    F: FnMut() -> anyhow::Result<HookStatus>,
{
    fn call(&mut self) -> anyhow::Result<HookStatus> {
        self()
    }
}

type SharedHook = Rc<RefCell<dyn Hook>>;

#[derive(Default)]
struct HookTable {
    entries: HashMap<(HookStage, Phase), Vec<(String, SharedHook)>>,
    terminated: bool,
}

/// Shared, cloneable hook registry.
///
/// Handlers may capture a clone and attach or remove hooks while the sketch
/// runs. Hooks with the same `(stage, phase, name)` replace each other in place,
/// so re-adding keeps the original run order.
#[derive(Clone, Default)]
pub struct Hooks(Rc<RefCell<HookTable>>);

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, stage: HookStage, phase: Phase, name: impl Into<String>, hook: impl Hook + 'static) {
        let mut hook = hook;
        if self.0.borrow().terminated {
            hook.sketch_terminated();
            return;
        }

        let name = name.into();
        let shared: SharedHook = Rc::new(RefCell::new(hook));
        let mut table = self.0.borrow_mut();
        let list = table.entries.entry((stage, phase)).or_default();
        match list.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = shared,
            None => list.push((name, shared)),
        }
    }

    pub fn add_pre(&self, phase: Phase, name: impl Into<String>, hook: impl Hook + 'static) {
        self.add(HookStage::Pre, phase, name, hook);
    }

    pub fn add_post(&self, phase: Phase, name: impl Into<String>, hook: impl Hook + 'static) {
        self.add(HookStage::Post, phase, name, hook);
    }

    /// Removes a hook; returns whether it was attached.
    pub fn remove(&self, stage: HookStage, phase: Phase, name: &str) -> bool {
        let mut table = self.0.borrow_mut();
        let Some(list) = table.entries.get_mut(&(stage, phase)) else {
            return false;
        };
        let before = list.len();
        list.retain(|(n, _)| n != name);
        before != list.len()
    }

    pub fn remove_pre(&self, phase: Phase, name: &str) -> bool {
        self.remove(HookStage::Pre, phase, name)
    }

    pub fn remove_post(&self, phase: Phase, name: &str) -> bool {
        self.remove(HookStage::Post, phase, name)
    }

    pub fn contains(&self, stage: HookStage, phase: Phase, name: &str) -> bool {
        self.0
            .borrow()
            .entries
            .get(&(stage, phase))
            .is_some_and(|list| list.iter().any(|(n, _)| n == name))
    }

    pub fn is_terminated(&self) -> bool {
        self.0.borrow().terminated
    }

    /// Runs every hook for `(stage, phase)` in attach order.
    ///
    /// The list is snapshotted first so hooks can add or remove hooks
    /// (including themselves) without invalidating the iteration.
    pub(crate) fn run(&self, stage: HookStage, phase: Phase) -> anyhow::Result<()> {
        let snapshot: Vec<(String, SharedHook)> = match self.0.borrow().entries.get(&(stage, phase)) {
            Some(list) => list.clone(),
            None => return Ok(()),
        };

        for (name, hook) in snapshot {
            let status = hook.borrow_mut().call()?;
            if status == HookStatus::Finished {
                log::debug!("{stage:?} hook '{name}' on {phase} finished");
                self.remove(stage, phase, &name);
            }
        }
        Ok(())
    }

    /// Notifies and drops every attached hook. Later additions are notified
    /// immediately instead of being stored.
    pub(crate) fn terminate(&self) {
        let drained: Vec<SharedHook> = {
            let mut table = self.0.borrow_mut();
            table.terminated = true;
            table
                .entries
                .drain()
                .flat_map(|(_, list)| list.into_iter().map(|(_, h)| h))
                .collect()
        };

        for hook in drained {
            hook.borrow_mut().sketch_terminated();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Counting {
        calls: Rc<Cell<u32>>,
        terminated: Rc<Cell<bool>>,
        finish_after: u32,
    }

    impl Hook for Counting {
        fn call(&mut self) -> anyhow::Result<HookStatus> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() >= self.finish_after {
                Ok(HookStatus::Finished)
            } else {
                Ok(HookStatus::Keep)
            }
        }

        fn sketch_terminated(&mut self) {
            self.terminated.set(true);
        }
    }

    fn counting(finish_after: u32) -> (Counting, Rc<Cell<u32>>, Rc<Cell<bool>>) {
        let calls = Rc::new(Cell::new(0));
        let terminated = Rc::new(Cell::new(false));
        let hook = Counting {
            calls: calls.clone(),
            terminated: terminated.clone(),
            finish_after,
        };
        (hook, calls, terminated)
    }

    #[test]
    fn finished_hooks_remove_themselves() {
        let hooks = Hooks::new();
        let (hook, calls, _) = counting(2);
        hooks.add_post(Phase::Draw, "grab", hook);

        hooks.run(HookStage::Post, Phase::Draw).unwrap();
        assert!(hooks.contains(HookStage::Post, Phase::Draw, "grab"));
        hooks.run(HookStage::Post, Phase::Draw).unwrap();
        assert!(!hooks.contains(HookStage::Post, Phase::Draw, "grab"));
        hooks.run(HookStage::Post, Phase::Draw).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn same_name_replaces_in_place() {
        let hooks = Hooks::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (name, tag) in [("a", "a1"), ("b", "b1"), ("a", "a2")] {
            let order = order.clone();
            hooks.add_pre(Phase::Draw, name, move || -> anyhow::Result<HookStatus> {
                order.borrow_mut().push(tag);
                Ok(HookStatus::Keep)
            });
        }

        hooks.run(HookStage::Pre, Phase::Draw).unwrap();
        assert_eq!(*order.borrow(), vec!["a2", "b1"]);
    }

    #[test]
    fn terminate_notifies_and_rejects_late_hooks() {
        let hooks = Hooks::new();
        let (early, _, early_terminated) = counting(10);
        hooks.add_pre(Phase::Setup, "early", early);

        hooks.terminate();
        assert!(early_terminated.get());
        assert!(!hooks.contains(HookStage::Pre, Phase::Setup, "early"));

        let (late, late_calls, late_terminated) = counting(10);
        hooks.add_post(Phase::Draw, "late", late);
        assert!(late_terminated.get());
        assert!(!hooks.contains(HookStage::Post, Phase::Draw, "late"));
        assert_eq!(late_calls.get(), 0);
    }

    #[test]
    fn remove_reports_presence() {
        let hooks = Hooks::new();
        hooks.add_post(Phase::Draw, "x", || -> anyhow::Result<HookStatus> { Ok(HookStatus::Keep) });
        assert!(hooks.remove_post(Phase::Draw, "x"));
        assert!(!hooks.remove_post(Phase::Draw, "x"));
        assert!(!hooks.remove_pre(Phase::Setup, "never"));
    }
}
