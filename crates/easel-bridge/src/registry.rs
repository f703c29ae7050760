use std::collections::HashSet;

use crate::error::{BridgeError, BridgeResult};
use crate::phase::Phase;
use crate::provider::HandlerProvider;

/// Phases that have a user handler for this session.
///
/// Built once from the provider before the first lifecycle call and never
/// changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerSet {
    phases: HashSet<Phase>,
}

impl HandlerSet {
    /// Queries `provider` for its phase names.
    ///
    /// Duplicates collapse. Names that are not lifecycle phases are logged
    /// and skipped. A provider that cannot be queried is fatal.
    pub fn build(provider: &dyn HandlerProvider) -> BridgeResult<Self> {
        let names = provider
            .phase_names()
            .map_err(|e| BridgeError::boundary(format!("{e:#}")))?;

        let set = Self::from_names(names);
        log::debug!("handler set: {set}");
        Ok(set)
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phases = HashSet::new();
        for name in names {
            let name = name.as_ref();
            match Phase::from_name(name) {
                Some(phase) => {
                    phases.insert(phase);
                }
                None => log::warn!("'{name}' is not a lifecycle phase; ignored"),
            }
        }
        Self { phases }
    }

    #[inline]
    pub fn contains(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phases in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Phase> + '_ {
        Phase::ALL.into_iter().filter(|p| self.phases.contains(p))
    }
}

impl std::fmt::Display for HandlerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, phase) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(phase.name())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseEvent;

    struct Names(Vec<&'static str>);

    impl HandlerProvider for Names {
        fn phase_names(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
        fn invoke(&mut self, _: Phase, _: Option<&MouseEvent>) -> bool {
            true
        }
        fn shutdown(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Unreachable;

    impl HandlerProvider for Unreachable {
        fn phase_names(&self) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("runtime not attached")
        }
        fn invoke(&mut self, _: Phase, _: Option<&MouseEvent>) -> bool {
            unreachable!()
        }
        fn shutdown(&mut self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn duplicates_collapse() {
        let set = HandlerSet::build(&Names(vec!["draw", "setup", "draw"])).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(Phase::Draw));
        assert!(set.contains(Phase::Setup));
        assert!(!set.contains(Phase::Settings));
    }

    #[test]
    fn unknown_names_are_skipped() {
        let set = HandlerSet::build(&Names(vec!["draw", "helper_fn", "exit_actual"])).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Phase::Draw, Phase::Exiting]);
    }

    #[test]
    fn unreachable_provider_is_fatal() {
        let err = HandlerSet::build(&Unreachable).unwrap_err();
        assert!(matches!(err, BridgeError::BoundaryUnavailable(ref m) if m.contains("not attached")));
    }

    #[test]
    fn display_lists_in_lifecycle_order() {
        let set = HandlerSet::from_names(["key_typed", "setup", "draw"]);
        assert_eq!(set.to_string(), "{setup, draw, key_typed}");
    }
}
