use std::fmt;

/// One named point in the sketch lifecycle.
///
/// Names are the snake_case strings a handler provider reports. `Exiting`
/// also answers to `exit_actual`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Settings,
    Setup,
    PreDraw,
    Draw,
    PostDraw,

    MousePressed,
    MouseReleased,
    MouseClicked,
    MouseDragged,
    MouseMoved,
    MouseEntered,
    MouseExited,
    MouseWheel,

    KeyPressed,
    KeyReleased,
    KeyTyped,

    Exiting,
}

impl Phase {
    pub const ALL: [Phase; 17] = [
        Phase::Settings,
        Phase::Setup,
        Phase::PreDraw,
        Phase::Draw,
        Phase::PostDraw,
        Phase::MousePressed,
        Phase::MouseReleased,
        Phase::MouseClicked,
        Phase::MouseDragged,
        Phase::MouseMoved,
        Phase::MouseEntered,
        Phase::MouseExited,
        Phase::MouseWheel,
        Phase::KeyPressed,
        Phase::KeyReleased,
        Phase::KeyTyped,
        Phase::Exiting,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Settings => "settings",
            Phase::Setup => "setup",
            Phase::PreDraw => "pre_draw",
            Phase::Draw => "draw",
            Phase::PostDraw => "post_draw",
            Phase::MousePressed => "mouse_pressed",
            Phase::MouseReleased => "mouse_released",
            Phase::MouseClicked => "mouse_clicked",
            Phase::MouseDragged => "mouse_dragged",
            Phase::MouseMoved => "mouse_moved",
            Phase::MouseEntered => "mouse_entered",
            Phase::MouseExited => "mouse_exited",
            Phase::MouseWheel => "mouse_wheel",
            Phase::KeyPressed => "key_pressed",
            Phase::KeyReleased => "key_released",
            Phase::KeyTyped => "key_typed",
            Phase::Exiting => "exiting",
        }
    }

    pub fn from_name(name: &str) -> Option<Phase> {
        if name == "exit_actual" {
            return Some(Phase::Exiting);
        }
        Phase::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Every phase except the exit notification is skipped once degraded.
    #[inline]
    pub const fn is_per_frame(self) -> bool {
        !matches!(self, Phase::Exiting)
    }

    /// Phases the engine has its own behavior for when no handler exists.
    #[inline]
    pub const fn has_engine_default(self) -> bool {
        matches!(self, Phase::Settings | Phase::Setup | Phase::Draw)
    }

    /// Phases invoked with a [`MouseEvent`](crate::MouseEvent) argument.
    #[inline]
    pub const fn takes_event(self) -> bool {
        matches!(self, Phase::MouseWheel)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_name(phase.name()), Some(phase));
        }
    }

    #[test]
    fn exit_actual_is_an_alias() {
        assert_eq!(Phase::from_name("exit_actual"), Some(Phase::Exiting));
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(Phase::from_name("Draw"), None);
        assert_eq!(Phase::from_name("preDraw"), None);
        assert_eq!(Phase::from_name(""), None);
    }

    #[test]
    fn only_exiting_survives_degradation() {
        let survivors: Vec<_> = Phase::ALL.into_iter().filter(|p| !p.is_per_frame()).collect();
        assert_eq!(survivors, vec![Phase::Exiting]);
    }
}
