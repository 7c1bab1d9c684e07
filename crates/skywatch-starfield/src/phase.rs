//! Phases of the staged pause/resume state machine.

/// Where the starfield is in its pause lifecycle.
///
/// `Pausing` and `Resuming` are short cross-fades before the terminal
/// state is committed. `PausedDeep` additionally freezes the twinkle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Running,
    Pausing,
    Paused,
    PausedDeep,
    Resuming,
}

impl Phase {
    /// Whether regeneration requests are held back in this phase.
    pub fn defers_regeneration(self) -> bool {
        self != Phase::Running
    }

    /// Whether stars keep twinkling.
    pub fn is_animated(self) -> bool {
        self != Phase::PausedDeep
    }

    /// Brightness multiplier applied while rendering.
    pub fn dim_factor(self) -> f32 {
        match self {
            Phase::Running => 1.0,
            Phase::Pausing | Phase::Resuming => 0.7,
            Phase::Paused | Phase::PausedDeep => 0.45,
        }
    }

    /// Short label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::Pausing => "pausing",
            Phase::Paused => "paused",
            Phase::PausedDeep => "paused (deep)",
            Phase::Resuming => "resuming",
        }
    }
}
