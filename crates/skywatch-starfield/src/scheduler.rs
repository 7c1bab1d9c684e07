//! Starfield regeneration and staged pause/resume scheduling.

use rand::Rng;
use skywatch_core::{Rect, StarfieldSettings, TransitionTimings};

use crate::clock::Clock;
use crate::phase::Phase;
use crate::render::StarfieldWidget;
use crate::star::{self, Star};
use crate::surface::Surface;

/// Step of a staged transition waiting on its deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StagedStep {
    CommitPause,
    CommitDeepPause,
    CommitResume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Staged {
    due_ms: u64,
    step: StagedStep,
}

/// Owns the star set and decides when it may be rebuilt.
///
/// Regeneration is deferred while the scheduler is anywhere but
/// [`Phase::Running`]; repeated requests collapse into one rebuild that runs
/// when the resume commits. Only one staged transition is held at a time, so
/// a new `pause`/`resume` replaces whatever was scheduled before it.
#[derive(Debug)]
pub struct StarfieldScheduler<S, C, R> {
    surface: S,
    clock: C,
    rng: R,
    settings: StarfieldSettings,
    timings: TransitionTimings,
    /// Current star set, replaced wholesale on every rebuild.
    stars: Vec<Star>,
    /// Target count used by the last rebuild.
    target: usize,
    /// Exclusion rectangle used by the last rebuild.
    exclusion: Option<Rect>,
    phase: Phase,
    staged: Option<Staged>,
    pending_regeneration: bool,
    resize_due_ms: Option<u64>,
    /// Number of completed rebuilds.
    generation: u64,
}

impl<S: Surface, C: Clock, R: Rng> StarfieldScheduler<S, C, R> {
    /// Create a scheduler with an empty star set in the running phase.
    pub fn new(
        surface: S,
        clock: C,
        rng: R,
        settings: StarfieldSettings,
        timings: TransitionTimings,
    ) -> Self {
        Self {
            surface,
            clock,
            rng,
            settings,
            timings,
            stars: Vec::new(),
            target: 0,
            exclusion: None,
            phase: Phase::Running,
            staged: None,
            pending_regeneration: false,
            resize_due_ms: None,
            generation: 0,
        }
    }

    /// Rebuild the star set now, or remember to do so once resumed.
    pub fn regenerate(&mut self) {
        if self.phase.defers_regeneration() {
            if !self.pending_regeneration {
                tracing::debug!(phase = ?self.phase, "starfield regeneration deferred");
            }
            self.pending_regeneration = true;
            return;
        }
        self.rebuild();
    }

    /// Begin a staged pause.
    pub fn pause(&mut self) {
        let now = self.clock.now_ms();
        match self.phase {
            Phase::Running | Phase::Resuming => {
                self.phase = Phase::Pausing;
                self.schedule(
                    now.saturating_add(self.timings.pause_fade_ms),
                    StagedStep::CommitPause,
                );
                tracing::debug!("starfield pausing");
            }
            Phase::Pausing => {
                self.schedule(
                    now.saturating_add(self.timings.pause_fade_ms),
                    StagedStep::CommitPause,
                );
            }
            Phase::Paused => {
                self.schedule(
                    now.saturating_add(self.timings.deep_pause_delay_ms),
                    StagedStep::CommitDeepPause,
                );
            }
            Phase::PausedDeep => {}
        }
    }

    /// Begin a staged resume, cancelling any pause still in flight.
    pub fn resume(&mut self) {
        let now = self.clock.now_ms();
        match self.phase {
            Phase::Running | Phase::Resuming => {}
            Phase::Pausing | Phase::Paused | Phase::PausedDeep => {
                self.phase = Phase::Resuming;
                self.schedule(
                    now.saturating_add(self.timings.resume_fade_ms),
                    StagedStep::CommitResume,
                );
                tracing::debug!("starfield resuming");
            }
        }
    }

    /// Whether regeneration is currently being deferred.
    pub fn is_paused(&self) -> bool {
        self.phase.defers_regeneration()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ask for a rebuild once the surface has stopped resizing.
    ///
    /// Each call pushes the deadline back by the debounce period.
    pub fn request_resize(&mut self) {
        self.resize_due_ms = Some(
            self.clock
                .now_ms()
                .saturating_add(self.timings.resize_debounce_ms),
        );
    }

    /// Fire every scheduled event whose deadline has passed, oldest first.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        loop {
            let staged = self.staged.filter(|s| s.due_ms <= now);
            let resize = self.resize_due_ms.filter(|due| *due <= now);
            match (staged, resize) {
                (Some(staged), Some(resize)) if resize < staged.due_ms => self.fire_resize(),
                (Some(staged), _) => self.fire_staged(staged),
                (None, Some(_)) => self.fire_resize(),
                (None, None) => break,
            }
        }
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.staged.map(|s| s.due_ms), self.resize_due_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Target count used by the last rebuild.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Exclusion rectangle used by the last rebuild.
    pub fn exclusion(&self) -> Option<Rect> {
        self.exclusion
    }

    /// Number of rebuilds performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_regeneration(&self) -> bool {
        self.pending_regeneration
    }

    pub fn settings(&self) -> &StarfieldSettings {
        &self.settings
    }

    /// Widget drawing the current star set at the clock's current time.
    pub fn widget(&self) -> StarfieldWidget<'_> {
        StarfieldWidget::new(
            &self.stars,
            self.phase,
            self.clock.now_ms(),
            self.settings.cell_width,
            self.settings.cell_height,
        )
    }

    fn schedule(&mut self, due_ms: u64, step: StagedStep) {
        self.staged = Some(Staged { due_ms, step });
    }

    fn fire_staged(&mut self, staged: Staged) {
        self.staged = None;
        match staged.step {
            StagedStep::CommitPause => {
                self.phase = Phase::Paused;
                // Chain from the deadline so a late tick lands in the same place.
                self.schedule(
                    staged.due_ms.saturating_add(self.timings.deep_pause_delay_ms),
                    StagedStep::CommitDeepPause,
                );
                tracing::debug!("starfield paused");
            }
            StagedStep::CommitDeepPause => {
                self.phase = Phase::PausedDeep;
                tracing::debug!("starfield deep pause");
            }
            StagedStep::CommitResume => {
                self.phase = Phase::Running;
                tracing::debug!(pending = self.pending_regeneration, "starfield running");
                if self.pending_regeneration {
                    self.pending_regeneration = false;
                    self.rebuild();
                }
            }
        }
    }

    fn fire_resize(&mut self) {
        self.resize_due_ms = None;
        self.regenerate();
    }

    fn rebuild(&mut self) {
        let Some(viewport) = self.surface.viewport() else {
            return;
        };
        let exclusion =
            star::exclusion_rect(viewport, self.surface.focal_bounds(), self.settings.margin);
        let target = self.settings.target_count(viewport);
        let placement = star::place_stars(
            &mut self.rng,
            viewport,
            exclusion,
            target,
            self.settings.attempt_budget(target),
        );

        if placement.stars.len() < target {
            tracing::debug!(
                placed = placement.stars.len(),
                target,
                attempts = placement.attempts,
                "attempt budget exhausted"
            );
        }

        self.stars = placement.stars;
        self.target = target;
        self.exclusion = Some(exclusion);
        self.generation += 1;
        tracing::trace!(
            generation = self.generation,
            stars = self.stars.len(),
            "starfield rebuilt"
        );
    }
}
