//! Tunables for star generation and staged pause transitions.

use serde::{Deserialize, Serialize};

use crate::Viewport;

/// Parameters for a starfield regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    /// Clear buffer around the focal element, in surface units.
    pub margin: f32,
    /// Surface area covered by one star when scaling the count.
    pub area_per_star: f32,
    /// Lower bound on the target star count.
    pub min_stars: usize,
    /// Upper bound on the target star count.
    pub max_stars: usize,
    /// Placement attempts allowed per target star.
    pub attempt_factor: usize,
    /// Surface units covered by one terminal cell horizontally.
    pub cell_width: f32,
    /// Surface units covered by one terminal cell vertically.
    pub cell_height: f32,
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            margin: 12.0,
            area_per_star: 5000.0,
            min_stars: 200,
            max_stars: 600,
            attempt_factor: 12,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl StarfieldSettings {
    /// Number of stars to aim for on the given viewport.
    ///
    /// Scales with area and is clamped to `[min_stars, max_stars]`. The
    /// upper bound wins if the two are misconfigured.
    pub fn target_count(&self, viewport: Viewport) -> usize {
        let scaled = if self.area_per_star > 0.0 {
            (viewport.area() / self.area_per_star).floor() as usize
        } else {
            self.max_stars
        };
        scaled.max(self.min_stars).min(self.max_stars)
    }

    /// Placement attempts allowed for `target` stars.
    pub fn attempt_budget(&self, target: usize) -> usize {
        target.saturating_mul(self.attempt_factor)
    }

    /// Convert a terminal size in cells to a viewport.
    pub fn viewport_for_cells(&self, columns: u16, rows: u16) -> Viewport {
        Viewport::new(
            columns as f32 * self.cell_width,
            rows as f32 * self.cell_height,
        )
    }
}

/// Delays for the staged pause/resume transitions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionTimings {
    /// Cross-fade before a pause is committed.
    pub pause_fade_ms: u64,
    /// Delay after the pause commit before animation is switched off.
    pub deep_pause_delay_ms: u64,
    /// Cross-fade before a resume is committed.
    pub resume_fade_ms: u64,
    /// Quiet period before a resize triggers regeneration.
    pub resize_debounce_ms: u64,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            pause_fade_ms: 180,
            deep_pause_delay_ms: 260,
            resume_fade_ms: 180,
            resize_debounce_ms: 150,
        }
    }
}
