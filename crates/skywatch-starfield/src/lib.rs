//! Decorative starfield for the skywatch demo.
//!
//! [`StarfieldScheduler`] owns the star set, places stars around (never
//! behind) the focal card and holds back regeneration while the UI is busy.
//! Pausing and resuming are staged so the renderer can cross-fade, and the
//! scheduler is driven by an injected [`Clock`] so every transition can be
//! stepped deterministically.

mod chars;
mod clock;
mod color;
mod phase;
mod render;
mod scheduler;
mod star;
mod surface;

pub use clock::{Clock, ManualClock, SystemClock};
pub use color::{hsl_to_rgb, star_color};
pub use phase::Phase;
pub use render::StarfieldWidget;
pub use scheduler::StarfieldScheduler;
pub use star::{Placement, Star, exclusion_rect, place_stars};
pub use surface::{SharedSurface, Surface};
