//! Core types shared across the skywatch crates.
//!
//! Geometry for the starfield surface, the tunables that shape star
//! generation and staged transitions, and the card color theme.

mod geometry;
mod settings;
mod theme;

pub use geometry::{Rect, Viewport};
pub use settings::{StarfieldSettings, TransitionTimings};
pub use theme::ColorTheme;
