//! Geometry queries against the host display.

use std::cell::Cell;
use std::rc::Rc;

use skywatch_core::{Rect, Viewport};

/// Read-only geometry the starfield needs at regeneration time.
pub trait Surface {
    /// Size of the rendering surface, or `None` if there is nothing to draw on.
    fn viewport(&self) -> Option<Viewport>;
    /// On-screen bounds of the focal element, if one is shown.
    fn focal_bounds(&self) -> Option<Rect>;
}

/// Geometry captured from the host at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SurfaceSnapshot {
    viewport: Option<Viewport>,
    focal: Option<Rect>,
}

/// Cloneable handle the host updates as its layout changes.
#[derive(Debug, Clone, Default)]
pub struct SharedSurface {
    snapshot: Rc<Cell<SurfaceSnapshot>>,
}

impl SharedSurface {
    /// A surface with no viewport and no focal element yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface of the given size with no focal element.
    pub fn with_viewport(viewport: Viewport) -> Self {
        let surface = Self::new();
        surface.set_viewport(viewport);
        surface
    }

    /// Record the current viewport. Returns whether it changed.
    pub fn set_viewport(&self, viewport: Viewport) -> bool {
        let mut snapshot = self.snapshot.get();
        let changed = snapshot.viewport != Some(viewport);
        snapshot.viewport = Some(viewport);
        self.snapshot.set(snapshot);
        changed
    }

    /// Record the focal element bounds (or its absence).
    pub fn set_focal(&self, focal: Option<Rect>) {
        let mut snapshot = self.snapshot.get();
        snapshot.focal = focal;
        self.snapshot.set(snapshot);
    }
}

impl Surface for SharedSurface {
    fn viewport(&self) -> Option<Viewport> {
        self.snapshot.get().viewport
    }

    fn focal_bounds(&self) -> Option<Rect> {
        self.snapshot.get().focal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_viewport_reports_changes() {
        let surface = SharedSurface::new();
        assert!(surface.viewport().is_none());
        assert!(surface.set_viewport(Viewport::new(640.0, 384.0)));
        assert!(!surface.set_viewport(Viewport::new(640.0, 384.0)));
        assert!(surface.set_viewport(Viewport::new(800.0, 384.0)));
    }

    #[test]
    fn test_clones_observe_focal_updates() {
        let surface = SharedSurface::with_viewport(Viewport::new(100.0, 100.0));
        let host = surface.clone();
        host.set_focal(Some(Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert_eq!(
            surface.focal_bounds(),
            Some(Rect::new(10.0, 10.0, 20.0, 20.0))
        );
        host.set_focal(None);
        assert!(surface.focal_bounds().is_none());
    }
}
