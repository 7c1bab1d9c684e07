//! Surface geometry in surface units.

/// Size of the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface area, never negative.
    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Centered box covering the middle third on both axes.
    ///
    /// Used as the focal bounds when no focal element is on screen.
    pub fn center_third(&self) -> Rect {
        Rect::new(
            self.width / 3.0,
            self.height / 3.0,
            2.0 * self.width / 3.0,
            2.0 * self.height / 3.0,
        )
    }
}

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_origin(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Whether the point lies inside the rectangle, edges included.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }

    /// Clamp the edges to the viewport.
    pub fn clamp_to(&self, viewport: Viewport) -> Self {
        Self::new(
            self.left.max(0.0),
            self.top.max(0.0),
            self.right.min(viewport.width),
            self.bottom.min(viewport.height),
        )
    }
}
