//! Star placement by rejection sampling.

use rand::Rng;
use skywatch_core::{Rect, Viewport};

/// A single decorative star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Horizontal position in surface units.
    pub x: f32,
    /// Vertical position in surface units.
    pub y: f32,
    /// Diameter, 1.0 to 3.5.
    pub size: f32,
    /// Peak opacity, 0.6 to 1.0.
    pub opacity: f32,
    /// Length of one twinkle cycle in seconds.
    pub twinkle_duration_s: f32,
    /// Phase offset in seconds, always zero or negative.
    pub twinkle_delay_s: f32,
}

impl Star {
    /// Draw cosmetic attributes for a star at `(x, y)`.
    fn sample<R: Rng + ?Sized>(rng: &mut R, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            size: 1.0 + rng.random::<f32>() * 2.5,
            opacity: 0.6 + rng.random::<f32>() * 0.4,
            twinkle_duration_s: 2.0 + rng.random::<f32>() * 4.0,
            twinkle_delay_s: -rng.random::<f32>() * 6.0,
        }
    }

    /// Brightness at `elapsed_ms` into the animation, in `0.0..=opacity`.
    pub fn brightness(&self, elapsed_ms: u64) -> f32 {
        let t = elapsed_ms as f32 / 1000.0 - self.twinkle_delay_s;
        let cycle = (t / self.twinkle_duration_s.max(0.001)).fract();
        let wave = (cycle * 2.0 * std::f32::consts::PI).cos() * 0.5 + 0.5;
        self.opacity * (0.35 + 0.65 * wave)
    }
}

/// Focal bounds grown by `margin` and clamped to the viewport.
///
/// Falls back to the viewport's center third when there is no focal element.
pub fn exclusion_rect(viewport: Viewport, focal: Option<Rect>, margin: f32) -> Rect {
    focal
        .unwrap_or_else(|| viewport.center_third())
        .expand(margin)
        .clamp_to(viewport)
}

/// Outcome of one placement pass.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub stars: Vec<Star>,
    /// Samples drawn, including rejected ones.
    pub attempts: usize,
}

/// Scatter up to `target` stars over the viewport, avoiding `exclusion`.
///
/// Gives up after `max_attempts` samples, so the result may hold fewer
/// stars than requested.
pub fn place_stars<R: Rng + ?Sized>(
    rng: &mut R,
    viewport: Viewport,
    exclusion: Rect,
    target: usize,
    max_attempts: usize,
) -> Placement {
    let mut stars = Vec::with_capacity(target);
    let mut attempts = 0;

    while stars.len() < target && attempts < max_attempts {
        attempts += 1;
        let x = rng.random::<f32>() * viewport.width;
        let y = rng.random::<f32>() * viewport.height;
        if exclusion.contains(x, y) {
            continue;
        }
        stars.push(Star::sample(rng, x, y));
    }

    Placement { stars, attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_exclusion_defaults_to_center_third() {
        let viewport = Viewport::new(1920.0, 1080.0);
        let rect = exclusion_rect(viewport, None, 12.0);
        assert_eq!(rect, Rect::new(628.0, 348.0, 1292.0, 732.0));
    }

    #[test]
    fn test_exclusion_is_clamped_to_viewport() {
        let viewport = Viewport::new(200.0, 100.0);
        let focal = Rect::new(5.0, 5.0, 195.0, 95.0);
        let rect = exclusion_rect(viewport, Some(focal), 12.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_placed_stars_avoid_exclusion() {
        let mut rng = StdRng::seed_from_u64(7);
        let viewport = Viewport::new(1920.0, 1080.0);
        let exclusion = exclusion_rect(viewport, None, 12.0);
        let placement = place_stars(&mut rng, viewport, exclusion, 414, 414 * 12);

        assert_eq!(placement.stars.len(), 414);
        for star in &placement.stars {
            assert!(!exclusion.contains(star.x, star.y));
            assert!(star.x >= 0.0 && star.x < viewport.width);
            assert!(star.y >= 0.0 && star.y < viewport.height);
            assert!((1.0..3.5).contains(&star.size));
            assert!((0.6..1.0).contains(&star.opacity));
            assert!((2.0..6.0).contains(&star.twinkle_duration_s));
            assert!(star.twinkle_delay_s <= 0.0 && star.twinkle_delay_s > -6.0);
        }
    }

    #[test]
    fn test_budget_exhaustion_yields_fewer_stars() {
        let mut rng = StdRng::seed_from_u64(1);
        let viewport = Viewport::new(100.0, 100.0);
        // Covers all but a thin strip on the right.
        let exclusion = Rect::new(0.0, 0.0, 99.0, 100.0);
        let placement = place_stars(&mut rng, viewport, exclusion, 200, 240);

        assert_eq!(placement.attempts, 240);
        assert!(placement.stars.len() < 200);
        assert!(placement.stars.iter().all(|s| s.x > 99.0));
    }

    #[test]
    fn test_fully_excluded_viewport_places_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let viewport = Viewport::new(50.0, 50.0);
        let exclusion = Rect::new(0.0, 0.0, 50.0, 50.0);
        let placement = place_stars(&mut rng, viewport, exclusion, 200, 2400);
        assert!(placement.stars.is_empty());
        assert_eq!(placement.attempts, 2400);
    }

    #[test]
    fn test_brightness_stays_within_opacity() {
        let star = Star {
            x: 0.0,
            y: 0.0,
            size: 2.0,
            opacity: 0.8,
            twinkle_duration_s: 3.0,
            twinkle_delay_s: -1.5,
        };
        for ms in (0..6000).step_by(125) {
            let b = star.brightness(ms);
            assert!(b >= 0.8 * 0.35 - 1e-4 && b <= 0.8 + 1e-4, "{ms}ms gave {b}");
        }
    }
}
