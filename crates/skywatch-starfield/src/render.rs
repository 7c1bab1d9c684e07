//! Terminal rendering of the star set.

use ratatui::{buffer::Buffer, layout::Rect as Area, style::Style, widgets::Widget};

use crate::chars::star_glyph;
use crate::color::star_color;
use crate::phase::Phase;
use crate::star::Star;

/// Draws stars into the cells they fall on.
///
/// Star positions are in surface units and are mapped to cells using the
/// configured cell size. Stars outside the drawing area are skipped.
#[derive(Debug, Clone)]
pub struct StarfieldWidget<'a> {
    stars: &'a [Star],
    phase: Phase,
    elapsed_ms: u64,
    cell_width: f32,
    cell_height: f32,
}

impl<'a> StarfieldWidget<'a> {
    pub fn new(
        stars: &'a [Star],
        phase: Phase,
        elapsed_ms: u64,
        cell_width: f32,
        cell_height: f32,
    ) -> Self {
        Self {
            stars,
            phase,
            elapsed_ms,
            cell_width: cell_width.max(f32::EPSILON),
            cell_height: cell_height.max(f32::EPSILON),
        }
    }

    fn brightness(&self, star: &Star) -> f32 {
        let base = if self.phase.is_animated() {
            star.brightness(self.elapsed_ms)
        } else {
            star.opacity
        };
        base * self.phase.dim_factor()
    }
}

impl Widget for StarfieldWidget<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        for star in self.stars {
            let col = (star.x / self.cell_width) as u16;
            let row = (star.y / self.cell_height) as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            let style = Style::new().fg(star_color(self.brightness(star)));
            if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                cell.set_char(star_glyph(star.size)).set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn star(x: f32, y: f32) -> Star {
        Star {
            x,
            y,
            size: 1.0,
            opacity: 0.8,
            twinkle_duration_s: 4.0,
            twinkle_delay_s: 0.0,
        }
    }

    #[test]
    fn test_stars_land_in_their_cells() {
        let stars = [star(20.0, 40.0), star(0.0, 0.0), star(900.0, 10.0)];
        let area = Area::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        StarfieldWidget::new(&stars, Phase::Running, 0, 8.0, 16.0).render(area, &mut buf);

        assert_eq!(buf[(2, 2)].symbol(), "·");
        assert_eq!(buf[(0, 0)].symbol(), "·");
        // Off-surface star is skipped rather than clamped
        assert_eq!(buf[(9, 0)].symbol(), " ");
    }

    #[test]
    fn test_deep_pause_freezes_twinkle() {
        let stars = [star(0.0, 0.0)];
        let area = Area::new(0, 0, 1, 1);
        let frozen = |elapsed| {
            let mut buf = Buffer::empty(area);
            StarfieldWidget::new(&stars, Phase::PausedDeep, elapsed, 8.0, 16.0)
                .render(area, &mut buf);
            buf[(0, 0)].fg
        };
        assert_eq!(frozen(0), frozen(1234));
    }

    #[test]
    fn test_paused_star_is_dimmer_than_running() {
        let stars = [star(0.0, 0.0)];
        let area = Area::new(0, 0, 1, 1);
        let fg = |phase| {
            let mut buf = Buffer::empty(area);
            StarfieldWidget::new(&stars, phase, 0, 8.0, 16.0).render(area, &mut buf);
            buf[(0, 0)].fg
        };
        let running = fg(Phase::Running);
        let paused = fg(Phase::Paused);

        let peak = stars[0].brightness(0);
        assert_eq!(running, star_color(peak));
        assert_eq!(paused, star_color(peak * 0.45));

        let sum = |color| match color {
            Color::Rgb(r, g, b) => u16::from(r) + u16::from(g) + u16::from(b),
            other => panic!("expected rgb, got {other:?}"),
        };
        assert!(sum(running) > sum(paused));
    }
}
