use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::{Line, Span},
};
use skywatch_config::Config;
use skywatch_starfield::{Clock, SharedSurface, StarfieldScheduler, SystemClock};

mod backend;
mod card;
mod logging;
mod scan;

use backend::{BackendMonitor, BackendStatus};
use card::CardView;
use scan::{Scan, ScanEvent, Source};

/// Upper bound on how long to wait for input between frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

type Starfield = StarfieldScheduler<SharedSurface, SystemClock, StdRng>;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let _log_guard = logging::init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        Config::default()
    });

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    clock: SystemClock,
    /// Geometry shared with the starfield, refreshed every frame.
    surface: SharedSurface,
    starfield: Starfield,
    scan: Scan,
    /// Source selected for the next scan.
    source: Source,
    rng: StdRng,
    backend: Option<BackendMonitor>,
    /// Whether the first frame has been laid out.
    loaded: bool,
    /// Regenerate once the next layout has been applied to the surface.
    regenerate_after_layout: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let clock = SystemClock::new();
        let surface = SharedSurface::new();
        let star_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let starfield = StarfieldScheduler::new(
            surface.clone(),
            clock,
            star_rng,
            config.starfield,
            config.timings,
        );
        let backend = config.backend.enabled.then(|| {
            let monitor = BackendMonitor::new(config.backend.clone());
            monitor.start();
            monitor
        });

        Self {
            running: false,
            scan: Scan::new(config.scan),
            config,
            clock,
            surface,
            starfield,
            source: Source::default(),
            rng: StdRng::from_os_rng(),
            backend,
            loaded: false,
            regenerate_after_layout: false,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        tracing::info!("skywatch started");
        while self.running {
            self.starfield.tick();
            self.tick_scan();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        tracing::info!("skywatch stopped");
        Ok(())
    }

    fn tick_scan(&mut self) {
        match self.scan.tick(self.clock.now_ms(), &mut self.rng) {
            Some(ScanEvent::Completed) => self.starfield.resume(),
            // The card grows to show the report, so clear the stars from behind it.
            Some(ScanEvent::Revealed) => self.regenerate_after_layout = true,
            None => {}
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let settings = *self.starfield.settings();

        let viewport = settings.viewport_for_cells(area.width, area.height);
        let resized = self.surface.set_viewport(viewport);

        let card_area = card::card_area(area, self.scan.report().is_some());
        self.surface
            .set_focal(Some(card::focal_bounds(card_area, &settings)));

        if !self.loaded {
            self.loaded = true;
            self.starfield.regenerate();
        } else if resized {
            self.starfield.request_resize();
        }
        if std::mem::take(&mut self.regenerate_after_layout) {
            self.starfield.regenerate();
        }

        frame.render_widget(self.starfield.widget(), area);

        let color = self.config.color_theme.color();
        let view = CardView {
            color,
            source: self.source,
            scan: &self.scan,
        };
        card::render(frame, card_area, &view);

        let [_, status] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(self.status_line(color), status);
    }

    fn status_line(&self, color: Color) -> Line<'static> {
        let backend = self
            .backend
            .as_ref()
            .map(|b| b.status())
            .unwrap_or(BackendStatus::Unknown);

        let mut spans = vec![
            Span::raw(format!(
                "★ {}/{} ",
                self.starfield.stars().len(),
                self.starfield.target()
            ))
            .dark_gray(),
            Span::raw(self.starfield.phase().label()).fg(color),
            "  ".into(),
        ];
        if self.backend.is_some() {
            spans.push(Span::raw(format!("backend: {}  ", backend.label())).dark_gray());
        }
        spans.extend([
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "p/r".bold().fg(color),
            " pause/resume  ".dark_gray(),
            "g".bold().fg(color),
            " regenerate  ".dark_gray(),
            "c".bold().fg(color),
            " color".dark_gray(),
        ]);
        Line::from(spans).centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so twinkling and staged transitions advance.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = poll_timeout(self.clock.now_ms(), self.starfield.next_deadline_ms());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Picked up by the viewport comparison on the next draw.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.start_scan(),
            (_, KeyCode::Tab) => self.source = self.source.next(),
            (_, KeyCode::Char('x')) => self.dismiss_report(),
            (_, KeyCode::Char('p')) => self.starfield.pause(),
            (_, KeyCode::Char('r')) => self.starfield.resume(),
            (_, KeyCode::Char('g')) => self.starfield.regenerate(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Start a simulated scan, pausing the starfield while it runs.
    fn start_scan(&mut self) {
        if self.scan.start(self.source, self.clock.now_ms()) {
            self.starfield.pause();
        }
    }

    /// Close the results panel and let the stars fill back in.
    fn dismiss_report(&mut self) {
        if self.scan.dismiss() {
            self.regenerate_after_layout = true;
        }
    }

    /// Cycle through available color themes and remember the choice.
    fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        if let Err(e) = self.config.save() {
            tracing::warn!(error = %e, "failed to save config");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Wait no longer than a frame, and wake early for a staged deadline.
fn poll_timeout(now_ms: u64, deadline_ms: Option<u64>) -> Duration {
    match deadline_ms {
        Some(due) => FRAME_INTERVAL.min(Duration::from_millis(due.saturating_sub(now_ms))),
        None => FRAME_INTERVAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use skywatch_core::ColorTheme;
    use skywatch_starfield::Surface;

    fn test_app() -> App {
        let config = Config {
            seed: Some(1),
            ..Default::default()
        };
        App::new(config)
    }

    #[test]
    fn test_first_frame_generates_stars_around_card() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        assert_eq!(app.starfield.generation(), 1);
        let focal = app.surface.focal_bounds().unwrap();
        let exclusion = focal.expand(app.config.starfield.margin);
        assert!(
            app.starfield
                .stars()
                .iter()
                .all(|s| !exclusion.contains(s.x, s.y))
        );
    }

    #[test]
    fn test_scan_pauses_starfield() {
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        app.start_scan();
        assert!(app.scan.is_busy());
        assert!(app.starfield.is_paused());

        // A second start while busy must not stack another pause.
        let phase = app.starfield.phase();
        app.start_scan();
        assert_eq!(app.starfield.phase(), phase);
    }

    #[test]
    fn test_dismiss_without_report_does_nothing() {
        let mut app = test_app();
        app.dismiss_report();
        assert!(!app.regenerate_after_layout);
    }

    #[test]
    fn test_poll_timeout_wakes_for_deadline() {
        assert_eq!(poll_timeout(100, None), FRAME_INTERVAL);
        assert_eq!(poll_timeout(100, Some(120)), Duration::from_millis(20));
        assert_eq!(poll_timeout(100, Some(u64::MAX)), FRAME_INTERVAL);
        assert_eq!(poll_timeout(300, Some(280)), Duration::ZERO);
    }

    #[test]
    fn test_color_theme_default() {
        let app = test_app();
        assert_eq!(app.config.color_theme, ColorTheme::Cyan);
    }
}
