//! The focal card: the panel the starfield keeps clear of.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Gauge, Paragraph},
};
use skywatch_core::StarfieldSettings;

use crate::scan::{FindingKind, Scan, ScanReport, Source};

const CARD_WIDTH: u16 = 60;
const COMPACT_HEIGHT: u16 = 9;
const EXPANDED_HEIGHT: u16 = 19;

/// What the card shows this frame.
pub struct CardView<'a> {
    pub color: Color,
    pub source: Source,
    pub scan: &'a Scan,
}

/// Centered card area. The card grows while a report is shown.
pub fn card_area(area: Rect, expanded: bool) -> Rect {
    let width = CARD_WIDTH.min(area.width.saturating_sub(4));
    let height = if expanded {
        EXPANDED_HEIGHT
    } else {
        COMPACT_HEIGHT
    }
    .min(area.height.saturating_sub(2));

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Card bounds in starfield surface units.
pub fn focal_bounds(card: Rect, settings: &StarfieldSettings) -> skywatch_core::Rect {
    skywatch_core::Rect::from_origin(
        card.x as f32 * settings.cell_width,
        card.y as f32 * settings.cell_height,
        card.width as f32 * settings.cell_width,
        card.height as f32 * settings.cell_height,
    )
}

/// Draw the card over whatever is behind it.
pub fn render(frame: &mut Frame, area: Rect, view: &CardView) {
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(view.color))
        .title(Line::from(" SKYWATCH ".bold().fg(view.color)).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [subtitle, source, _, body] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    frame.render_widget(
        Line::from("Network intrusion detection".dark_gray()).centered(),
        subtitle,
    );

    let shown_source = if view.scan.is_busy() {
        view.scan.source()
    } else {
        view.source
    };
    frame.render_widget(
        Line::from(vec![
            "Source ".dark_gray(),
            Span::raw(format!("{} ", shown_source.icon())),
            shown_source.label().bold(),
        ])
        .centered(),
        source,
    );

    if view.scan.is_busy() {
        render_progress(frame, body, view);
    } else if let Some(report) = view.scan.report() {
        render_report(frame, body, report);
    } else {
        let hint = Line::from(vec![
            "s".bold().fg(view.color),
            " start scan  ".dark_gray(),
            "tab".bold().fg(view.color),
            " change source".dark_gray(),
        ])
        .centered();
        frame.render_widget(hint, body);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, view: &CardView) {
    let [bar, status] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
    let progress = view.scan.progress();

    let gauge = Gauge::default()
        .gauge_style(Style::new().fg(view.color))
        .percent(progress as u16)
        .label(format!("{progress}%"));
    frame.render_widget(gauge, bar);
    frame.render_widget(
        Line::from(view.scan.status_text().italic()).centered(),
        status,
    );
}

fn render_report(frame: &mut Frame, area: Rect, report: &ScanReport) {
    let mut lines = Vec::new();

    if report.has_threats() {
        lines.push(Line::from("⚠ Potential threats detected".bold().yellow()).centered());
    } else {
        lines.push(Line::from("✓ No threats detected".bold().green()).centered());
    }
    lines.push(
        Line::from(format!("Finished {}", report.finished_at.format("%H:%M:%S")).dark_gray())
            .centered(),
    );
    lines.push(Line::default());

    for (kind, title, clean) in [
        (FindingKind::Anomaly, "Anomalies", "✓ No anomalies detected"),
        (FindingKind::Intrusion, "Intrusions", "✓ No intrusions detected"),
    ] {
        lines.push(Line::from(title.bold()));
        let mut any = false;
        for finding in report.findings_of(kind) {
            any = true;
            lines.push(Line::from(vec![
                "  ⚠ ".yellow(),
                Span::raw(finding.text),
            ]));
        }
        if !any {
            lines.push(Line::from(format!("  {clean}").green()));
        }
    }

    lines.push(Line::default());
    lines.push(
        Line::from(format!(
            "{} devices · {} packets · {:.1}s",
            report.devices,
            group_thousands(report.packets),
            report.duration_s
        ))
        .centered(),
    );
    lines.push(Line::from("x close".dark_gray()).centered());

    frame.render_widget(Paragraph::new(lines), area);
}

/// Format with comma thousands separators.
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
