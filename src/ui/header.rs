use chrono::{DateTime, Local};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::app::ConnectionStatus;
use crate::stats::snapshot::SystemSnapshot;
use crate::stats::summary::{gauge_ratio, memory_detail};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    connection: ConnectionStatus,
    last_updated: Option<DateTime<Local>>,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_branding(frame, chunks[0], snapshot, connection, last_updated, theme);
    render_cpu_gauge(frame, chunks[1], snapshot, theme);
    render_mem_gauge(frame, chunks[2], snapshot, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    connection: ConnectionStatus,
    last_updated: Option<DateTime<Local>>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let conn_color = match connection {
        ConnectionStatus::Connected => theme.status_ok,
        ConnectionStatus::Disconnected => theme.status_err,
        ConnectionStatus::Connecting => theme.status_warn,
    };

    let mut spans = vec![
        Span::styled(
            " procdash ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            connection.label(),
            Style::default().fg(conn_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Procs: {}", snapshot.processes.len()),
            Style::default().fg(theme.text_secondary),
        ),
    ];

    if let Some(updated) = last_updated {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("Updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(theme.text_secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_cpu_gauge(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    // Gauge width is clamped; the label keeps the raw server value.
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(gauge_ratio(snapshot.cpu_usage))
        .label(format!("{:.1}%", snapshot.cpu_usage));

    frame.render_widget(gauge, area);
}

fn render_mem_gauge(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Memory ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let detail = memory_detail(snapshot.memory_used, snapshot.memory_total);
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(gauge_ratio(snapshot.memory_usage))
        .label(format!("{:.1}%  {detail}", snapshot.memory_usage));

    frame.render_widget(gauge, area);
}
