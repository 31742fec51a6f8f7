use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Sparkline};

use crate::stats::history::RollingSeries;
use crate::ui::theme::Theme;

/// Rolling CPU and memory history, one sparkline each. The series hold at
/// most 60 samples, so at a 2 s poll period each chart spans two minutes.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    cpu_series: &RollingSeries,
    mem_series: &RollingSeries,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_series(frame, chunks[0], "CPU %", cpu_series, theme.cpu_chart, theme);
    render_series(frame, chunks[1], "Mem %", mem_series, theme.mem_chart, theme);
}

fn render_series(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    series: &RollingSeries,
    color: ratatui::style::Color,
    theme: &Theme,
) {
    let latest = series
        .latest()
        .map(|v| format!(" {label} {v:.1} "))
        .unwrap_or_else(|| format!(" {label} "));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            latest,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let data: Vec<u64> = series.values().map(|v| v.clamp(0.0, 100.0) as u64).collect();
    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .max(100)
        .style(Style::default().fg(color));

    frame.render_widget(sparkline, area);
}
