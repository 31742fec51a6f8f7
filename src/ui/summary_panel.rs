use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::stats::summary::Summary;
use crate::ui::theme::Theme;

/// Status counts plus the alert list, mirroring the summary cards of the
/// original dashboard.
pub fn render(frame: &mut Frame, area: Rect, summary: &Summary, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Summary ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let label = Style::default().fg(theme.text_secondary);
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Running  ", label),
            Span::styled(summary.running.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Sleeping ", label),
            Span::styled(summary.sleeping.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Stopped  ", label),
            Span::styled(summary.stopped.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled(" Alerts   ", label),
            Span::styled(
                summary.alerts.len().to_string(),
                Style::default()
                    .fg(if summary.alerts.is_empty() {
                        theme.status_ok
                    } else {
                        theme.alert_fg
                    })
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    if !summary.alerts.is_empty() {
        lines.push(Line::from(""));
        for alert in &summary.alerts {
            lines.push(Line::from(Span::styled(
                format!(
                    " {} (PID {}) cpu {:.1}% mem {:.1}%",
                    alert.name, alert.pid, alert.cpu_percent, alert.memory_percent
                ),
                Style::default().fg(theme.alert_fg),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
