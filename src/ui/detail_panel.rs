use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::{format_create_time, format_percent};
use crate::stats::snapshot::ProcessSnapshot;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, process: &ProcessSnapshot, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Process Detail ",
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ));

    let name_display = if process.name.is_empty() {
        "(unnamed)".to_string()
    } else {
        process.name.clone()
    };

    let lines = vec![
        detail_line("PID", process.pid.to_string(), theme),
        detail_line("Name", name_display, theme),
        detail_line("User", process.username.clone(), theme),
        detail_line("CPU", format!("{}%", format_percent(process.cpu_percent)), theme),
        detail_line(
            "Memory",
            format!("{}%", format_percent(process.memory_percent)),
            theme,
        ),
        detail_line("Status", process.status.label().to_string(), theme),
        detail_line("Started", format_create_time(process.create_time), theme),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn detail_line(label: &str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label:<9}"),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme.text_primary)),
    ])
}
