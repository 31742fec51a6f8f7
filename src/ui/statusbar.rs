use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::InputMode;
use crate::ui::theme::Theme;

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    search_text: &str,
    pending_kill: Option<&(u32, String)>,
    status_message: Option<&(String, std::time::Instant)>,
    auto_refresh: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // Status message takes priority
    if let Some((msg, _)) = status_message {
        let color = if msg.starts_with("Killed") || msg.starts_with("Auto-refresh") {
            theme.status_ok
        } else {
            theme.status_err
        };
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let line = match input_mode {
        InputMode::ConfirmKill => {
            let prompt = match pending_kill {
                Some((pid, name)) if !name.is_empty() => {
                    format!(" Kill process {pid} ({name})?")
                }
                Some((pid, _)) => format!(" Kill process {pid}?"),
                None => " Kill process?".to_string(),
            };
            let mut spans = vec![Span::styled(
                prompt,
                Style::default()
                    .fg(theme.status_err)
                    .add_modifier(Modifier::BOLD),
            )];
            spans.extend(pill_spans("y/Enter", "Confirm", theme));
            spans.extend(pill_spans("Esc", "Cancel", theme));
            Line::from(spans)
        }
        InputMode::Search => {
            let mut spans = vec![
                Span::styled(
                    " / ",
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {search_text}"),
                    Style::default().fg(theme.pill_desc_fg),
                ),
                Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
            ];
            spans.extend(pill_spans("Esc", "Cancel", theme));
            spans.extend(pill_spans("Enter", "Apply", theme));
            Line::from(spans)
        }
        InputMode::Normal if !search_text.is_empty() => {
            let mut spans = vec![
                Span::styled(
                    " Search: ",
                    Style::default()
                        .fg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(search_text, Style::default().fg(theme.pill_desc_fg)),
            ];
            spans.extend(pill_spans("Esc", "Clear", theme));
            spans.extend(pill_spans("/", "Edit", theme));
            Line::from(spans)
        }
        _ => {
            let auto_label = if auto_refresh { "Auto ✓" } else { "Auto ✗" };
            let mut spans = Vec::new();
            spans.extend(pill_spans("q", "Quit", theme));
            spans.extend(pill_spans("/", "Search", theme));
            spans.extend(pill_spans("f", "Filter", theme));
            spans.extend(pill_spans("s", "Sort", theme));
            spans.extend(pill_spans("k", "Kill", theme));
            spans.extend(pill_spans("r", "Refresh", theme));
            spans.extend(pill_spans("a", auto_label, theme));
            spans.extend(pill_spans("d", "Detail", theme));
            spans.extend(pill_spans("?", "Help", theme));
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
