use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState};

use crate::format::{format_create_time, format_percent};
use crate::stats::pipeline::ViewState;
use crate::stats::snapshot::ProcessSnapshot;
use crate::stats::summary::{ALERT_CPU_PERCENT, ALERT_MEM_PERCENT};
use crate::ui::theme::Theme;

/// The process table. `rows` is the post-pipeline projection; the title shows
/// the visible count next to the raw snapshot total so a narrowed view is
/// obvious at a glance.
#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[&ProcessSnapshot],
    view: &ViewState,
    total: usize,
    selected_index: usize,
    table_state: &mut TableState,
    theme: &Theme,
) {
    let title = format!(
        " Processes {}/{}  [{} / {}] ",
        rows.len(),
        total,
        view.filter.label(),
        view.sort.label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let header = Row::new(vec![
        "PID", "Name", "User", "CPU %", "Mem %", "Status", "Started",
    ])
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows.iter().map(|p| {
        let cpu_style = if p.cpu_percent > ALERT_CPU_PERCENT {
            Style::default()
                .fg(theme.alert_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_primary)
        };
        let mem_style = if p.memory_percent > ALERT_MEM_PERCENT {
            Style::default()
                .fg(theme.alert_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text_primary)
        };

        Row::new(vec![
            Cell::from(p.pid.to_string()),
            Cell::from(p.name.clone()),
            Cell::from(p.username.clone()),
            Cell::from(format_percent(p.cpu_percent)).style(cpu_style),
            Cell::from(format_percent(p.memory_percent)).style(mem_style),
            Cell::from(p.status.label().to_string()),
            Cell::from(format_create_time(p.create_time)),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let widths = [
        Constraint::Length(7),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD),
        );

    if rows.is_empty() {
        table_state.select(None);
    } else {
        table_state.select(Some(selected_index.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(table, area, table_state);
}
