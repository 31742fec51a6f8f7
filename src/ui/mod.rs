pub mod charts;
pub mod detail_panel;
pub mod filter_bar;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod summary_panel;
pub mod table;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::stats::pipeline;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        app.connection,
        app.last_updated,
        &app.theme,
    );
    charts::render(frame, chunks[1], &app.cpu_series, &app.mem_series, &app.theme);

    let content_area = chunks[2];
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(content_area);

    // Field-level borrows: the row projection reads the snapshot while the
    // table widget mutates its scroll state.
    let rows = pipeline::visible_rows(&app.snapshot.processes, &app.view);
    let total = app.snapshot.processes.len();
    let visible = rows.len();

    table::render(
        frame,
        h_chunks[0],
        &rows,
        &app.view,
        total,
        app.selected_index,
        &mut app.table_state,
        &app.theme,
    );

    let side_area = h_chunks[1];
    let selected = rows.get(app.selected_index).copied();
    if app.show_detail_panel && let Some(process) = selected {
        let v_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(9)])
            .split(side_area);
        summary_panel::render(frame, v_chunks[0], &app.summary, &app.theme);
        detail_panel::render(frame, v_chunks[1], process, &app.theme);
    } else {
        summary_panel::render(frame, side_area, &app.summary, &app.theme);
    }

    filter_bar::render(frame, chunks[3], &app.view, visible, total, &app.theme);
    statusbar::render(
        frame,
        chunks[4],
        app.input_mode,
        &app.view.search,
        app.pending_kill.as_ref(),
        app.status_message.as_ref(),
        app.auto_refresh,
        &app.theme,
    );

    // Help overlay is rendered last so it sits on top.
    if app.show_help() {
        help::render(frame, frame.area(), &app.help_entries(), &app.theme);
    }
}
