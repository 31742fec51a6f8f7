use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::format::truncate_unicode;
use crate::stats::pipeline::ViewState;
use crate::ui::theme::Theme;

/// One-line bar under the table: active filter/sort/search on the left, the
/// visible-of-total row count right-aligned.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &ViewState,
    visible: usize,
    total: usize,
    theme: &Theme,
) {
    let style = Style::default()
        .bg(theme.statusbar_bg)
        .fg(theme.text_primary);
    let line = format_bar_line(view, visible, total, area.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(line, style))).style(style),
        area,
    );
}

fn format_bar_line(view: &ViewState, visible: usize, total: usize, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let mut left = format!(" Filter: {}  Sort: {}", view.filter.label(), view.sort.label());
    if !view.search.trim().is_empty() {
        left.push_str(&format!("  Search: {}", view.search.trim()));
    }

    let mut count = format!("{visible} of {total} ");
    if count.width() > width {
        count = truncate_unicode(&count, width);
        let pad = width.saturating_sub(count.width());
        return format!("{}{}", " ".repeat(pad), count);
    }

    let count_width = count.width();
    let left_capacity = width.saturating_sub(count_width + 1);
    let left = truncate_unicode(&left, left_capacity);
    let gap = width.saturating_sub(left.width() + count_width);
    format!("{left}{}{count}", " ".repeat(gap))
}
