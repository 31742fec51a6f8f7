use chrono::{Local, TimeZone};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Formats a process start time (epoch seconds) as local wall-clock time.
/// Missing or zero timestamps render as "--". Values that look like epoch
/// milliseconds (> 1e12) are scaled down before conversion.
pub fn format_create_time(epoch_seconds: Option<f64>) -> String {
    let raw = match epoch_seconds {
        Some(t) if t > 0.0 => t,
        _ => return "--".to_string(),
    };
    let secs = if raw > 1e12 { raw / 1000.0 } else { raw };
    match Local.timestamp_opt(secs as i64, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        _ => "--".to_string(),
    }
}
