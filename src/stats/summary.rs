use crate::stats::snapshot::{ProcessSnapshot, ProcessStatus, SystemSnapshot};

pub const ALERT_CPU_PERCENT: f64 = 80.0;
pub const ALERT_MEM_PERCENT: f64 = 80.0;

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Aggregates derived from one snapshot: status counts plus the alert set.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub total: usize,
    pub running: usize,
    pub sleeping: usize,
    pub stopped: usize,
    pub alerts: Vec<AlertEntry>,
}

#[derive(Debug, Clone)]
pub struct AlertEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

pub fn summarize(snapshot: &SystemSnapshot) -> Summary {
    let mut summary = Summary {
        total: snapshot.processes.len(),
        ..Summary::default()
    };

    for p in &snapshot.processes {
        match p.status {
            ProcessStatus::Running => summary.running += 1,
            ProcessStatus::Sleeping => summary.sleeping += 1,
            ProcessStatus::Stopped => summary.stopped += 1,
            ProcessStatus::Other(_) => {}
        }
        if is_alert(p) {
            summary.alerts.push(AlertEntry {
                pid: p.pid,
                name: p.name.clone(),
                cpu_percent: p.cpu_percent,
                memory_percent: p.memory_percent,
            });
        }
    }

    summary
}

pub fn is_alert(process: &ProcessSnapshot) -> bool {
    process.cpu_percent > ALERT_CPU_PERCENT || process.memory_percent > ALERT_MEM_PERCENT
}

/// Ratio for gauge widgets. The percent is clamped to [0, 100] here; the
/// numeric label next to the gauge always shows the raw value.
pub fn gauge_ratio(percent: f64) -> f64 {
    percent.clamp(0.0, 100.0) / 100.0
}

/// "used / total GB" with one decimal, or "0 / 0 GB" when the server did not
/// report both values.
pub fn memory_detail(used: Option<u64>, total: Option<u64>) -> String {
    match (used, total) {
        (Some(used), Some(total)) if total > 0 => {
            format!("{:.1} / {:.1} GB", used as f64 / GIB, total as f64 / GIB)
        }
        _ => "0 / 0 GB".to_string(),
    }
}
