use std::cmp::Ordering;

use crate::stats::snapshot::{ProcessSnapshot, ProcessStatus};

pub const HIGH_CPU_PERCENT: f64 = 20.0;
pub const HIGH_MEM_PERCENT: f64 = 20.0;

/// The current view over the cached process list. Owned by the app session
/// and read fresh on every draw; never cached alongside the snapshot.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub filter: ProcessFilter,
    pub search: String,
    pub sort: SortKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessFilter {
    #[default]
    All,
    HighCpu,
    HighMem,
    Stopped,
}

impl ProcessFilter {
    pub fn next(self) -> Self {
        match self {
            ProcessFilter::All => ProcessFilter::HighCpu,
            ProcessFilter::HighCpu => ProcessFilter::HighMem,
            ProcessFilter::HighMem => ProcessFilter::Stopped,
            ProcessFilter::Stopped => ProcessFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProcessFilter::All => "All",
            ProcessFilter::HighCpu => "High CPU",
            ProcessFilter::HighMem => "High Mem",
            ProcessFilter::Stopped => "Stopped",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high-cpu" | "high_cpu" => ProcessFilter::HighCpu,
            "high-mem" | "high_mem" => ProcessFilter::HighMem,
            "stopped" => ProcessFilter::Stopped,
            _ => ProcessFilter::All,
        }
    }

    pub fn accepts(self, process: &ProcessSnapshot) -> bool {
        match self {
            ProcessFilter::All => true,
            ProcessFilter::HighCpu => process.cpu_percent > HIGH_CPU_PERCENT,
            ProcessFilter::HighMem => process.memory_percent > HIGH_MEM_PERCENT,
            ProcessFilter::Stopped => process.status == ProcessStatus::Stopped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Unsorted,
    CpuDesc,
    CpuAsc,
    MemDesc,
    MemAsc,
    NameAsc,
    PidAsc,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Unsorted => SortKey::CpuDesc,
            SortKey::CpuDesc => SortKey::CpuAsc,
            SortKey::CpuAsc => SortKey::MemDesc,
            SortKey::MemDesc => SortKey::MemAsc,
            SortKey::MemAsc => SortKey::NameAsc,
            SortKey::NameAsc => SortKey::PidAsc,
            SortKey::PidAsc => SortKey::Unsorted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Unsorted => "None",
            SortKey::CpuDesc => "CPU ↓",
            SortKey::CpuAsc => "CPU ↑",
            SortKey::MemDesc => "Mem ↓",
            SortKey::MemAsc => "Mem ↑",
            SortKey::NameAsc => "Name",
            SortKey::PidAsc => "PID",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "cpu-desc" | "cpu" => SortKey::CpuDesc,
            "cpu-asc" => SortKey::CpuAsc,
            "mem-desc" | "mem" => SortKey::MemDesc,
            "mem-asc" => SortKey::MemAsc,
            "name-asc" | "name" => SortKey::NameAsc,
            "pid-asc" | "pid" => SortKey::PidAsc,
            _ => SortKey::Unsorted,
        }
    }
}

/// Derives the visible rows from the cached process list: filter, then
/// search, then sort. Sorting is stable, so rows that compare equal keep
/// their pre-sort relative order, and `Unsorted` leaves the order untouched.
pub fn visible_rows<'a>(
    processes: &'a [ProcessSnapshot],
    view: &ViewState,
) -> Vec<&'a ProcessSnapshot> {
    let mut rows: Vec<&ProcessSnapshot> = processes
        .iter()
        .filter(|p| view.filter.accepts(p))
        .collect();

    let query = view.search.trim().to_lowercase();
    if !query.is_empty() {
        rows.retain(|p| {
            p.name.to_lowercase().contains(&query) || p.pid.to_string().contains(&query)
        });
    }

    match view.sort {
        SortKey::Unsorted => {}
        SortKey::CpuDesc => rows.sort_by(|a, b| float_cmp(b.cpu_percent, a.cpu_percent)),
        SortKey::CpuAsc => rows.sort_by(|a, b| float_cmp(a.cpu_percent, b.cpu_percent)),
        SortKey::MemDesc => rows.sort_by(|a, b| float_cmp(b.memory_percent, a.memory_percent)),
        SortKey::MemAsc => rows.sort_by(|a, b| float_cmp(a.memory_percent, b.memory_percent)),
        SortKey::NameAsc => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::PidAsc => rows.sort_by(|a, b| a.pid.cmp(&b.pid)),
    }

    rows
}

fn float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, name: &str, cpu: f64, mem: f64, status: ProcessStatus) -> ProcessSnapshot {
        ProcessSnapshot {
            pid,
            name: name.to_string(),
            cpu_percent: cpu,
            memory_percent: mem,
            status,
            ..ProcessSnapshot::default()
        }
    }

    fn sample() -> Vec<ProcessSnapshot> {
        vec![
            proc(12, "nginx", 45.0, 3.0, ProcessStatus::Running),
            proc(120, "postgres", 5.0, 30.0, ProcessStatus::Sleeping),
            proc(5, "cron", 0.5, 0.1, ProcessStatus::Stopped),
            proc(9, "node", 20.0, 20.0, ProcessStatus::Running),
        ]
    }

    #[test]
    fn identity_view_preserves_input_order() {
        let procs = sample();
        let rows = visible_rows(&procs, &ViewState::default());
        let pids: Vec<u32> = rows.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![12, 120, 5, 9]);
    }

    #[test]
    fn high_cpu_keeps_strictly_above_threshold() {
        let procs = sample();
        let view = ViewState {
            filter: ProcessFilter::HighCpu,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        // 20.0 exactly is excluded, the filter is strict.
        assert_eq!(pids, vec![12]);
    }

    #[test]
    fn high_mem_keeps_strictly_above_threshold() {
        let procs = sample();
        let view = ViewState {
            filter: ProcessFilter::HighMem,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![120]);
    }

    #[test]
    fn stopped_filter_matches_normalized_status() {
        let procs = sample();
        let view = ViewState {
            filter: ProcessFilter::Stopped,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![5]);
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let procs = sample();
        let view = ViewState {
            search: "NGI".to_string(),
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![12]);
    }

    #[test]
    fn search_matches_pid_substring() {
        let procs = sample();
        let view = ViewState {
            search: "12".to_string(),
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![12, 120]);
    }

    #[test]
    fn whitespace_only_search_is_a_passthrough() {
        let procs = sample();
        let view = ViewState {
            search: "   ".to_string(),
            ..ViewState::default()
        };
        assert_eq!(visible_rows(&procs, &view).len(), procs.len());
    }

    #[test]
    fn sort_cpu_desc() {
        let procs = sample();
        let view = ViewState {
            sort: SortKey::CpuDesc,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![12, 9, 120, 5]);
    }

    #[test]
    fn sort_pid_asc_is_non_decreasing() {
        let procs = sample();
        let view = ViewState {
            sort: SortKey::PidAsc,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![5, 9, 12, 120]);
    }

    #[test]
    fn sort_name_asc_is_byte_lexicographic() {
        let procs = vec![
            proc(1, "Zebra", 0.0, 0.0, ProcessStatus::Running),
            proc(2, "alpha", 0.0, 0.0, ProcessStatus::Running),
            proc(3, "Beta", 0.0, 0.0, ProcessStatus::Running),
        ];
        let view = ViewState {
            sort: SortKey::NameAsc,
            ..ViewState::default()
        };
        let names: Vec<&str> = visible_rows(&procs, &view)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Beta", "Zebra", "alpha"]);
    }

    #[test]
    fn ties_preserve_pre_sort_order() {
        let procs = vec![
            proc(3, "a", 10.0, 0.0, ProcessStatus::Running),
            proc(1, "b", 10.0, 0.0, ProcessStatus::Running),
            proc(2, "c", 10.0, 0.0, ProcessStatus::Running),
        ];
        let view = ViewState {
            sort: SortKey::CpuDesc,
            ..ViewState::default()
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 1, 2]);
    }

    #[test]
    fn filter_then_search_then_sort_compose() {
        let procs = vec![
            proc(10, "worker", 50.0, 1.0, ProcessStatus::Running),
            proc(11, "worker", 30.0, 1.0, ProcessStatus::Running),
            proc(12, "idle", 90.0, 1.0, ProcessStatus::Running),
            proc(13, "worker", 5.0, 1.0, ProcessStatus::Running),
        ];
        let view = ViewState {
            filter: ProcessFilter::HighCpu,
            search: "worker".to_string(),
            sort: SortKey::CpuAsc,
        };
        let pids: Vec<u32> = visible_rows(&procs, &view).iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![11, 10]);
    }

    #[test]
    fn filter_cycles_through_all_variants() {
        let f = ProcessFilter::All;
        assert_eq!(f.next(), ProcessFilter::HighCpu);
        assert_eq!(f.next().next(), ProcessFilter::HighMem);
        assert_eq!(f.next().next().next(), ProcessFilter::Stopped);
        assert_eq!(f.next().next().next().next(), ProcessFilter::All);
    }

    #[test]
    fn sort_key_from_config_strings() {
        assert_eq!(SortKey::from_str_config("cpu-desc"), SortKey::CpuDesc);
        assert_eq!(SortKey::from_str_config("PID-ASC"), SortKey::PidAsc);
        assert_eq!(SortKey::from_str_config("bogus"), SortKey::Unsorted);
        assert_eq!(
            ProcessFilter::from_str_config("high-cpu"),
            ProcessFilter::HighCpu
        );
        assert_eq!(ProcessFilter::from_str_config(""), ProcessFilter::All);
    }
}
