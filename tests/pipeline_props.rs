//! Property tests for the filter/search/sort pipeline and the rolling series.

use proptest::prelude::*;

use procdash::stats::history::{RollingSeries, SERIES_CAPACITY};
use procdash::stats::pipeline::{
    HIGH_CPU_PERCENT, ProcessFilter, SortKey, ViewState, visible_rows,
};
use procdash::stats::snapshot::{ProcessSnapshot, ProcessStatus};

fn arb_status() -> impl Strategy<Value = ProcessStatus> {
    prop_oneof![
        Just(ProcessStatus::Running),
        Just(ProcessStatus::Sleeping),
        Just(ProcessStatus::Stopped),
        "[a-z]{1,8}".prop_map(ProcessStatus::Other),
    ]
}

fn arb_process() -> impl Strategy<Value = ProcessSnapshot> {
    (
        0u32..100_000,
        "[a-zA-Z0-9_-]{0,12}",
        0.0f64..200.0,
        0.0f64..200.0,
        arb_status(),
    )
        .prop_map(|(pid, name, cpu, mem, status)| ProcessSnapshot {
            pid,
            name,
            cpu_percent: cpu,
            memory_percent: mem,
            status,
            ..ProcessSnapshot::default()
        })
}

fn arb_processes() -> impl Strategy<Value = Vec<ProcessSnapshot>> {
    prop::collection::vec(arb_process(), 0..64)
}

proptest! {
    #[test]
    fn identity_view_returns_input_order(procs in arb_processes()) {
        let rows = visible_rows(&procs, &ViewState::default());
        let pids: Vec<u32> = rows.iter().map(|p| p.pid).collect();
        let expected: Vec<u32> = procs.iter().map(|p| p.pid).collect();
        prop_assert_eq!(pids, expected);
    }

    #[test]
    fn high_cpu_filter_membership_is_exact(procs in arb_processes()) {
        let view = ViewState { filter: ProcessFilter::HighCpu, ..ViewState::default() };
        let rows = visible_rows(&procs, &view);
        prop_assert!(rows.iter().all(|p| p.cpu_percent > HIGH_CPU_PERCENT));
        let expected = procs.iter().filter(|p| p.cpu_percent > HIGH_CPU_PERCENT).count();
        prop_assert_eq!(rows.len(), expected);
    }

    #[test]
    fn pid_sort_is_non_decreasing(procs in arb_processes()) {
        let view = ViewState { sort: SortKey::PidAsc, ..ViewState::default() };
        let rows = visible_rows(&procs, &view);
        prop_assert!(rows.windows(2).all(|w| w[0].pid <= w[1].pid));
    }

    #[test]
    fn pipeline_never_invents_rows(procs in arb_processes(), query in "[a-z0-9]{0,3}") {
        let view = ViewState {
            filter: ProcessFilter::HighMem,
            search: query,
            sort: SortKey::MemDesc,
        };
        let rows = visible_rows(&procs, &view);
        prop_assert!(rows.len() <= procs.len());
        prop_assert!(rows.windows(2).all(|w| w[0].memory_percent >= w[1].memory_percent));
    }

    #[test]
    fn search_hits_match_name_or_pid(procs in arb_processes(), query in "[a-z0-9]{1,4}") {
        let view = ViewState { search: query.clone(), ..ViewState::default() };
        let rows = visible_rows(&procs, &view);
        for p in rows {
            let hit = p.name.to_lowercase().contains(&query)
                || p.pid.to_string().contains(&query);
            prop_assert!(hit);
        }
    }

    #[test]
    fn series_length_is_bounded(values in prop::collection::vec(0.0f64..100.0, 0..200)) {
        let mut series = RollingSeries::default();
        for v in &values {
            series.push(*v);
        }
        prop_assert!(series.len() <= SERIES_CAPACITY);
        prop_assert_eq!(series.len(), values.len().min(SERIES_CAPACITY));
        // Contents are the most recent values in push order.
        let kept: Vec<f64> = series.values().collect();
        let start = values.len().saturating_sub(SERIES_CAPACITY);
        prop_assert_eq!(kept, values[start..].to_vec());
    }
}
