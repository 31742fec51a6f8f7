use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::TableState;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::action::{Action, Direction};
use crate::client::{ClientError, StatsClient};
use crate::config::{Config, parse_key};
use crate::event::Event;
use crate::stats::history::RollingSeries;
use crate::stats::pipeline::{self, ProcessFilter, SortKey, ViewState};
use crate::stats::snapshot::{ProcessSnapshot, SystemSnapshot};
use crate::stats::summary::{self, Summary};
use crate::ui::theme::Theme;

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    ConfirmKill,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Before the first fetch completes.
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub search: KeyCode,
    pub kill: KeyCode,
    pub refresh: KeyCode,
    pub auto_refresh: KeyCode,
    pub cycle_filter: KeyCode,
    pub cycle_sort: KeyCode,
    pub toggle_detail: KeyCode,
    pub cycle_theme: KeyCode,
    pub help: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            search: parse_key(&kb.search).unwrap_or(KeyCode::Char('/')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            auto_refresh: parse_key(&kb.auto_refresh).unwrap_or(KeyCode::Char('a')),
            cycle_filter: parse_key(&kb.cycle_filter).unwrap_or(KeyCode::Char('f')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            toggle_detail: parse_key(&kb.toggle_detail).unwrap_or(KeyCode::Char('d')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.search), "Search processes"),
            (key_label(self.kill), "Kill selected process"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.auto_refresh), "Toggle auto-refresh"),
            (key_label(self.cycle_filter), "Cycle filter"),
            (key_label(self.cycle_sort), "Cycle sort key"),
            (key_label(self.toggle_detail), "Toggle detail panel"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Select row"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

/// One dashboard session. Owns every piece of mutable state: the cached
/// snapshot, the rolling chart series, the view controls, and the fetch
/// sequence counters. Constructed once and driven by the event loop.
pub struct App {
    pub running: bool,
    pub snapshot: SystemSnapshot,
    pub summary: Summary,
    pub cpu_series: RollingSeries,
    pub mem_series: RollingSeries,
    pub view: ViewState,
    pub input_mode: InputMode,
    pub connection: ConnectionStatus,
    pub last_updated: Option<DateTime<Local>>,
    pub auto_refresh: bool,
    pub selected_index: usize,
    pub show_detail_panel: bool,
    pub pending_kill: Option<(u32, String)>,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    /// Scroll state for the table widget; selection is re-synced every draw.
    pub table_state: TableState,
    client: StatsClient,
    events_tx: mpsc::UnboundedSender<Event>,
    request_seq: u64,
    applied_seq: u64,
}

impl App {
    pub fn new(config: Config, events_tx: mpsc::UnboundedSender<Event>) -> Self {
        let client = StatsClient::new(
            &config.server.base_url,
            Duration::from_millis(config.server.request_timeout_ms),
        );
        App {
            running: true,
            snapshot: SystemSnapshot::default(),
            summary: Summary::default(),
            cpu_series: RollingSeries::default(),
            mem_series: RollingSeries::default(),
            view: ViewState {
                filter: ProcessFilter::from_str_config(&config.general.default_filter),
                search: String::new(),
                sort: SortKey::from_str_config(&config.general.default_sort),
            },
            input_mode: InputMode::Normal,
            connection: ConnectionStatus::Connecting,
            last_updated: None,
            auto_refresh: config.general.auto_refresh,
            selected_index: 0,
            show_detail_panel: config.general.show_detail_panel,
            pending_kill: None,
            status_message: None,
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            table_state: TableState::default(),
            client,
            events_tx,
            request_seq: 0,
            applied_seq: 0,
        }
    }

    /// Rows currently visible in the table, derived fresh from the cached
    /// snapshot and the live view state.
    pub fn visible_rows(&self) -> Vec<&ProcessSnapshot> {
        pipeline::visible_rows(&self.snapshot.processes, &self.view)
    }

    pub fn selected_process(&self) -> Option<&ProcessSnapshot> {
        self.visible_rows().get(self.selected_index).copied()
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    /// Starts an out-of-band fetch. Each request carries a fresh sequence
    /// number so `apply_stats` can reject completions that arrive after a
    /// newer snapshot has already been applied.
    pub fn begin_fetch(&mut self) {
        self.request_seq += 1;
        let seq = self.request_seq;
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_snapshot().await;
            let _ = tx.send(Event::Stats { seq, result });
        });
    }

    /// The tick interval always fires; auto-refresh gates whether a tick
    /// starts a fetch, which makes "cancelling the timer" an idempotent flag
    /// write.
    pub fn on_tick(&mut self) {
        if let Some((_, created)) = &self.status_message
            && created.elapsed() >= STATUS_MESSAGE_TTL
        {
            self.status_message = None;
        }
        if self.auto_refresh {
            self.begin_fetch();
        }
    }

    pub fn apply_stats(&mut self, seq: u64, result: Result<SystemSnapshot, ClientError>) {
        if seq <= self.applied_seq {
            debug!(seq, applied = self.applied_seq, "dropping stale stats completion");
            return;
        }
        // The original updates the last-updated clock on failure too.
        self.last_updated = Some(Local::now());
        match result {
            Ok(snapshot) => {
                self.applied_seq = seq;
                self.cpu_series.push(snapshot.cpu_usage);
                self.mem_series.push(snapshot.memory_usage);
                self.summary = summary::summarize(&snapshot);
                self.snapshot = snapshot;
                self.connection = ConnectionStatus::Connected;
                self.clamp_selection();
            }
            Err(err) => {
                warn!(%err, "stats fetch failed");
                self.connection = ConnectionStatus::Disconnected;
            }
        }
    }

    pub fn apply_kill(&mut self, pid: u32, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                self.set_status(format!("Killed PID {pid}"));
                self.begin_fetch();
            }
            Err(ClientError::KillRejected { status, body }) => {
                let body = body.trim();
                if body.is_empty() {
                    self.set_status(format!("Kill failed: HTTP {status}"));
                } else {
                    self.set_status(format!("Kill failed: HTTP {status} {body}"));
                }
            }
            Err(ClientError::Unreachable(_)) => {
                self.set_status(format!("Network error while killing PID {pid}"));
            }
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Search => self.map_key_search(key),
            InputMode::ConfirmKill => self.map_key_confirm_kill(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        // Row navigation is hardwired (not configurable)
        match code {
            KeyCode::Up => return Action::Navigate(Direction::Up),
            KeyCode::Down => return Action::Navigate(Direction::Down),
            KeyCode::Home => return Action::Navigate(Direction::Top),
            KeyCode::End => return Action::Navigate(Direction::Bottom),
            KeyCode::Esc if !self.view.search.is_empty() => return Action::ClearSearch,
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.search {
            return Action::EnterSearchMode;
        }
        if code == kb.kill {
            return match self.selected_process() {
                Some(p) if p.pid != 0 => Action::ConfirmKill(p.pid),
                _ => Action::None,
            };
        }
        if code == kb.refresh {
            return Action::Refresh;
        }
        if code == kb.auto_refresh {
            return Action::ToggleAutoRefresh;
        }
        if code == kb.cycle_filter {
            return Action::CycleFilter;
        }
        if code == kb.cycle_sort {
            return Action::CycleSortKey;
        }
        if code == kb.toggle_detail {
            return Action::ToggleDetailPanel;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }

        Action::None
    }

    fn map_key_search(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClearSearch,
            KeyCode::Enter => Action::ExitSearchMode,
            KeyCode::Backspace => {
                let mut text = self.view.search.clone();
                text.pop();
                Action::UpdateSearch(text)
            }
            KeyCode::Char(c) => {
                let mut text = self.view.search.clone();
                text.push(c);
                Action::UpdateSearch(text)
            }
            _ => Action::None,
        }
    }

    fn map_key_confirm_kill(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match &self.pending_kill {
                    Some((pid, _)) => Action::Kill(*pid),
                    None => Action::CancelKill,
                }
            }
            // Anything else declines; no network call happens.
            _ => Action::CancelKill,
        }
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::EnterSearchMode => {
                self.input_mode = InputMode::Search;
            }
            Action::ExitSearchMode => {
                self.input_mode = InputMode::Normal;
            }
            Action::ClearSearch => {
                self.view.search.clear();
                self.input_mode = InputMode::Normal;
                self.clamp_selection();
            }
            Action::UpdateSearch(text) => {
                self.view.search = text;
                self.selected_index = 0;
            }
            Action::CycleFilter => {
                self.view.filter = self.view.filter.next();
                self.selected_index = 0;
            }
            Action::CycleSortKey => {
                self.view.sort = self.view.sort.next();
            }
            Action::ToggleAutoRefresh => {
                self.auto_refresh = !self.auto_refresh;
                let state = if self.auto_refresh { "on" } else { "off" };
                self.set_status(format!("Auto-refresh {state}"));
            }
            Action::ToggleDetailPanel => {
                self.show_detail_panel = !self.show_detail_panel;
            }
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::CycleTheme => {
                self.theme = self.theme.next();
            }
            Action::Refresh => {
                self.begin_fetch();
            }
            Action::ConfirmKill(pid) => {
                let name = self
                    .selected_process()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.pending_kill = Some((pid, name));
                self.input_mode = InputMode::ConfirmKill;
            }
            Action::Kill(pid) => {
                self.pending_kill = None;
                self.input_mode = InputMode::Normal;
                let client = self.client.clone();
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = client.kill(pid).await;
                    let _ = tx.send(Event::Kill { pid, result });
                });
            }
            Action::CancelKill => {
                self.pending_kill = None;
                self.input_mode = InputMode::Normal;
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_index = 0;
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(len - 1),
            Direction::Top => 0,
            Direction::Bottom => len - 1,
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }
}
