use std::path::{Path, PathBuf};

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub general: GeneralConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub refresh_rate_ms: u64,
    pub default_filter: String,
    pub default_sort: String,
    pub auto_refresh: bool,
    pub show_detail_panel: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            refresh_rate_ms: 2000,
            default_filter: "all".to_string(),
            default_sort: "none".to_string(),
            auto_refresh: true,
            show_detail_panel: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub search: String,
    pub kill: String,
    pub refresh: String,
    pub auto_refresh: String,
    pub cycle_filter: String,
    pub cycle_sort: String,
    pub toggle_detail: String,
    pub cycle_theme: String,
    pub help: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            search: "/".to_string(),
            kill: "k".to_string(),
            refresh: "r".to_string(),
            auto_refresh: "a".to_string(),
            cycle_filter: "f".to_string(),
            cycle_sort: "s".to_string(),
            toggle_detail: "d".to_string(),
            cycle_theme: "t".to_string(),
            help: "?".to_string(),
        }
    }
}

/// Parses a keybind string from the config file into a key code.
/// Accepts a few named keys plus any single character.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" | "enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" | "escape" | "esc" => Some(KeyCode::Esc),
        "Tab" | "tab" => Some(KeyCode::Tab),
        "Space" | "space" => Some(KeyCode::Char(' ')),
        "Backspace" | "backspace" => Some(KeyCode::Backspace),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("procdash").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
