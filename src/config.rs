use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::listbox::Timings;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Word used in the summary value. Empty falls back to "option".
    #[serde(default = "default_option_type")]
    pub option_type: String,
    #[serde(default = "default_todo_label")]
    pub todo_label: String,
    #[serde(default = "default_multiselect_label")]
    pub multiselect_label: String,
    #[serde(default = "default_search_reset_ms")]
    pub search_reset_ms: u64,
    #[serde(default = "default_open_guard_ms")]
    pub open_guard_ms: u64,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_enabled")]
    pub log_enabled: bool,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_option_type() -> String {
    "book".to_string()
}
fn default_todo_label() -> String {
    "Favorite Books".to_string()
}
fn default_multiselect_label() -> String {
    "Order Books".to_string()
}
fn default_search_reset_ms() -> u64 {
    500
}
fn default_open_guard_ms() -> u64 {
    100
}
fn default_tick_rate_ms() -> u64 {
    100
}
fn default_log_enabled() -> bool {
    false
}
fn default_log_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("combolist")
        .join("trace.jsonl")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            option_type: default_option_type(),
            todo_label: default_todo_label(),
            multiselect_label: default_multiselect_label(),
            search_reset_ms: default_search_reset_ms(),
            open_guard_ms: default_open_guard_ms(),
            tick_rate_ms: default_tick_rate_ms(),
            log_enabled: default_log_enabled(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("combolist")
            .join("config.toml")
    }

    /// Reset zero search and tick durations to their defaults.
    pub fn normalize(&mut self) {
        if self.search_reset_ms == 0 {
            self.search_reset_ms = default_search_reset_ms();
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = default_tick_rate_ms();
        }
    }

    pub fn option_type(&self) -> Option<&str> {
        Some(self.option_type.as_str()).filter(|t| !t.is_empty())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            search_reset: Duration::from_millis(self.search_reset_ms),
            open_guard: Duration::from_millis(self.open_guard_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.option_type, "book");
        assert_eq!(config.search_reset_ms, 500);
        assert_eq!(config.open_guard_ms, 100);
        assert!(!config.log_enabled);
        assert!(config.log_file.ends_with("trace.jsonl"));
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
theme = "catppuccin-mocha"
option_type = "task"
search_reset_ms = 800
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.option_type(), Some("task"));
        assert_eq!(config.timings().search_reset, Duration::from_millis(800));
        assert_eq!(config.todo_label, "Favorite Books");
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.option_type, deserialized.option_type);
        assert_eq!(config.log_file, deserialized.log_file);
        assert_eq!(config.open_guard_ms, deserialized.open_guard_ms);
    }

    #[test]
    fn test_empty_option_type_is_unset() {
        let mut config = Config::default();
        config.option_type = String::new();
        assert_eq!(config.option_type(), None);
    }

    #[test]
    fn test_normalize_resets_zero_durations() {
        let mut config = Config::default();
        config.search_reset_ms = 0;
        config.tick_rate_ms = 0;
        config.open_guard_ms = 0;
        config.normalize();
        assert_eq!(config.search_reset_ms, 500);
        assert_eq!(config.tick_rate_ms, 100);
        // a zero open guard is a valid choice: no debounce
        assert_eq!(config.open_guard_ms, 0);
    }
}
