use serde::{Deserialize, Serialize};

/// Placeholder replaced by the percent-encoded query in a search template.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShellSettings {
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub tabs: TabSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub persistence: PersistenceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Search engine used for text that is not a URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub template: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            template: "https://www.google.com/search?q={query}".to_string(),
        }
    }
}

/// Which tab becomes active when the active tab is closed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClosePolicy {
    /// The tab to the left, or the new first tab when the first one closed.
    #[default]
    Previous,
    /// The tab to the right, or the new last tab when the last one closed.
    Next,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TabSettings {
    pub close_policy: ClosePolicy,
    /// Every submission opens a new tab, whatever opened the search field.
    pub always_open_new_tab: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct HistorySettings {
    /// `None` keeps every visit.
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PersistenceSettings {
    pub enabled: bool,
    /// Defaults to `session.db` in the platform data directory.
    pub database_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `env_logger` filter; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
