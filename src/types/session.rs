use serde::{Deserialize, Serialize};

use super::history::VisitRecord;
use super::tab::{TabId, TabSummary};
use super::toolbar::{ToolbarButton, ToolbarMode};

/// Read-only view of the session handed to the toolbar host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellSnapshot {
    pub mode: ToolbarMode,
    pub controls: Vec<ToolbarButton>,
    pub tabs: Vec<TabSummary>,
    pub active_tab: Option<TabId>,
    pub tab_switcher_open: bool,
    /// Visit history, newest first; only filled while searching.
    pub history: Vec<VisitRecord>,
    /// Inline error for the search field, e.g. an invalid URL.
    pub input_error: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Tab layout saved by the session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub tabs: Vec<SessionTab>,
    /// Position of the active tab in `tabs`.
    pub active_index: Option<usize>,
    pub timestamp: i64,
}

/// A tab's state as stored in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTab {
    pub url: Option<String>,
    pub title: String,
}
