use std::fmt;

use serde::{Deserialize, Serialize};

use super::content::ContentHandle;

/// Title shown for a tab (or visit) whose page never reported one.
pub const UNTITLED: &str = "Untitled";

/// Stable tab identifier, assigned once at creation and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a browser tab and the content session it owns.
#[derive(Debug, Clone)]
pub struct Tab {
    pub id: TabId,
    pub content: ContentHandle,
    pub title: String,
    pub url: Option<String>,
    /// Requested URL whose load has not finished yet.
    pub pending_url: Option<String>,
    pub loading: bool,
    pub created_at: i64,
}

impl Tab {
    /// The page to reopen this tab on: the pending request if any,
    /// else the last loaded page.
    pub fn resume_url(&self) -> Option<&str> {
        self.pending_url.as_deref().or(self.url.as_deref())
    }
}

/// Tab state as shown in the tab switcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub position: usize,
    pub title: String,
    pub url: Option<String>,
    pub loading: bool,
    pub active: bool,
}
