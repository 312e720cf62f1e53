use serde::{Deserialize, Serialize};

use super::tab::TabId;

/// A successfully completed page load, listed while the user is searching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    pub tab_id: TabId,
    pub url: String,
    pub url_string: String,
    pub title: String,
    pub visited_at: i64,
}
