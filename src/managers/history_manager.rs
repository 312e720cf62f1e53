//! Visit history for MiniArc.
//!
//! Implements `HistoryManagerTrait`: the list of completed page loads shown
//! under the search field, newest first. Kept in memory; the optional
//! session store mirrors it to disk.

use std::collections::VecDeque;

use crate::types::errors::HistoryError;
use crate::types::history::VisitRecord;

/// Trait defining visit history operations.
pub trait HistoryManagerTrait {
    fn record_visit(&mut self, record: VisitRecord);
    fn list_history(&self) -> Vec<&VisitRecord>;
    fn get_entry(&self, index: usize) -> Result<&VisitRecord, HistoryError>;
    fn search_history(&self, query: &str) -> Vec<&VisitRecord>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// History list with an optional size cap.
#[derive(Debug, Default)]
pub struct VisitHistory {
    entries: VecDeque<VisitRecord>,
    max_entries: Option<usize>,
}

impl VisitHistory {
    /// Creates an unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that drops its oldest entries beyond `max_entries`.
    pub fn with_limit(max_entries: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    pub fn set_limit(&mut self, max_entries: Option<usize>) {
        self.max_entries = max_entries;
        self.enforce_limit();
    }

    /// Replaces the whole list; `entries` must already be newest first.
    pub fn restore(&mut self, entries: Vec<VisitRecord>) {
        self.entries = entries.into();
        self.enforce_limit();
    }

    pub fn latest(&self) -> Option<&VisitRecord> {
        self.entries.front()
    }

    fn enforce_limit(&mut self) {
        if let Some(max) = self.max_entries {
            self.entries.truncate(max);
        }
    }
}

impl HistoryManagerTrait for VisitHistory {
    /// Prepends a record.
    fn record_visit(&mut self, record: VisitRecord) {
        self.entries.push_front(record);
        self.enforce_limit();
    }

    fn list_history(&self) -> Vec<&VisitRecord> {
        self.entries.iter().collect()
    }

    fn get_entry(&self, index: usize) -> Result<&VisitRecord, HistoryError> {
        self.entries
            .get(index)
            .ok_or(HistoryError::IndexOutOfRange(index))
    }

    /// Case-insensitive match on title or URL, newest first.
    fn search_history(&self, query: &str) -> Vec<&VisitRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.list_history();
        }
        self.entries
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.url_string.to_lowercase().contains(&needle)
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
