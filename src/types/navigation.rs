use serde::{Deserialize, Serialize};

/// How a piece of typed text was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Typed with an explicit `http://` or `https://` scheme.
    Absolute,
    /// Looked like `example.com`; a scheme was added.
    BareDomain,
    /// Anything else, sent to the search engine.
    Search,
}

/// A URL the shell is ready to hand to a content session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub url: String,
    pub kind: TargetKind,
}

impl NavigationTarget {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}
