use std::fmt;

use super::content::ContentHandle;
use super::tab::TabId;
use super::toolbar::{ToolbarButton, ToolbarEvent, ToolbarMode};

// === NavigationError ===

/// Errors produced while turning typed text into a navigation target.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// The input could not be turned into a well-formed URL.
    InvalidInput(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidInput(input) => write!(f, "Invalid URL: {}", input),
        }
    }
}

impl std::error::Error for NavigationError {}

// === TabError ===

/// Errors related to tab registry operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TabError {
    /// Tab with the given ID was not found.
    NotFound(TabId),
    /// No tab is displayed at the given position.
    InvalidIndex(usize),
    /// A content session reported an event but no tab owns it.
    UnknownSession(ContentHandle),
    /// The operation needs an active tab and there is none.
    NoActiveTab,
}

impl fmt::Display for TabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabError::NotFound(id) => write!(f, "Tab not found: {}", id),
            TabError::InvalidIndex(index) => write!(f, "Invalid tab index: {}", index),
            TabError::UnknownSession(handle) => {
                write!(f, "No tab owns content session {}", handle)
            }
            TabError::NoActiveTab => write!(f, "No active tab"),
        }
    }
}

impl std::error::Error for TabError {}

// === ToolbarError ===

/// Errors related to toolbar mode changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarError {
    /// The event is not accepted in the current mode.
    IllegalTransition {
        from: ToolbarMode,
        event: ToolbarEvent,
    },
    /// The button is not shown in the current mode.
    ControlUnavailable {
        mode: ToolbarMode,
        button: ToolbarButton,
    },
}

impl fmt::Display for ToolbarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolbarError::IllegalTransition { from, event } => {
                write!(f, "Illegal toolbar transition: {:?} from {:?}", event, from)
            }
            ToolbarError::ControlUnavailable { mode, button } => {
                write!(f, "Toolbar control {:?} unavailable in {:?} mode", button, mode)
            }
        }
    }
}

impl std::error::Error for ToolbarError {}

// === HistoryError ===

/// Errors related to the visit history list.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryError {
    /// No history entry at the given position.
    IndexOutOfRange(usize),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IndexOutOfRange(index) => {
                write!(f, "History index out of range: {}", index)
            }
        }
    }
}

impl std::error::Error for HistoryError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === StoreError ===

/// Errors related to the on-disk session store.
#[derive(Debug)]
pub enum StoreError {
    /// Database operation failed.
    DatabaseError(String),
    /// A stored row could not be decoded.
    CorruptRow(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DatabaseError(msg) => write!(f, "Session store database error: {}", msg),
            StoreError::CorruptRow(msg) => write!(f, "Corrupt session store row: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === ShellError ===

/// Any error the browser session can surface to its host.
#[derive(Debug)]
pub enum ShellError {
    Navigation(NavigationError),
    Tab(TabError),
    Toolbar(ToolbarError),
    History(HistoryError),
    Settings(SettingsError),
    Store(StoreError),
    /// The session actor is gone.
    Closed,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Navigation(e) => write!(f, "{}", e),
            ShellError::Tab(e) => write!(f, "{}", e),
            ShellError::Toolbar(e) => write!(f, "{}", e),
            ShellError::History(e) => write!(f, "{}", e),
            ShellError::Settings(e) => write!(f, "{}", e),
            ShellError::Store(e) => write!(f, "{}", e),
            ShellError::Closed => write!(f, "Browser session is closed"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Navigation(e) => Some(e),
            ShellError::Tab(e) => Some(e),
            ShellError::Toolbar(e) => Some(e),
            ShellError::History(e) => Some(e),
            ShellError::Settings(e) => Some(e),
            ShellError::Store(e) => Some(e),
            ShellError::Closed => None,
        }
    }
}

impl From<NavigationError> for ShellError {
    fn from(e: NavigationError) -> Self {
        ShellError::Navigation(e)
    }
}

impl From<TabError> for ShellError {
    fn from(e: TabError) -> Self {
        ShellError::Tab(e)
    }
}

impl From<ToolbarError> for ShellError {
    fn from(e: ToolbarError) -> Self {
        ShellError::Toolbar(e)
    }
}

impl From<HistoryError> for ShellError {
    fn from(e: HistoryError) -> Self {
        ShellError::History(e)
    }
}

impl From<SettingsError> for ShellError {
    fn from(e: SettingsError) -> Self {
        ShellError::Settings(e)
    }
}

impl From<StoreError> for ShellError {
    fn from(e: StoreError) -> Self {
        ShellError::Store(e)
    }
}
