//! Display and conversion tests for the error types.

use std::error::Error;

use miniarc::types::content::ContentHandle;
use miniarc::types::errors::{
    HistoryError, NavigationError, SettingsError, ShellError, StoreError, TabError, ToolbarError,
};
use miniarc::types::tab::TabId;
use miniarc::types::toolbar::{ToolbarButton, ToolbarEvent, ToolbarMode};

#[test]
fn test_tab_error_display() {
    assert_eq!(TabError::NotFound(TabId(7)).to_string(), "Tab not found: 7");
    assert_eq!(TabError::InvalidIndex(3).to_string(), "Invalid tab index: 3");
    assert_eq!(
        TabError::UnknownSession(ContentHandle(9)).to_string(),
        "No tab owns content session #9"
    );
    assert_eq!(TabError::NoActiveTab.to_string(), "No active tab");
}

#[test]
fn test_toolbar_error_display() {
    let err = ToolbarError::IllegalTransition {
        from: ToolbarMode::Hidden,
        event: ToolbarEvent::Expand,
    };
    assert_eq!(err.to_string(), "Illegal toolbar transition: Expand from Hidden");

    let err = ToolbarError::ControlUnavailable {
        mode: ToolbarMode::Default,
        button: ToolbarButton::Back,
    };
    assert_eq!(err.to_string(), "Toolbar control Back unavailable in Default mode");
}

#[test]
fn test_history_and_settings_display() {
    assert_eq!(
        HistoryError::IndexOutOfRange(4).to_string(),
        "History index out of range: 4"
    );
    assert_eq!(
        SettingsError::InvalidKey("foo".into()).to_string(),
        "Invalid settings key: foo"
    );
    assert_eq!(
        StoreError::CorruptRow("bad".into()).to_string(),
        "Corrupt session store row: bad"
    );
}

#[test]
fn test_shell_error_delegates_display_and_source() {
    let err: ShellError = NavigationError::InvalidInput("http://".into()).into();
    assert_eq!(err.to_string(), "Invalid URL: http://");
    assert!(err.source().is_some());

    let err: ShellError = TabError::NoActiveTab.into();
    assert!(matches!(err, ShellError::Tab(TabError::NoActiveTab)));

    assert!(ShellError::Closed.source().is_none());
    assert_eq!(ShellError::Closed.to_string(), "Browser session is closed");
}
