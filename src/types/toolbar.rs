use serde::{Deserialize, Serialize};

/// The bottom bar's display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarMode {
    /// Nothing has been browsed yet, or the tab switcher is showing.
    Default,
    Browsing,
    Searching,
    Info,
    Hidden,
}

impl ToolbarMode {
    pub const ALL: [ToolbarMode; 5] = [
        ToolbarMode::Default,
        ToolbarMode::Browsing,
        ToolbarMode::Searching,
        ToolbarMode::Info,
        ToolbarMode::Hidden,
    ];

    /// Buttons the host shows for this mode.
    pub fn controls(self) -> &'static [ToolbarButton] {
        match self {
            ToolbarMode::Default => &[ToolbarButton::NewTab, ToolbarButton::Tabs],
            ToolbarMode::Browsing => &[
                ToolbarButton::Tabs,
                ToolbarButton::Address,
                ToolbarButton::NewTab,
                ToolbarButton::Expand,
            ],
            ToolbarMode::Searching | ToolbarMode::Hidden => &[],
            ToolbarMode::Info => &[
                ToolbarButton::Back,
                ToolbarButton::Forward,
                ToolbarButton::Reload,
                ToolbarButton::Collapse,
            ],
        }
    }

    pub fn shows(self, button: ToolbarButton) -> bool {
        self.controls().contains(&button)
    }
}

/// Buttons on the bottom bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarButton {
    NewTab,
    Address,
    Tabs,
    Expand,
    Collapse,
    Back,
    Forward,
    Reload,
}

/// Directional swipe in the content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// How the search field was opened; decides where a submission goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrigin {
    NewTab,
    Address,
}

/// Inputs to the toolbar state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarEvent {
    NewTabPressed,
    AddressTapped,
    Expand,
    Collapse,
    SwipedAway,
    SwipedBack,
    Submitted,
    /// A history row was picked while searching.
    HistorySelected,
    DismissedOutside,
    TabSwitcherShown,
    /// The last tab was closed.
    AllTabsClosed,
    /// A tab was created, selected or navigated.
    BrowsingRequested,
}
