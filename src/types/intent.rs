use serde::{Deserialize, Serialize};

use super::content::ContentHandle;
use super::tab::TabId;
use super::toolbar::{SwipeDirection, ToolbarButton};

/// Every event the browser session reacts to, from the user or from content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Confirm action on the search field.
    SubmitText { text: String },
    /// A row of the history dropdown was picked.
    SelectHistory { index: usize },
    /// Pointer event outside the toolbar bounds.
    TapOutside,
    PressButton { button: ToolbarButton },
    Swipe { direction: SwipeDirection },
    /// Swipe on a tab-switcher card.
    SwipeCard { index: usize, direction: SwipeDirection },
    ShowTabSwitcher,
    HideTabSwitcher,
    SelectTab { id: TabId },
    SelectTabAt { index: usize },
    CloseTab { id: TabId },
    CloseTabAt { index: usize },
    LoadFinished {
        session: ContentHandle,
        final_url: Option<String>,
        title: Option<String>,
    },
    LoadFailed { session: ContentHandle, reason: String },
}
