//! Toolbar state machine for MiniArc.
//!
//! Owns the bottom bar's mode. Every change of visible controls goes
//! through [`ToolbarStateMachine::handle`]; events the current mode does not
//! accept are rejected and leave the mode untouched.

use crate::types::errors::ToolbarError;
use crate::types::toolbar::{SearchOrigin, ToolbarButton, ToolbarEvent, ToolbarMode};

/// Trait defining the toolbar state machine interface.
pub trait ToolbarStateMachineTrait {
    fn mode(&self) -> ToolbarMode;
    fn handle(&mut self, event: ToolbarEvent) -> Result<ToolbarMode, ToolbarError>;
    fn search_origin(&self) -> Option<SearchOrigin>;
    fn check_control(&self, button: ToolbarButton) -> Result<(), ToolbarError>;
}

#[derive(Debug)]
pub struct ToolbarStateMachine {
    mode: ToolbarMode,
    search_origin: Option<SearchOrigin>,
    /// Where a dismissed search goes back to.
    return_mode: ToolbarMode,
}

impl ToolbarStateMachine {
    pub fn new() -> Self {
        Self {
            mode: ToolbarMode::Default,
            search_origin: None,
            return_mode: ToolbarMode::Default,
        }
    }

    fn enter_search(&mut self, origin: SearchOrigin) -> ToolbarMode {
        self.search_origin = Some(origin);
        self.return_mode = self.mode;
        ToolbarMode::Searching
    }
}

impl Default for ToolbarStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolbarStateMachineTrait for ToolbarStateMachine {
    fn mode(&self) -> ToolbarMode {
        self.mode
    }

    fn handle(&mut self, event: ToolbarEvent) -> Result<ToolbarMode, ToolbarError> {
        use ToolbarEvent as E;
        use ToolbarMode as M;

        let next = match (self.mode, event) {
            (_, E::TabSwitcherShown | E::AllTabsClosed) => M::Default,
            (_, E::BrowsingRequested) => M::Browsing,
            (M::Default | M::Browsing, E::NewTabPressed) => self.enter_search(SearchOrigin::NewTab),
            (M::Browsing, E::AddressTapped) => self.enter_search(SearchOrigin::Address),
            (M::Browsing, E::Expand) => M::Info,
            (M::Browsing, E::SwipedAway) => M::Hidden,
            (M::Searching, E::Submitted | E::HistorySelected) => M::Browsing,
            (M::Searching, E::DismissedOutside) => self.return_mode,
            (M::Info, E::Collapse) => M::Browsing,
            (M::Hidden, E::SwipedBack) => M::Browsing,
            (from, event) => return Err(ToolbarError::IllegalTransition { from, event }),
        };

        if next != M::Searching {
            self.search_origin = None;
        }
        if next != self.mode {
            log::debug!("toolbar {:?} -> {:?} on {:?}", self.mode, next, event);
        }
        self.mode = next;
        Ok(next)
    }

    fn search_origin(&self) -> Option<SearchOrigin> {
        self.search_origin
    }

    fn check_control(&self, button: ToolbarButton) -> Result<(), ToolbarError> {
        if self.mode.shows(button) {
            Ok(())
        } else {
            Err(ToolbarError::ControlUnavailable {
                mode: self.mode,
                button,
            })
        }
    }
}
