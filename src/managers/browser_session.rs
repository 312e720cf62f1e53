//! Browser session controller for MiniArc.
//!
//! Single owner of the tab registry, visit history and toolbar state. All
//! user gestures and content notifications arrive as one [`Intent`] through
//! [`BrowserSession::dispatch`]; the host reads back a [`ShellSnapshot`].

use crate::content::ContentHost;
use crate::managers::history_manager::{HistoryManagerTrait, VisitHistory};
use crate::managers::tab_manager::{TabRegistry, TabRegistryTrait};
use crate::managers::toolbar_manager::{ToolbarStateMachine, ToolbarStateMachineTrait};
use crate::services::url_resolver::{UrlResolver, UrlResolverTrait};
use crate::types::content::{ContentHandle, ResponseDecision};
use crate::types::errors::{ShellError, TabError, ToolbarError};
use crate::types::history::VisitRecord;
use crate::types::intent::Intent;
use crate::types::navigation::{NavigationTarget, TargetKind};
use crate::types::session::{SessionData, SessionTab, ShellSnapshot};
use crate::types::settings::ShellSettings;
use crate::types::tab::TabId;
use crate::types::toolbar::{
    SearchOrigin, SwipeDirection, ToolbarButton, ToolbarEvent, ToolbarMode,
};

pub struct BrowserSession<H: ContentHost> {
    host: H,
    resolver: UrlResolver,
    tabs: TabRegistry,
    history: VisitHistory,
    toolbar: ToolbarStateMachine,
    tab_switcher_open: bool,
    input_error: Option<String>,
    always_open_new_tab: bool,
}

impl<H: ContentHost> BrowserSession<H> {
    /// Creates an empty session: no tabs, toolbar in `Default`.
    pub fn new(host: H, settings: &ShellSettings) -> Result<Self, ShellError> {
        Ok(Self {
            host,
            resolver: UrlResolver::with_template(&settings.search.template)?,
            tabs: TabRegistry::with_policy(settings.tabs.close_policy),
            history: VisitHistory::with_limit(settings.history.max_entries),
            toolbar: ToolbarStateMachine::new(),
            tab_switcher_open: false,
            input_error: None,
            always_open_new_tab: settings.tabs.always_open_new_tab,
        })
    }

    /// Applies changed settings to a running session.
    pub fn apply_settings(&mut self, settings: &ShellSettings) -> Result<(), ShellError> {
        self.resolver = UrlResolver::with_template(&settings.search.template)?;
        self.tabs.set_close_policy(settings.tabs.close_policy);
        self.history.set_limit(settings.history.max_entries);
        self.always_open_new_tab = settings.tabs.always_open_new_tab;
        Ok(())
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ShellError> {
        log::debug!("dispatch {:?} in {:?}", intent, self.toolbar.mode());
        match intent {
            Intent::SubmitText { text } => self.submit_text(&text),
            Intent::SelectHistory { index } => self.select_history(index),
            Intent::TapOutside => {
                if self.toolbar.mode() == ToolbarMode::Searching {
                    self.input_error = None;
                    self.toolbar.handle(ToolbarEvent::DismissedOutside)?;
                }
                Ok(())
            }
            Intent::PressButton { button } => self.press_button(button),
            Intent::Swipe { direction } => self.swipe(direction),
            Intent::SwipeCard { index, direction } => {
                if self.tab_switcher_open && direction == SwipeDirection::Up {
                    let id = self.tabs.tab_at(index)?;
                    self.close_tab(id)?;
                }
                Ok(())
            }
            Intent::ShowTabSwitcher => self.show_tab_switcher(),
            Intent::HideTabSwitcher => {
                self.tab_switcher_open = false;
                if self.tabs.active_tab_id().is_some() {
                    self.toolbar.handle(ToolbarEvent::BrowsingRequested)?;
                }
                Ok(())
            }
            Intent::SelectTab { id } => self.select_tab(id),
            Intent::SelectTabAt { index } => {
                let id = self.tabs.tab_at(index)?;
                self.select_tab(id)
            }
            Intent::CloseTab { id } => self.close_tab(id),
            Intent::CloseTabAt { index } => {
                let id = self.tabs.tab_at(index)?;
                self.close_tab(id)
            }
            Intent::LoadFinished {
                session,
                final_url,
                title,
            } => self.load_finished(session, final_url.as_deref(), title.as_deref()),
            Intent::LoadFailed { session, reason } => {
                let tab = self.tabs.mark_load_failed(session)?;
                log::warn!("load failed in tab {}: {}", tab, reason);
                Ok(())
            }
        }
    }

    /// Response policy hook; every response is allowed.
    pub fn on_response_received(&self, session: ContentHandle, status: u16) -> ResponseDecision {
        if status == 404 {
            let tab = self
                .tabs
                .tab_for_session(session)
                .map(|id| id.to_string())
                .unwrap_or_else(|| "?".to_string());
            log::warn!("404 response in tab {} (session {})", tab, session);
        }
        ResponseDecision::Allow
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let mode = self.toolbar.mode();
        let active = self.tabs.get_active_tab().map(|t| t.content);
        ShellSnapshot {
            mode,
            controls: mode.controls().to_vec(),
            tabs: self.tabs.summaries(),
            active_tab: self.tabs.active_tab_id(),
            tab_switcher_open: self.tab_switcher_open,
            history: if mode == ToolbarMode::Searching {
                self.history.list_history().into_iter().cloned().collect()
            } else {
                Vec::new()
            },
            input_error: self.input_error.clone(),
            can_go_back: active.is_some_and(|h| self.host.can_go_back(h)),
            can_go_forward: active.is_some_and(|h| self.host.can_go_forward(h)),
        }
    }

    /// Tab layout for the session store.
    pub fn export_session(&self, timestamp: i64) -> SessionData {
        let active = self.tabs.active_tab_id();
        SessionData {
            tabs: self
                .tabs
                .tabs()
                .iter()
                .map(|t| SessionTab {
                    url: t.resume_url().map(str::to_string),
                    title: t.title.clone(),
                })
                .collect(),
            active_index: active.and_then(|id| self.tabs.position_of(id)),
            timestamp,
        }
    }

    /// Reopens saved tabs, re-navigating those that had a URL. Titles are
    /// kept until the pages finish loading again.
    pub fn restore_session(&mut self, data: &SessionData) -> Result<(), ShellError> {
        let mut opened = Vec::with_capacity(data.tabs.len());
        for saved in &data.tabs {
            let target = saved.url.as_ref().map(|url| NavigationTarget {
                url: url.clone(),
                kind: TargetKind::Absolute,
            });
            let id = self.tabs.create_tab(&mut self.host, target.as_ref());
            self.tabs.set_title(id, &saved.title)?;
            opened.push(id);
        }
        if let Some(&id) = data.active_index.and_then(|i| opened.get(i)) {
            self.tabs.switch_to(&mut self.host, id)?;
        }
        if !opened.is_empty() {
            self.toolbar.handle(ToolbarEvent::BrowsingRequested)?;
        }
        log::info!("restored {} tabs", opened.len());
        Ok(())
    }

    /// Reloads visits saved by an earlier run, newest first.
    ///
    /// Tab ids stay unique across runs: new tabs are numbered above any
    /// tab id found in `visits`.
    pub fn restore_history(&mut self, visits: Vec<VisitRecord>) {
        if let Some(max) = visits.iter().map(|v| v.tab_id).max() {
            self.tabs.reserve_ids_through(max);
        }
        self.history.restore(visits);
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn tabs(&self) -> &TabRegistry {
        &self.tabs
    }

    pub fn history(&self) -> &VisitHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut VisitHistory {
        &mut self.history
    }

    pub fn mode(&self) -> ToolbarMode {
        self.toolbar.mode()
    }

    pub fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    pub fn input_error(&self) -> Option<&str> {
        self.input_error.as_deref()
    }

    pub fn tab_switcher_open(&self) -> bool {
        self.tab_switcher_open
    }

    fn require_searching(&self, event: ToolbarEvent) -> Result<(), ToolbarError> {
        match self.toolbar.mode() {
            ToolbarMode::Searching => Ok(()),
            from => Err(ToolbarError::IllegalTransition { from, event }),
        }
    }

    fn submit_text(&mut self, text: &str) -> Result<(), ShellError> {
        self.require_searching(ToolbarEvent::Submitted)?;
        self.submit_resolved(text, ToolbarEvent::Submitted)
    }

    fn select_history(&mut self, index: usize) -> Result<(), ShellError> {
        self.require_searching(ToolbarEvent::HistorySelected)?;
        let url_string = self.history.get_entry(index)?.url_string.clone();
        self.submit_resolved(&url_string, ToolbarEvent::HistorySelected)
    }

    /// Resolves `text`, opens it and leaves Searching through `event`.
    fn submit_resolved(&mut self, text: &str, event: ToolbarEvent) -> Result<(), ShellError> {
        let target = match self.resolver.resolve(text) {
            Ok(target) => target,
            Err(e) => {
                log::warn!("{}", e);
                self.input_error = Some(e.to_string());
                return Err(e.into());
            }
        };
        self.open_target(&target)?;
        self.toolbar.handle(event)?;
        Ok(())
    }

    /// Sends a resolved target to a new tab or the active one.
    fn open_target(&mut self, target: &NavigationTarget) -> Result<TabId, ShellError> {
        self.input_error = None;
        self.tab_switcher_open = false;
        let new_tab = self.always_open_new_tab
            || self.toolbar.search_origin() == Some(SearchOrigin::NewTab);

        match self.tabs.active_tab_id() {
            Some(active) if !new_tab => {
                self.tabs.navigate(&mut self.host, active, target)?;
                log::info!("tab {} -> {}", active, target.url);
                Ok(active)
            }
            _ => {
                let id = self.tabs.create_tab(&mut self.host, Some(target));
                log::info!("new tab {} -> {}", id, target.url);
                Ok(id)
            }
        }
    }

    fn press_button(&mut self, button: ToolbarButton) -> Result<(), ShellError> {
        self.toolbar.check_control(button)?;
        match button {
            ToolbarButton::NewTab => {
                self.toolbar.handle(ToolbarEvent::NewTabPressed)?;
            }
            ToolbarButton::Address => {
                self.toolbar.handle(ToolbarEvent::AddressTapped)?;
            }
            ToolbarButton::Tabs => self.show_tab_switcher()?,
            ToolbarButton::Expand => {
                self.toolbar.handle(ToolbarEvent::Expand)?;
            }
            ToolbarButton::Collapse => {
                self.toolbar.handle(ToolbarEvent::Collapse)?;
            }
            ToolbarButton::Back => {
                let handle = self.active_content()?;
                if self.host.can_go_back(handle) {
                    self.host.go_back(handle);
                }
            }
            ToolbarButton::Forward => {
                let handle = self.active_content()?;
                if self.host.can_go_forward(handle) {
                    self.host.go_forward(handle);
                }
            }
            ToolbarButton::Reload => {
                let handle = self.active_content()?;
                self.host.reload(handle);
            }
        }
        Ok(())
    }

    /// Gestures that make no sense in the current state are ignored.
    fn swipe(&mut self, direction: SwipeDirection) -> Result<(), ShellError> {
        if self.tab_switcher_open {
            return Ok(());
        }
        match direction {
            SwipeDirection::Right => {
                if let Ok(handle) = self.active_content() {
                    if self.host.can_go_back(handle) {
                        self.host.go_back(handle);
                    }
                }
            }
            SwipeDirection::Left => {
                if let Ok(handle) = self.active_content() {
                    if self.host.can_go_forward(handle) {
                        self.host.go_forward(handle);
                    }
                }
            }
            SwipeDirection::Up if self.toolbar.mode() == ToolbarMode::Browsing => {
                self.toolbar.handle(ToolbarEvent::SwipedAway)?;
            }
            SwipeDirection::Down if self.toolbar.mode() == ToolbarMode::Hidden => {
                self.toolbar.handle(ToolbarEvent::SwipedBack)?;
            }
            _ => log::debug!("ignored {:?} swipe in {:?}", direction, self.toolbar.mode()),
        }
        Ok(())
    }

    fn show_tab_switcher(&mut self) -> Result<(), ShellError> {
        self.tab_switcher_open = true;
        self.input_error = None;
        self.toolbar.handle(ToolbarEvent::TabSwitcherShown)?;
        Ok(())
    }

    fn select_tab(&mut self, id: TabId) -> Result<(), ShellError> {
        self.tabs.switch_to(&mut self.host, id)?;
        self.tab_switcher_open = false;
        self.toolbar.handle(ToolbarEvent::BrowsingRequested)?;
        Ok(())
    }

    fn close_tab(&mut self, id: TabId) -> Result<(), ShellError> {
        self.tabs.close_tab(&mut self.host, id)?;
        if self.tabs.tab_count() == 0 {
            self.tab_switcher_open = false;
            self.toolbar.handle(ToolbarEvent::AllTabsClosed)?;
        }
        Ok(())
    }

    fn load_finished(
        &mut self,
        session: ContentHandle,
        final_url: Option<&str>,
        title: Option<&str>,
    ) -> Result<(), ShellError> {
        let Some(tab_id) = self.tabs.tab_for_session(session) else {
            log::warn!("load finished for unknown session {}", session);
            return Err(TabError::UnknownSession(session).into());
        };
        let record = self.tabs.on_load_finished(tab_id, final_url, title)?;
        log::info!("tab {} loaded {}", tab_id, record.url_string);
        self.history.record_visit(record);
        Ok(())
    }

    fn active_content(&self) -> Result<ContentHandle, TabError> {
        self.tabs
            .get_active_tab()
            .map(|t| t.content)
            .ok_or(TabError::NoActiveTab)
    }
}
