use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::content::ContentHost;
use crate::types::content::ContentHandle;
use crate::types::errors::TabError;
use crate::types::history::VisitRecord;
use crate::types::navigation::NavigationTarget;
use crate::types::settings::ClosePolicy;
use crate::types::tab::{Tab, TabId, TabSummary, UNTITLED};

/// Trait defining the tab registry interface.
///
/// Operations that touch content sessions take the host explicitly; the
/// registry owns handles, never the sessions behind them.
pub trait TabRegistryTrait {
    fn create_tab(&mut self, host: &mut dyn ContentHost, target: Option<&NavigationTarget>)
        -> TabId;
    fn switch_to(&mut self, host: &mut dyn ContentHost, tab_id: TabId) -> Result<(), TabError>;
    fn close_tab(
        &mut self,
        host: &mut dyn ContentHost,
        tab_id: TabId,
    ) -> Result<Option<TabId>, TabError>;
    fn navigate(
        &mut self,
        host: &mut dyn ContentHost,
        tab_id: TabId,
        target: &NavigationTarget,
    ) -> Result<(), TabError>;
    fn on_load_finished(
        &mut self,
        tab_id: TabId,
        final_url: Option<&str>,
        title: Option<&str>,
    ) -> Result<VisitRecord, TabError>;
    fn mark_load_failed(&mut self, handle: ContentHandle) -> Result<TabId, TabError>;
    fn set_title(&mut self, tab_id: TabId, title: &str) -> Result<(), TabError>;
    fn tab_for_session(&self, handle: ContentHandle) -> Option<TabId>;
    fn get_tab(&self, tab_id: TabId) -> Option<&Tab>;
    fn get_active_tab(&self) -> Option<&Tab>;
    fn active_tab_id(&self) -> Option<TabId>;
    fn tabs(&self) -> &[Tab];
    fn tab_order(&self) -> Vec<TabId>;
    fn tab_at(&self, index: usize) -> Result<TabId, TabError>;
    fn position_of(&self, tab_id: TabId) -> Option<usize>;
    fn tab_count(&self) -> usize;
    fn summaries(&self) -> Vec<TabSummary>;
}

/// In-memory registry of open tabs, kept in display order.
pub struct TabRegistry {
    tabs: Vec<Tab>,
    active_tab_id: Option<TabId>,
    next_id: u64,
    close_policy: ClosePolicy,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::with_policy(ClosePolicy::default())
    }

    pub fn with_policy(close_policy: ClosePolicy) -> Self {
        Self {
            tabs: Vec::new(),
            active_tab_id: None,
            next_id: 1,
            close_policy,
        }
    }

    pub fn close_policy(&self) -> ClosePolicy {
        self.close_policy
    }

    pub fn set_close_policy(&mut self, policy: ClosePolicy) {
        self.close_policy = policy;
    }

    /// Makes sure future ids are greater than `used`, e.g. ids found in
    /// visits from an earlier run.
    pub fn reserve_ids_through(&mut self, used: TabId) {
        self.next_id = self.next_id.max(used.0.saturating_add(1));
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn find_tab_index(&self, tab_id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: TabId) -> Result<&mut Tab, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or(TabError::NotFound(tab_id))
    }

    /// Index of the tab that takes over after removing `removed` from a
    /// list that now has `remaining` entries.
    fn successor_index(&self, removed: usize, remaining: usize) -> usize {
        match self.close_policy {
            ClosePolicy::Previous => removed.saturating_sub(1),
            ClosePolicy::Next => removed.min(remaining - 1),
        }
    }
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistryTrait for TabRegistry {
    /// Opens a tab at the end of the list and makes it active.
    /// Navigates it right away when a target is given.
    fn create_tab(
        &mut self,
        host: &mut dyn ContentHost,
        target: Option<&NavigationTarget>,
    ) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;

        let content = host.create_session();
        if let Some(target) = target {
            host.load(content, target.as_str());
        }

        self.tabs.push(Tab {
            id,
            content,
            title: UNTITLED.to_string(),
            url: None,
            pending_url: target.map(|t| t.url.clone()),
            loading: target.is_some(),
            created_at: Self::now(),
        });

        if let Some(previous) = self.get_active_tab().map(|t| t.content) {
            host.detach(previous);
        }
        host.attach(content);
        self.active_tab_id = Some(id);

        log::debug!("created tab {} with content session {}", id, content);
        id
    }

    fn switch_to(&mut self, host: &mut dyn ContentHost, tab_id: TabId) -> Result<(), TabError> {
        let target = self
            .get_tab(tab_id)
            .map(|t| t.content)
            .ok_or(TabError::NotFound(tab_id))?;

        if self.active_tab_id == Some(tab_id) {
            return Ok(());
        }
        if let Some(previous) = self.get_active_tab().map(|t| t.content) {
            host.detach(previous);
        }
        host.attach(target);
        self.active_tab_id = Some(tab_id);
        Ok(())
    }

    /// Closes a tab and releases its content session.
    /// Returns the tab that is active afterwards, if any remain.
    fn close_tab(
        &mut self,
        host: &mut dyn ContentHost,
        tab_id: TabId,
    ) -> Result<Option<TabId>, TabError> {
        let index = self
            .find_tab_index(tab_id)
            .ok_or(TabError::NotFound(tab_id))?;

        let was_active = self.active_tab_id == Some(tab_id);
        let closed = self.tabs.remove(index);
        if was_active {
            host.detach(closed.content);
        }
        host.release_session(closed.content);
        log::debug!("closed tab {} (session {})", tab_id, closed.content);

        if self.tabs.is_empty() {
            self.active_tab_id = None;
            return Ok(None);
        }

        if was_active {
            let next = &self.tabs[self.successor_index(index, self.tabs.len())];
            host.attach(next.content);
            self.active_tab_id = Some(next.id);
        }
        Ok(self.active_tab_id)
    }

    fn navigate(
        &mut self,
        host: &mut dyn ContentHost,
        tab_id: TabId,
        target: &NavigationTarget,
    ) -> Result<(), TabError> {
        let tab = self.tab_mut(tab_id)?;
        tab.loading = true;
        tab.pending_url = Some(target.url.clone());
        host.load(tab.content, target.as_str());
        Ok(())
    }

    /// Stores the page the tab ended up on and builds its visit record.
    fn on_load_finished(
        &mut self,
        tab_id: TabId,
        final_url: Option<&str>,
        title: Option<&str>,
    ) -> Result<VisitRecord, TabError> {
        let tab = self.tab_mut(tab_id)?;

        let url_string = final_url
            .map(str::to_string)
            .or_else(|| tab.pending_url.take())
            .or_else(|| tab.url.clone())
            .unwrap_or_default();
        let title = match title {
            None => UNTITLED.to_string(),
            Some("") if url_string.is_empty() => UNTITLED.to_string(),
            Some("") => url_string.clone(),
            Some(t) => t.to_string(),
        };

        tab.loading = false;
        tab.pending_url = None;
        tab.title = title.clone();
        if !url_string.is_empty() {
            tab.url = Some(url_string.clone());
        }

        let url = url::Url::parse(&url_string)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| url_string.clone());

        Ok(VisitRecord {
            id: Uuid::new_v4().to_string(),
            tab_id,
            url,
            url_string,
            title,
            visited_at: Self::now(),
        })
    }

    /// Keeps the pending URL so a failed tab still reopens on its request.
    fn mark_load_failed(&mut self, handle: ContentHandle) -> Result<TabId, TabError> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.content == handle)
            .ok_or(TabError::UnknownSession(handle))?;
        tab.loading = false;
        Ok(tab.id)
    }

    fn set_title(&mut self, tab_id: TabId, title: &str) -> Result<(), TabError> {
        self.tab_mut(tab_id)?.title = title.to_string();
        Ok(())
    }

    fn tab_for_session(&self, handle: ContentHandle) -> Option<TabId> {
        self.tabs.iter().find(|t| t.content == handle).map(|t| t.id)
    }

    fn get_tab(&self, tab_id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn get_active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.and_then(|id| self.get_tab(id))
    }

    fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Display projection: position in the switcher → tab id.
    fn tab_order(&self) -> Vec<TabId> {
        self.tabs.iter().map(|t| t.id).collect()
    }

    fn tab_at(&self, index: usize) -> Result<TabId, TabError> {
        self.tabs
            .get(index)
            .map(|t| t.id)
            .ok_or(TabError::InvalidIndex(index))
    }

    fn position_of(&self, tab_id: TabId) -> Option<usize> {
        self.find_tab_index(tab_id)
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    fn summaries(&self) -> Vec<TabSummary> {
        self.tabs
            .iter()
            .enumerate()
            .map(|(position, t)| TabSummary {
                id: t.id,
                position,
                title: t.title.clone(),
                url: t.url.clone(),
                loading: t.loading,
                active: self.active_tab_id == Some(t.id),
            })
            .collect()
    }
}
