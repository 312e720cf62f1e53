//! In-memory content host.
//!
//! Keeps a back/forward stack per session and queues a [`HostCommand`] for
//! every request so a remote UI (see the `miniarc-rpc` binary) can replay
//! them against real web views. Tests use it as the content collaborator.
//!
//! The queue only shrinks through [`HeadlessHost::drain_commands`]. A session
//! running under the intent bus drains it with
//! [`IntentSender::with_session`](crate::services::intent_bus::IntentSender::with_session).

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::ContentHost;
use crate::types::content::ContentHandle;

/// Most recent releases kept for [`HeadlessHost::released_sessions`].
const RELEASE_LOG_CAPACITY: usize = 256;

/// Instruction for the process that owns the real web views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    CreateSession { session: ContentHandle },
    ReleaseSession { session: ContentHandle },
    Attach { session: ContentHandle },
    Detach { session: ContentHandle },
    Load { session: ContentHandle, url: String },
    Reload { session: ContentHandle },
    GoBack { session: ContentHandle },
    GoForward { session: ContentHandle },
}

#[derive(Debug, Default)]
struct SessionState {
    back_stack: Vec<String>,
    current: Option<String>,
    forward_stack: Vec<String>,
}

/// Content host that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    sessions: HashMap<ContentHandle, SessionState>,
    next_handle: u64,
    attached: Option<ContentHandle>,
    released: VecDeque<ContentHandle>,
    release_count: usize,
    outbox: Vec<HostCommand>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every queued command, oldest first.
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.outbox)
    }

    /// Commands queued since the last drain.
    pub fn pending_commands(&self) -> &[HostCommand] {
        &self.outbox
    }

    /// Session currently on the display surface.
    pub fn attached(&self) -> Option<ContentHandle> {
        self.attached
    }

    pub fn is_live(&self, handle: ContentHandle) -> bool {
        self.sessions.contains_key(&handle)
    }

    pub fn live_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// The most recently released handles, oldest first.
    pub fn released_sessions(&self) -> Vec<ContentHandle> {
        self.released.iter().copied().collect()
    }

    /// Number of sessions released over the host's lifetime.
    pub fn release_count(&self) -> usize {
        self.release_count
    }

    /// Page the session is showing (or loading).
    pub fn current_url(&self, handle: ContentHandle) -> Option<&str> {
        self.sessions
            .get(&handle)
            .and_then(|s| s.current.as_deref())
    }
}

impl ContentHost for HeadlessHost {
    fn create_session(&mut self) -> ContentHandle {
        self.next_handle += 1;
        let handle = ContentHandle(self.next_handle);
        self.sessions.insert(handle, SessionState::default());
        self.outbox.push(HostCommand::CreateSession { session: handle });
        handle
    }

    fn release_session(&mut self, handle: ContentHandle) {
        if self.sessions.remove(&handle).is_none() {
            log::warn!("release of unknown content session {}", handle);
            return;
        }
        if self.attached == Some(handle) {
            self.attached = None;
        }
        if self.released.len() == RELEASE_LOG_CAPACITY {
            self.released.pop_front();
        }
        self.released.push_back(handle);
        self.release_count += 1;
        self.outbox.push(HostCommand::ReleaseSession { session: handle });
    }

    fn attach(&mut self, handle: ContentHandle) {
        self.attached = Some(handle);
        self.outbox.push(HostCommand::Attach { session: handle });
    }

    fn detach(&mut self, handle: ContentHandle) {
        if self.attached == Some(handle) {
            self.attached = None;
        }
        self.outbox.push(HostCommand::Detach { session: handle });
    }

    fn load(&mut self, handle: ContentHandle, url: &str) {
        let Some(state) = self.sessions.get_mut(&handle) else {
            log::warn!("load on unknown content session {}", handle);
            return;
        };
        if let Some(previous) = state.current.take() {
            state.back_stack.push(previous);
        }
        state.forward_stack.clear();
        state.current = Some(url.to_string());
        self.outbox.push(HostCommand::Load {
            session: handle,
            url: url.to_string(),
        });
    }

    fn reload(&mut self, handle: ContentHandle) {
        if self.sessions.contains_key(&handle) {
            self.outbox.push(HostCommand::Reload { session: handle });
        }
    }

    fn go_back(&mut self, handle: ContentHandle) {
        let Some(state) = self.sessions.get_mut(&handle) else {
            return;
        };
        let Some(previous) = state.back_stack.pop() else {
            return;
        };
        if let Some(current) = state.current.take() {
            state.forward_stack.push(current);
        }
        state.current = Some(previous);
        self.outbox.push(HostCommand::GoBack { session: handle });
    }

    fn go_forward(&mut self, handle: ContentHandle) {
        let Some(state) = self.sessions.get_mut(&handle) else {
            return;
        };
        let Some(next) = state.forward_stack.pop() else {
            return;
        };
        if let Some(current) = state.current.take() {
            state.back_stack.push(current);
        }
        state.current = Some(next);
        self.outbox.push(HostCommand::GoForward { session: handle });
    }

    fn can_go_back(&self, handle: ContentHandle) -> bool {
        self.sessions
            .get(&handle)
            .is_some_and(|s| !s.back_stack.is_empty())
    }

    fn can_go_forward(&self, handle: ContentHandle) -> bool {
        self.sessions
            .get(&handle)
            .is_some_and(|s| !s.forward_stack.is_empty())
    }
}
