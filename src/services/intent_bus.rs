//! Intent bus for hosts that deliver events from several threads.
//!
//! The session is moved into one tokio task; every intent goes through a
//! single bounded channel and is applied in arrival order, so the tab list
//! and active-tab pointer are only ever mutated by that task.
//!
//! Host state such as queued [`HostCommand`](crate::content::HostCommand)s
//! stays inside the task; read or drain it with [`IntentSender::with_session`].

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::content::ContentHost;
use crate::managers::browser_session::BrowserSession;
use crate::types::content::{ContentHandle, ResponseDecision};
use crate::types::errors::ShellError;
use crate::types::intent::Intent;
use crate::types::session::ShellSnapshot;

const CHANNEL_CAPACITY: usize = 64;

type SessionJob<H> = Box<dyn FnOnce(&mut BrowserSession<H>) + Send>;

enum SessionCommand<H: ContentHost> {
    Dispatch {
        intent: Intent,
        reply: oneshot::Sender<Result<ShellSnapshot, ShellError>>,
    },
    Snapshot {
        reply: oneshot::Sender<ShellSnapshot>,
    },
    Response {
        session: ContentHandle,
        status: u16,
        reply: oneshot::Sender<ResponseDecision>,
    },
    Run {
        job: SessionJob<H>,
    },
}

/// Cloneable sender side of a running session task.
pub struct IntentSender<H: ContentHost> {
    tx: mpsc::Sender<SessionCommand<H>>,
}

impl<H: ContentHost> Clone for IntentSender<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<H: ContentHost + 'static> IntentSender<H> {
    /// Applies one intent and returns the state right after it.
    pub async fn dispatch(&self, intent: Intent) -> Result<ShellSnapshot, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Dispatch { intent, reply })
            .await
            .map_err(|_| ShellError::Closed)?;
        rx.await.map_err(|_| ShellError::Closed)?
    }

    pub async fn snapshot(&self) -> Result<ShellSnapshot, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Snapshot { reply })
            .await
            .map_err(|_| ShellError::Closed)?;
        rx.await.map_err(|_| ShellError::Closed)
    }

    pub async fn response_received(
        &self,
        session: ContentHandle,
        status: u16,
    ) -> Result<ResponseDecision, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Response {
                session,
                status,
                reply,
            })
            .await
            .map_err(|_| ShellError::Closed)?;
        rx.await.map_err(|_| ShellError::Closed)
    }

    /// Runs `f` on the session inside the task, in order with intents.
    ///
    /// ```ignore
    /// let commands = sender.with_session(|s| s.host_mut().drain_commands()).await?;
    /// ```
    pub async fn with_session<F, R>(&self, f: F) -> Result<R, ShellError>
    where
        F: FnOnce(&mut BrowserSession<H>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, rx) = oneshot::channel();
        let job: SessionJob<H> = Box::new(move |session| {
            let _ = reply.send(f(session));
        });
        self.tx
            .send(SessionCommand::Run { job })
            .await
            .map_err(|_| ShellError::Closed)?;
        rx.await.map_err(|_| ShellError::Closed)
    }
}

/// Moves `session` into a task on the current runtime.
///
/// The task ends once every [`IntentSender`] is dropped and hands the
/// session back through the join handle.
pub fn spawn_session<H>(
    session: BrowserSession<H>,
) -> (IntentSender<H>, JoinHandle<BrowserSession<H>>)
where
    H: ContentHost + Send + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let task = tokio::spawn(run_session(session, rx));
    (IntentSender { tx }, task)
}

async fn run_session<H: ContentHost>(
    mut session: BrowserSession<H>,
    mut rx: mpsc::Receiver<SessionCommand<H>>,
) -> BrowserSession<H> {
    while let Some(command) = rx.recv().await {
        match command {
            SessionCommand::Dispatch { intent, reply } => {
                let result = session.dispatch(intent).map(|_| session.snapshot());
                if let Err(e) = &result {
                    log::debug!("intent rejected: {}", e);
                }
                // The caller may have stopped waiting.
                let _ = reply.send(result);
            }
            SessionCommand::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
            SessionCommand::Response {
                session: handle,
                status,
                reply,
            } => {
                let _ = reply.send(session.on_response_received(handle, status));
            }
            SessionCommand::Run { job } => job(&mut session),
        }
    }
    log::debug!("session task stopped");
    session
}
