//! Session task and the handle other tasks use to reach it.
//!
//! Each session runs in its own Tokio task that owns the [`Session`]
//! value. Everything else holds a [`SessionHandle`] and sends closures;
//! the task runs them one at a time, so session state needs no locks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::Session;

/// Work scheduled onto a session's task.
pub type SessionTask = Box<dyn FnOnce(&mut Session) + Send>;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Cloneable sender to one session's task.
#[derive(Clone)]
pub struct SessionHandle {
    id: u64,
    sender: mpsc::UnboundedSender<SessionTask>,
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle").field("id", &self.id).finish()
    }
}

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Queue `task` to run on the session's task. Returns false when the
    /// session has already ended.
    pub fn execute<F>(&self, task: F) -> bool
    where
        F: FnOnce(&mut Session) + Send + 'static,
    {
        self.sender.send(Box::new(task)).is_ok()
    }

    /// Report that one side's connection dropped. Endpoint implementors
    /// call this from their reader tasks so the session ends without
    /// waiting for other work.
    pub fn connection_lost(&self, reason: impl Into<String>) -> bool {
        let reason = reason.into();
        self.execute(move |session| session.disconnect(&reason))
    }

    /// The session task has stopped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving side of a session's task queue.
pub struct SessionInbox {
    receiver: mpsc::UnboundedReceiver<SessionTask>,
}

impl SessionInbox {
    /// Run every queued task without waiting. Used where no task runner
    /// is spawned.
    pub fn drain(&mut self, session: &mut Session) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task(session);
            ran += 1;
        }
        ran
    }
}

pub(crate) fn channel() -> (SessionHandle, SessionInbox) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
    (SessionHandle { id, sender }, SessionInbox { receiver })
}

/// Start the session's task. It runs queued work until the session closes.
///
/// When `[auth] pending_authentication_timeout` is non-zero, a sign-in that
/// has not finished by then disconnects the client.
pub fn spawn_session(session: Session, inbox: SessionInbox) -> JoinHandle<()> {
    let timeout = session.context().auth.pending_authentication_timeout;
    if timeout > 0 {
        let handle = session.handle().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(timeout)).await;
            handle.execute(Session::expire_pending_authentication);
        });
    }

    tokio::spawn(run(session, inbox))
}

async fn run(mut session: Session, mut inbox: SessionInbox) {
    info!(
        "Session {} started for {}",
        session.handle().id(),
        session.remote_address()
    );

    while let Some(task) = inbox.receiver.recv().await {
        task(&mut session);
        if session.is_closed() {
            break;
        }
    }

    // No-op when a task already disconnected; otherwise closes whichever
    // side is still open and unregisters the session.
    session.disconnect("disconnectionScreen.disconnected");
    debug!("Session {} task finished", session.handle().id());
}
