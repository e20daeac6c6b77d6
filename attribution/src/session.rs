use std::sync::Arc;

use clients::api::{Client, Error};
use log::{debug, error};
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::runner::AttributionRunner;
use crate::state::{Progress, RunState};
use crate::Notice;

/// How a run ended. `Completed` means the walk visited every discovered
/// repository reference; whether each one was actually processed is the
/// `finished` flag on the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Cancelled,
    Failed,
}

/// Final outcome of one attribution run.
#[derive(Debug)]
pub struct RunReport {
    pub state: RunState,
    pub status: RunStatus,
}

/// Owns at most one attribution run at a time.
///
/// `start` is a no-op while a run is in progress. The run executes as a
/// single spawned task which is the sole mutator of its run state, so no
/// locks guard the state; progress is observable through counter snapshots
/// published on a watch channel by that same task.
pub struct AttributionSession<CLIENT> {
    runner: Arc<AttributionRunner<CLIENT>>,
    notices: Sender<Notice>,
    progress_tx: watch::Sender<Progress>,
    progress_rx: watch::Receiver<Progress>,
    active: Option<ActiveRun>,
}

struct ActiveRun {
    cancel: CancellationToken,
    handle: JoinHandle<RunReport>,
}

impl<CLIENT> AttributionSession<CLIENT>
where
    CLIENT: 'static + Client,
{
    /// Notices emitted by runs land on `notices`; cancellation never does.
    pub fn new(runner: AttributionRunner<CLIENT>, notices: Sender<Notice>) -> Self {
        let (progress_tx, progress_rx) = watch::channel(Progress::default());
        AttributionSession {
            runner: Arc::new(runner),
            notices,
            progress_tx,
            progress_rx,
            active: None,
        }
    }

    /// Starts a run for `username`. Returns false without any network
    /// activity when a run is already in progress or the username is empty;
    /// the empty username additionally raises the `EmptyUsername` notice.
    pub fn start(&mut self, username: impl Into<String>) -> bool {
        let username = username.into();
        if self.is_running() {
            debug!("Ignoring start request, a run is already in progress");
            return false;
        }
        if username.is_empty() {
            let _ = self.notices.try_send(Notice::EmptyUsername);
            return false;
        }

        let _ = self.progress_tx.send(Progress::default());
        let runner = self.runner.clone();
        let notices = self.notices.clone();
        let progress = self.progress_tx.clone();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let (state, result) = runner.run(&username, token, notices.clone(), progress).await;
            let status = match result {
                Ok(()) => RunStatus::Completed,
                Err(Error::Cancelled) => {
                    debug!("Attribution run cancelled");
                    RunStatus::Cancelled
                }
                Err(err) => {
                    let _ = notices.send(Notice::RunFailed(err.to_string())).await;
                    RunStatus::Failed
                }
            };
            RunReport { state, status }
        });
        self.active = Some(ActiveRun { cancel, handle });
        true
    }

    pub fn is_running(&self) -> bool {
        self.active.as_ref().map_or(false, |run| !run.handle.is_finished())
    }

    /// Triggers cancellation of the active run, if any.
    pub fn cancel(&self) {
        if let Some(run) = &self.active {
            run.cancel.cancel();
        }
    }

    /// Latest counter snapshot of the active (or last) run.
    pub fn progress(&self) -> Progress {
        *self.progress_rx.borrow()
    }

    /// Awaits the active run and returns its report. The cancellation
    /// handle is discarded whichever way the run ended.
    pub async fn wait(&mut self) -> Option<RunReport> {
        let run = self.active.take()?;
        match run.handle.await {
            Ok(report) => Some(report),
            Err(err) => {
                error!("Attribution run task failed: {}", err);
                None
            }
        }
    }
}
