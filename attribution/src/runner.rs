use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use clients::api::{Client, Commit, Error, Repo, Result};
use log::{debug, warn};
use tokio::sync::mpsc::Sender;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::{Progress, RunState};
use crate::Notice;

/// Drives one attribution walk: fetches the user's repositories, visits
/// their commit listings one at a time and classifies every commit author.
///
/// The walk is a single sequential task. Cancellation is checked before each
/// repository fetch, raced against each request and against the pacing
/// pause, and re-checked per classified commit.
pub struct AttributionRunner<CLIENT> {
    client: Arc<CLIENT>,
    pacing: Duration,
}

impl<CLIENT> AttributionRunner<CLIENT>
where
    CLIENT: 'static + Client,
{
    /// `pacing` is the pause between repository requests. The 2 s default of
    /// the CLI keeps the walk within upstream rate limits; tests pass zero.
    pub fn new(client: CLIENT, pacing: Duration) -> Self {
        AttributionRunner {
            client: Arc::new(client),
            pacing,
        }
    }

    /// Runs the walk until completion, cancellation or a fatal error and
    /// returns the final run state next to the walk outcome. The `finished`
    /// flag is derived from the counters after the walk returns, whatever
    /// its outcome was.
    pub async fn run(
        &self,
        username: &str,
        cancel: CancellationToken,
        notices: Sender<Notice>,
        progress: watch::Sender<Progress>,
    ) -> (RunState, Result<()>) {
        let mut state = RunState::new(username);
        let result = self.walk(username, &mut state, &cancel, &notices, &progress).await;
        state.finalize();
        let _ = progress.send(state.progress());
        (state, result)
    }

    async fn walk(
        &self,
        username: &str,
        state: &mut RunState,
        cancel: &CancellationToken,
        notices: &Sender<Notice>,
        progress: &watch::Sender<Progress>,
    ) -> Result<()> {
        let repos = self.fetch_repositories(username, state, cancel).await?;
        let _ = progress.send(state.progress());
        for repo in repos {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            match checked(cancel, self.client.commits(&repo)).await {
                Ok(commits) => {
                    classify_commits(username, &commits, repo.commits_locator(), state, cancel)?;
                    state.record_repo_processed();
                    let _ = progress.send(state.progress());
                    self.pace(cancel).await?;
                }
                Err(err) if err.is_fatal() => return Err(err),
                // One bad repository does not sink the walk.
                Err(err) => {
                    warn!("Skipping repository {}: {}", repo.name(), err);
                    let notice = Notice::RepoSkipped {
                        repo: repo.name().to_string(),
                        reason: err.to_string(),
                    };
                    let _ = notices.send(notice).await;
                }
            }
        }
        Ok(())
    }

    async fn fetch_repositories(
        &self,
        username: &str,
        state: &mut RunState,
        cancel: &CancellationToken,
    ) -> Result<Vec<CLIENT::REPO>> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        let repos = checked(cancel, self.client.user_repos(username)).await?;
        state.record_discovered(repos.len() as u32);
        debug!("Found {} repositories of {}", repos.len(), username);
        Ok(repos)
    }

    async fn pace(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            _ = cancel.cancelled() => Err(Error::Cancelled),
            _ = tokio::time::sleep(self.pacing) => Ok(()),
        }
    }
}

/// Races a client request against cancellation so a triggered token does not
/// wait for the request to finish.
async fn checked<T, FUT>(cancel: &CancellationToken, request: FUT) -> Result<T>
where
    FUT: Future<Output = Result<T>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = request => result,
    }
}

/// Assigns every commit of one repository batch to an identity mapping.
///
/// A commit with no linked platform account lands in the unknown mapping
/// under both its author name and email. A commit whose linked handle equals
/// the target username lands in the username and email mappings. A commit
/// linked to any other account contributes to no mapping. All inserts are
/// first-write-wins; the commit counter moves for every record visited.
fn classify_commits(
    username: &str,
    commits: &[Commit],
    repo: &str,
    state: &mut RunState,
    cancel: &CancellationToken,
) -> Result<()> {
    for commit in commits {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match commit.author_login.as_deref() {
            None => {
                state.record_unknown(commit.author_name.clone(), repo);
                state.record_unknown(commit.author_email.clone(), repo);
            }
            Some(login) if login == username => {
                state.record_username(commit.author_name.clone(), repo);
                state.record_email(commit.author_email.clone(), repo);
            }
            // Linked to a different account.
            Some(_) => {}
        }
        state.record_commit();
    }
    Ok(())
}
