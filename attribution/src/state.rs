use std::collections::HashMap;

/// Locator of the repository an identity was first observed in.
pub type RepoLocator = String;

/// Counter snapshot published while a run is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    pub repos_discovered: u32,
    pub repos_processed: u32,
    pub commits_processed: u32,
}

impl Progress {
    pub fn percent(&self) -> f32 {
        if self.repos_discovered == 0 {
            return 0.0;
        }
        self.repos_processed as f32 / self.repos_discovered as f32 * 100.0
    }
}

/// Mutable record of one attribution run. Created when the run starts,
/// mutated only by the run's single task, read-only afterwards.
#[derive(Debug, Default)]
pub struct RunState {
    username: String,
    username_mapping: HashMap<String, RepoLocator>,
    email_mapping: HashMap<String, RepoLocator>,
    unknown_mapping: HashMap<String, RepoLocator>,
    repos_discovered: u32,
    repos_processed: u32,
    commits_processed: u32,
    finished: bool,
}

impl RunState {
    pub fn new(username: impl Into<String>) -> Self {
        RunState {
            username: username.into(),
            ..RunState::default()
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Display names of commits attributed to the target user.
    pub fn username_mapping(&self) -> &HashMap<String, RepoLocator> {
        &self.username_mapping
    }

    /// Emails of commits attributed to the target user.
    pub fn email_mapping(&self) -> &HashMap<String, RepoLocator> {
        &self.email_mapping
    }

    /// Names and emails of commits with no linked platform account.
    pub fn unknown_mapping(&self) -> &HashMap<String, RepoLocator> {
        &self.unknown_mapping
    }

    pub fn repos_discovered(&self) -> u32 {
        self.repos_discovered
    }

    pub fn repos_processed(&self) -> u32 {
        self.repos_processed
    }

    pub fn commits_processed(&self) -> u32 {
        self.commits_processed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> Progress {
        Progress {
            repos_discovered: self.repos_discovered,
            repos_processed: self.repos_processed,
            commits_processed: self.commits_processed,
        }
    }

    pub(crate) fn record_discovered(&mut self, count: u32) {
        self.repos_discovered = count;
    }

    pub(crate) fn record_repo_processed(&mut self) {
        self.repos_processed += 1;
    }

    pub(crate) fn record_commit(&mut self) {
        self.commits_processed += 1;
    }

    // Identity mappings are first-write-wins: the repository an identity was
    // first seen in is the one reported.

    pub(crate) fn record_username(&mut self, name: String, repo: &str) {
        self.username_mapping.entry(name).or_insert_with(|| repo.to_string());
    }

    pub(crate) fn record_email(&mut self, email: String, repo: &str) {
        self.email_mapping.entry(email).or_insert_with(|| repo.to_string());
    }

    pub(crate) fn record_unknown(&mut self, identity: String, repo: &str) {
        self.unknown_mapping.entry(identity).or_insert_with(|| repo.to_string());
    }

    /// Computed from the counters once the walk returns, whatever the walk's
    /// outcome was.
    pub(crate) fn finalize(&mut self) {
        self.finished = self.repos_processed == self.repos_discovered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappings_are_first_write_wins() {
        let mut state = RunState::new("alice");
        state.record_email("a@x.com".to_string(), "repo_a");
        state.record_email("a@x.com".to_string(), "repo_b");
        assert_eq!(state.email_mapping().get("a@x.com").unwrap(), "repo_a");

        state.record_unknown("Bob B".to_string(), "repo_a");
        state.record_unknown("Bob B".to_string(), "repo_b");
        assert_eq!(state.unknown_mapping().get("Bob B").unwrap(), "repo_a");
    }

    #[test]
    fn finished_requires_all_repos_processed() {
        let mut state = RunState::new("alice");
        state.record_discovered(2);
        state.record_repo_processed();
        state.finalize();
        assert!(!state.is_finished());

        state.record_repo_processed();
        state.finalize();
        assert!(state.is_finished());
    }

    #[test]
    fn progress_percent_is_zero_without_discovered_repos() {
        let state = RunState::new("alice");
        assert_eq!(state.progress().percent(), 0.0);
    }

    #[test]
    fn progress_percent_tracks_processed_share() {
        let mut state = RunState::new("alice");
        state.record_discovered(4);
        state.record_repo_processed();
        assert_eq!(state.progress().percent(), 25.0);
    }
}
