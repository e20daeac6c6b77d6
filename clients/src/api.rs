use async_trait::async_trait;
use derive_more::Constructor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("User {0} not found")]
    NotFound(String),
    #[error("API rate limit reached")]
    RateLimited,
    #[error("Fetch failed: {0}")]
    FetchFailed(String),
    #[error("Cancelled")]
    Cancelled,
    // the only reason of `reqwest` dependency..
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Errors that end the whole attribution run. Everything else is local
    /// to a single repository step and the walk continues past it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::NotFound(_) | Error::RateLimited | Error::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub trait Repo: Send + Sync + Clone {
    fn name(&self) -> &str;

    /// Opaque locator of the repository commit-listing endpoint. Identity
    /// mappings record the locator of the repository an author was first
    /// seen in.
    fn commits_locator(&self) -> &str;
}

/// One commit's author metadata. `author_login` is absent when the commit
/// email is not linked to any platform account.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Commit {
    pub author_name: String,
    pub author_email: String,
    pub author_login: Option<String>,
}

#[async_trait]
pub trait Client: Send + Sync {
    type REPO: Repo;

    async fn user_repos(&self, user: &str) -> Result<Vec<Self::REPO>>;

    async fn commits(&self, repo: &Self::REPO) -> Result<Vec<Commit>>;
}
