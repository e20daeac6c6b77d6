mod builder;
mod payload;

pub use builder::GithubClientBuilder;

use async_trait::async_trait;
use clients::api::Commit;
use clients::api::Error;
use clients::api::Result;
use log::debug;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub struct GithubClient {
    client: Client,
    github_url: String,
}

#[derive(Clone, Debug)]
pub struct GithubRepo {
    name: String,
    commits_url: String,
}

impl clients::api::Repo for GithubRepo {
    fn name(&self) -> &str {
        &self.name
    }

    fn commits_locator(&self) -> &str {
        &self.commits_url
    }
}

#[async_trait]
impl clients::api::Client for GithubClient {
    type REPO = GithubRepo;

    async fn user_repos(&self, user: &str) -> Result<Vec<GithubRepo>> {
        let request_url = format!("{}/users/{}/repos", self.github_url, user);
        debug!("Listing repositories of {}", user);
        let response = self.client.get(request_url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(user.to_string()));
        }
        check_rate_limit(&response)?;
        let repos = read_response::<Vec<payload::Repo>>(response).await?;
        Ok(repos.into_iter().map(GithubRepo::from).collect())
    }

    async fn commits(&self, repo: &GithubRepo) -> Result<Vec<Commit>> {
        debug!("Listing commits of {}", repo.name);
        let response = self.client.get(&repo.commits_url).send().await?;
        check_rate_limit(&response)?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed(format!("{}: {}", repo.name, status)));
        }
        let commits = read_response::<Vec<payload::CommitItem>>(response).await?;
        Ok(commits.into_iter().map(Commit::from).collect())
    }
}

fn check_rate_limit(response: &Response) -> Result<()> {
    match response.status() {
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => Err(Error::RateLimited),
        _ => Ok(()),
    }
}

async fn read_response<BODY: DeserializeOwned>(response: Response) -> Result<BODY> {
    Ok(response.error_for_status()?.json::<BODY>().await?)
}
