use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub name: String,
    pub commits_url: String,
}

impl From<Repo> for crate::GithubRepo {
    fn from(repo: Repo) -> Self {
        // `commits_url` is a URI template ending with "{/sha}"; stripping the
        // template suffix leaves the plain commit-listing endpoint.
        let commits_url = repo.commits_url.trim_end_matches("{/sha}").to_string();
        crate::GithubRepo {
            name: repo.name,
            commits_url,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CommitItem {
    pub commit: CommitDetail,
    pub author: Option<CommitAccount>,
}

#[derive(Deserialize, Debug)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<CommitAuthor>,
}

#[derive(Deserialize, Debug, Default)]
pub struct CommitAuthor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize, Debug)]
pub struct CommitAccount {
    pub login: String,
}

impl From<CommitItem> for clients::api::Commit {
    fn from(item: CommitItem) -> Self {
        let author = item.commit.author.unwrap_or_default();
        clients::api::Commit {
            author_name: author.name,
            author_email: author.email,
            author_login: item.author.map(|account| account.login),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients::api::Commit;

    #[test]
    fn repo_locator_strips_template_suffix() {
        let repo = Repo {
            name: "repo_a".to_string(),
            commits_url: "https://api.github.com/repos/alice/repo_a/commits{/sha}".to_string(),
        };
        let repo = crate::GithubRepo::from(repo);
        assert_eq!(repo.commits_url, "https://api.github.com/repos/alice/repo_a/commits");
    }

    #[test]
    fn commit_with_missing_author_fields_decodes_to_empty_strings() {
        let body = r#"{ "commit": { "author": null }, "author": null }"#;
        let item: CommitItem = serde_json::from_str(body).unwrap();
        let commit = Commit::from(item);
        assert_eq!(commit, Commit::new(String::new(), String::new(), None));
    }

    #[test]
    fn commit_with_linked_account_keeps_login() {
        let body = r#"{
            "commit": { "author": { "name": "Alice A", "email": "a@x.com" } },
            "author": { "login": "alice" }
        }"#;
        let item: CommitItem = serde_json::from_str(body).unwrap();
        let commit = Commit::from(item);
        assert_eq!(
            commit,
            Commit::new("Alice A".to_string(), "a@x.com".to_string(), Some("alice".to_string()))
        );
    }
}
