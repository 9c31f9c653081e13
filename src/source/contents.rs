//! Access to a repository's folder tree through the GitHub contents API.
//!
//! The walker only needs two calls: list a folder, and download a file by its raw
//! URL. They sit behind the [`ContentsApi`] trait so the traversal can run against
//! an in-memory tree as well as the real API.

use anyhow::{anyhow, Context, Result};
use derive_builder::Builder;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The kind of a folder listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
    /// symlinks, submodules and whatever else the API may report
    #[serde(other)]
    Other,
}

/// One entry of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

pub trait ContentsApi {
    /// List the entries of a folder, in the order the remote reports them
    fn list_folder(&self, path: &str) -> Result<Vec<ContentEntry>>;
    /// Download the raw text behind a file's download URL
    fn download(&self, url: &str) -> Result<String>;
}

#[derive(Builder)]
#[builder(setter(into), build_fn(skip, error = "anyhow::Error"))]
pub struct GitHubContents {
    owner: String,
    repo: String,
    branch: String,
    token: String,
    /// Base URL of the API, defaults to [`DEFAULT_API_URL`]
    api_url: String,
    #[builder(setter(skip))]
    client: Client,
}

impl GitHubContentsBuilder {
    pub fn build(&mut self) -> Result<GitHubContents> {
        let owner = self
            .owner
            .take()
            .ok_or_else(|| anyhow!("Repository owner not provided!"))?;
        let repo = self
            .repo
            .take()
            .ok_or_else(|| anyhow!("Repository name not provided!"))?;
        let branch = self
            .branch
            .take()
            .ok_or_else(|| anyhow!("Repository branch not provided!"))?;
        let token = self
            .token
            .take()
            .ok_or_else(|| anyhow!("GitHub access token not provided!"))?;

        let api_url = self
            .api_url
            .take()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Url::parse(&api_url).with_context(|| format!("Invalid GitHub API URL `{api_url}`"))?;

        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(GitHubContents {
            owner,
            repo,
            branch,
            token,
            api_url,
            client,
        })
    }
}

impl GitHubContents {
    /// The listing URL for a folder; every path segment is percent-encoded on its own
    pub fn contents_url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid GitHub API URL `{}`", self.api_url))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("GitHub API URL `{}` can't be a base", self.api_url))?;
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }
}

impl ContentsApi for GitHubContents {
    fn list_folder(&self, path: &str) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(path)?;
        let body = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .with_context(|| format!("Failed to fetch folder contents from {url}"))?;

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse folder listing from {url}"))
    }

    fn download(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .with_context(|| format!("Failed to download file {url}"))
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn contents() -> GitHubContents {
        GitHubContentsBuilder::default()
            .owner("someone")
            .repo("lecture-notes")
            .branch("main")
            .token("secret")
            .build()
            .expect("can build contents client")
    }

    #[test]
    fn builder_requires_all_fields() {
        let result = GitHubContentsBuilder::default()
            .owner("someone")
            .repo("lecture-notes")
            .token("secret")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_rejects_bad_api_url() {
        let result = GitHubContentsBuilder::default()
            .owner("someone")
            .repo("lecture-notes")
            .branch("main")
            .token("secret")
            .api_url("not a url")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn contents_url_encodes_each_segment() {
        let url = contents()
            .contents_url("Notes/Week 1/C# & more")
            .expect("can build url");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/someone/lecture-notes/contents/Notes/Week%201/C%23%20&%20more?ref=main"
        );
    }

    #[test]
    fn contents_url_for_root() {
        let url = contents().contents_url("").expect("can build url");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/someone/lecture-notes/contents?ref=main"
        );
    }

    #[test]
    fn can_parse_listing() {
        let body = r#"[
            {"type": "file", "name": "a.md", "path": "notes/a.md", "download_url": "https://raw.example/a.md", "size": 10},
            {"type": "dir", "name": "sub", "path": "notes/sub", "download_url": null},
            {"type": "submodule", "name": "vendor", "path": "notes/vendor", "download_url": null}
        ]"#;
        let entries: Vec<ContentEntry> = serde_json::from_str(body).expect("can parse listing");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].download_url.as_deref(), Some("https://raw.example/a.md"));
        assert_eq!(entries[1].kind, EntryKind::Dir);
        assert_eq!(entries[1].download_url, None);
        assert_eq!(entries[2].kind, EntryKind::Other);
    }
}
