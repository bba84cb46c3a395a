use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::models::{CommitEntry, CommitRecord};
use crate::config::Config;

/// Media type that makes GitHub return file contents verbatim
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Repository directory that holds the published data files
pub const DATA_DIR: &str = "data";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("cannot build request URL from '{0}'")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the raw-content host and the commits endpoint of one
/// GitHub repository.
#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    raw_base: Url,
    api_base: Url,
    username: String,
    repo: String,
    token: String,
    branch: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("rotogrinders-sync/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let raw_base = Url::parse(&config.raw_base_url)
            .with_context(|| format!("Invalid raw content URL: {}", config.raw_base_url))?;
        let api_base = Url::parse(&config.api_base_url)
            .with_context(|| format!("Invalid GitHub API URL: {}", config.api_base_url))?;

        Ok(GitHubClient {
            http,
            raw_base,
            api_base,
            username: config.github_username.clone(),
            repo: config.github_repo.clone(),
            token: config.github_token.clone(),
            branch: config.github_branch.clone(),
        })
    }

    /// `{raw}/{account}/{repo}/{branch}/data/{filename}`
    pub fn raw_file_url(&self, filename: &str) -> Result<Url, FetchError> {
        let segments = [self.username.as_str(), self.repo.as_str()]
            .into_iter()
            .chain(self.branch.split('/').filter(|s| !s.is_empty()))
            .chain([DATA_DIR, filename]);
        append_segments(&self.raw_base, segments)
    }

    /// `{api}/repos/{account}/{repo}/commits?path=data&page=1&per_page=1`
    pub fn commits_url(&self) -> Result<Url, FetchError> {
        let mut url = append_segments(
            &self.api_base,
            ["repos", self.username.as_str(), self.repo.as_str(), "commits"],
        )?;
        url.query_pairs_mut()
            .append_pair("path", DATA_DIR)
            .append_pair("page", "1")
            .append_pair("per_page", "1");
        Ok(url)
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token)
    }

    /// Download `data/{filename}` and parse it as JSON.
    pub async fn fetch_data_file(&self, filename: &str) -> Result<serde_json::Value, FetchError> {
        let url = self.raw_file_url(filename)?;
        debug!("Fetching data file {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Most recent commit touching `data/`, or `None` when the path has no
    /// history.
    pub async fn latest_commit(&self) -> Result<Option<CommitRecord>, FetchError> {
        let url = self.commits_url()?;
        debug!("Fetching latest data commit {}", url);

        let resp = self
            .http
            .get(url)
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        let commits: Vec<CommitEntry> = serde_json::from_slice(&body)?;
        Ok(commits.into_iter().next().map(CommitRecord::from))
    }
}

fn append_segments<'a>(
    base: &Url,
    segments: impl IntoIterator<Item = &'a str>,
) -> Result<Url, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
