use clap::Args;
use url::Url;

pub const PLACEHOLDER_USERNAME: &str = "YOUR_GITHUB_USERNAME";
pub const PLACEHOLDER_REPO: &str = "YOUR_REPO_NAME";
pub const PLACEHOLDER_TOKEN: &str = "YOUR_GITHUB_TOKEN";

/// GitHub data repository settings
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// GitHub account that owns the data repository
    #[arg(long, env = "GITHUB_USERNAME", default_value = PLACEHOLDER_USERNAME)]
    pub github_username: String,

    /// Data repository name
    #[arg(long, env = "GITHUB_REPO", default_value = PLACEHOLDER_REPO)]
    pub github_repo: String,

    /// Personal access token with read access to the repository
    #[arg(
        long,
        env = "GITHUB_TOKEN",
        default_value = PLACEHOLDER_TOKEN,
        hide_env_values = true
    )]
    pub github_token: String,

    /// Branch the data files are read from
    #[arg(long, env = "GITHUB_BRANCH", default_value = "main")]
    pub github_branch: String,

    /// Raw content host
    #[arg(
        long,
        env = "GITHUB_RAW_URL",
        default_value = "https://raw.githubusercontent.com"
    )]
    pub raw_base_url: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_base_url: String,

    /// Per-request timeout in seconds (unset: transport default, no timeout)
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

#[cfg(test)]
impl Config {
    /// Build a config for the given repository with default endpoints.
    pub fn new(username: &str, repo: &str, token: &str, branch: &str) -> Self {
        Config {
            github_username: username.to_string(),
            github_repo: repo.to_string(),
            github_token: token.to_string(),
            github_branch: branch.to_string(),
            raw_base_url: "https://raw.githubusercontent.com".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// False while the account name is still the placeholder; nothing may
    /// touch the network in that state.
    pub fn is_configured(&self) -> bool {
        self.github_username != PLACEHOLDER_USERNAME
    }

    /// Names of the fields still holding their placeholder value.
    pub fn placeholder_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.github_username == PLACEHOLDER_USERNAME {
            fields.push("github_username");
        }
        if self.github_repo == PLACEHOLDER_REPO {
            fields.push("github_repo");
        }
        if self.github_token == PLACEHOLDER_TOKEN {
            fields.push("github_token");
        }
        fields
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.github_username.trim().is_empty() {
            anyhow::bail!("github_username must not be empty");
        }
        if self.github_repo.trim().is_empty() {
            anyhow::bail!("github_repo must not be empty");
        }
        if self.github_branch.trim().is_empty() {
            anyhow::bail!("github_branch must not be empty");
        }
        if let Err(e) = Url::parse(&self.raw_base_url) {
            anyhow::bail!("raw_base_url '{}' is not a valid URL: {}", self.raw_base_url, e);
        }
        if let Err(e) = Url::parse(&self.api_base_url) {
            anyhow::bail!("api_base_url '{}' is not a valid URL: {}", self.api_base_url, e);
        }
        if self.request_timeout_secs == Some(0) {
            anyhow::bail!("request_timeout_secs must be positive when set");
        }
        Ok(())
    }
}
