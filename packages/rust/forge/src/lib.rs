//! Forge (GitHub REST v3) access: repository listing and workflow lookup.
//!
//! Two failure tiers apply. Listing an organization's repositories is
//! all-or-nothing: any non-success page aborts with [`OrgDashError::Api`].
//! Looking up a single repository's workflows degrades to "no workflows"
//! on any failure so one broken repository never sinks the whole run.

mod priority;

use std::collections::HashMap;
use std::time::Duration;

use orgdash_shared::{GithubConfig, OrgDashError, Repository, Result, Workflow, WorkflowList};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info, instrument, warn};

pub use priority::rank_workflows;

/// Repositories requested per listing page.
pub const PAGE_SIZE: u32 = 100;

/// Media type requested from the REST API.
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// User-Agent string for API requests (GitHub rejects requests without one).
const USER_AGENT: &str = concat!("orgdash/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Client options
// ---------------------------------------------------------------------------

/// Connection settings for [`ForgeClient`].
#[derive(Debug, Clone)]
pub struct ForgeOptions {
    /// REST API base URL, without trailing slash.
    pub api_base: String,
    /// Timeout for each HTTP request in seconds.
    pub timeout_secs: u64,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self::from(&GithubConfig::default())
    }
}

impl From<&GithubConfig> for ForgeOptions {
    fn from(config: &GithubConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// ForgeClient
// ---------------------------------------------------------------------------

/// Authenticated REST client. Requests are issued one at a time.
#[derive(Debug, Clone)]
pub struct ForgeClient {
    client: Client,
    api_base: String,
}

impl ForgeClient {
    /// Build a client that sends `Authorization: token <token>` on every request.
    pub fn new(opts: &ForgeOptions, token: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| OrgDashError::config("access token contains invalid header characters"))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(opts.timeout_secs))
            .build()
            .map_err(|e| OrgDashError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: opts.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// List every repository of `org`, sorted case-insensitively by name.
    ///
    /// Pages through `/orgs/{org}/repos` until an empty page comes back.
    #[instrument(skip(self))]
    pub async fn list_repositories(&self, org: &str) -> Result<Vec<Repository>> {
        let mut repos = self.fetch_all_pages(org).await?;
        orgdash_shared::sort_repositories(&mut repos);
        Ok(repos)
    }

    /// List every repository of `org`, keyed by exact name.
    #[instrument(skip(self))]
    pub async fn repository_map(&self, org: &str) -> Result<HashMap<String, Repository>> {
        let repos = self.fetch_all_pages(org).await?;
        Ok(repos.into_iter().map(|r| (r.name.clone(), r)).collect())
    }

    /// Active workflows of `org/repo`, in API order.
    ///
    /// Never fails: any error is logged and treated as "no workflows".
    #[instrument(skip(self))]
    pub async fn active_workflows(&self, org: &str, repo: &str) -> Vec<Workflow> {
        match self.fetch_workflows(org, repo).await {
            Ok(list) => {
                let active: Vec<Workflow> =
                    list.workflows.into_iter().filter(Workflow::is_active).collect();
                debug!(total = list.total_count, active = active.len(), "workflows fetched");
                active
            }
            Err(e) => {
                warn!(error = %e, "workflow lookup failed, treating as no CI");
                Vec::new()
            }
        }
    }

    /// Active workflows of `org/repo` ranked by `keywords`, at most `limit`.
    pub async fn prioritized_workflows(
        &self,
        org: &str,
        repo: &str,
        keywords: &[String],
        limit: usize,
    ) -> Vec<Workflow> {
        let active = self.active_workflows(org, repo).await;
        rank_workflows(active, keywords, limit)
    }

    async fn fetch_all_pages(&self, org: &str) -> Result<Vec<Repository>> {
        let mut repos: Vec<Repository> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let batch = self.fetch_repo_page(org, page).await?;
            if batch.is_empty() {
                break;
            }
            debug!(page, count = batch.len(), "repository page fetched");
            repos.extend(batch);
            page += 1;
        }

        info!(org, count = repos.len(), pages = page - 1, "repositories listed");
        Ok(repos)
    }

    async fn fetch_repo_page(&self, org: &str, page: u32) -> Result<Vec<Repository>> {
        let url = format!("{}/orgs/{org}/repos", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("per_page", PAGE_SIZE)])
            .send()
            .await
            .map_err(|e| OrgDashError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrgDashError::api(
                status.as_u16(),
                format!("{url}?page={page}&per_page={PAGE_SIZE}"),
            ));
        }

        response
            .json::<Vec<Repository>>()
            .await
            .map_err(|e| OrgDashError::parse(format!("{url}: invalid repository page: {e}")))
    }

    async fn fetch_workflows(&self, org: &str, repo: &str) -> Result<WorkflowList> {
        let url = format!("{}/repos/{org}/{repo}/actions/workflows", self.api_base);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OrgDashError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrgDashError::api(status.as_u16(), url));
        }

        response
            .json::<WorkflowList>()
            .await
            .map_err(|e| OrgDashError::parse(format!("{url}: invalid workflow list: {e}")))
    }
}
