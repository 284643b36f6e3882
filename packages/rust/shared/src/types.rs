//! Core domain types: repositories, workflows, and curated core entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state value the forge reports for enabled workflows.
pub const ACTIVE_STATE: &str = "active";

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// A repository as returned by `GET /orgs/{org}/repos`.
///
/// Only the fields the dashboard renders are kept; everything else in the
/// response is ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name, unique within the organization.
    pub name: String,
    /// Free-text description, if the owners set one.
    #[serde(default)]
    pub description: Option<String>,
    /// Last push time. `null` for repositories that were never pushed to.
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Repository {
    /// Case-insensitive sort key used for dashboard ordering.
    pub fn sort_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Sort repositories case-insensitively by name, in place.
///
/// The sort is stable, so names differing only in case keep API order.
pub fn sort_repositories(repos: &mut [Repository]) {
    repos.sort_by_cached_key(Repository::sort_key);
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

/// A CI workflow definition from `GET /repos/{org}/{repo}/actions/workflows`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Display name of the workflow.
    pub name: String,
    /// File path inside the repository, e.g. `.github/workflows/ci.yml`.
    pub path: String,
    /// Activation state (`active`, `disabled_manually`, ...).
    pub state: String,
}

impl Workflow {
    /// Whether the forge reports this workflow as enabled.
    pub fn is_active(&self) -> bool {
        self.state == ACTIVE_STATE
    }

    /// Final path segment of the workflow file (`ci.yml`).
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Envelope of the workflows listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

/// A repository paired with the workflows that were fetched for it.
#[derive(Debug, Clone)]
pub struct RepoStatus {
    pub repo: Repository,
    pub workflows: Vec<Workflow>,
}

impl RepoStatus {
    /// Whether at least one workflow is attached.
    pub fn has_ci(&self) -> bool {
        !self.workflows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CoreRepoEntry
// ---------------------------------------------------------------------------

/// A hand-curated core repository with ownership metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreRepoEntry {
    /// Repository name as it appears on the forge.
    pub name: String,
    /// One-line statement of what the repository is for.
    pub purpose: String,
    /// Owning team label.
    pub team: String,
}

impl CoreRepoEntry {
    pub fn new(name: &str, purpose: &str, team: &str) -> Self {
        Self {
            name: name.into(),
            purpose: purpose.into(),
            team: team.into(),
        }
    }
}

/// Built-in core repository list, used when the config declares none.
pub fn default_core_repos() -> Vec<CoreRepoEntry> {
    vec![
        CoreRepoEntry::new(".github", "Organization profile and shared workflows", "Platform"),
        CoreRepoEntry::new("api", "Public REST API service", "Backend"),
        CoreRepoEntry::new("web", "Customer-facing web application", "Frontend"),
        CoreRepoEntry::new("infrastructure", "Terraform and deployment manifests", "DevOps"),
        CoreRepoEntry::new("docs", "Product and developer documentation", "Developer Experience"),
    ]
}
