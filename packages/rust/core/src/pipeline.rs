//! End-to-end `dashboard` pipeline: list repositories → fetch workflows →
//! render → write.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use orgdash_forge::{ForgeClient, ForgeOptions};
use orgdash_markdown::{RenderContext, render_dashboard};
use orgdash_shared::{Credentials, RepoStatus, Result};

use crate::output::write_document;

/// Configuration for the `generate_dashboard` pipeline.
#[derive(Debug, Clone)]
pub struct DashboardRunConfig {
    /// Organization and token.
    pub credentials: Credentials,
    /// API connection settings.
    pub forge: ForgeOptions,
    /// Browser host used in links and badges.
    pub web_host: String,
    /// File the dashboard replaces.
    pub output: PathBuf,
    /// Timestamp printed in the document.
    pub generated_at: DateTime<Utc>,
    /// Render only; leave the file system alone.
    pub dry_run: bool,
}

/// Result of the `generate_dashboard` pipeline.
#[derive(Debug)]
pub struct DashboardRunResult {
    /// The rendered document.
    pub document: String,
    /// Where it was written, `None` on a dry run.
    pub written_to: Option<PathBuf>,
    /// Number of repositories in the organization.
    pub repo_count: usize,
    /// Repositories with at least one active workflow.
    pub repos_with_ci: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a repository's workflows are looked up.
    fn repo_checked(&self, name: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn repo_checked(&self, _name: &str, _current: usize, _total: usize) {}
    fn done(&self) {}
}

/// Run the full `dashboard` pipeline.
///
/// 1. List every repository of the organization (fatal on any HTTP error)
/// 2. Look up active workflows per repository, one at a time (soft failure)
/// 3. Render the dashboard document
/// 4. Overwrite the output file
#[instrument(skip_all, fields(org = %config.credentials.org, output = %config.output.display()))]
pub async fn generate_dashboard(
    config: &DashboardRunConfig,
    progress: &dyn ProgressReporter,
) -> Result<DashboardRunResult> {
    let start = Instant::now();
    let org = config.credentials.org.as_str();
    let client = ForgeClient::new(&config.forge, &config.credentials.token)?;

    info!(org, "fetching repositories for organization");
    progress.phase("Listing repositories");
    let repos = client.list_repositories(org).await?;
    info!(count = repos.len(), "found repositories");

    progress.phase("Checking workflows");
    let total = repos.len();
    let mut statuses: Vec<RepoStatus> = Vec::with_capacity(total);
    for (i, repo) in repos.into_iter().enumerate() {
        progress.repo_checked(&repo.name, i + 1, total);
        let workflows = client.active_workflows(org, &repo.name).await;
        statuses.push(RepoStatus { repo, workflows });
    }

    progress.phase("Rendering dashboard");
    let ctx = RenderContext::new(org, &config.web_host);
    let document = render_dashboard(&ctx, &statuses, &config.generated_at);

    let written_to = if config.dry_run {
        None
    } else {
        write_document(&config.output, &document)?;
        Some(config.output.clone())
    };

    let result = DashboardRunResult {
        document,
        written_to,
        repo_count: statuses.len(),
        repos_with_ci: statuses.iter().filter(|s| s.has_ci()).count(),
        elapsed: start.elapsed(),
    };

    info!(
        repos = result.repo_count,
        with_ci = result.repos_with_ci,
        written = result.written_to.is_some(),
        elapsed_ms = result.elapsed.as_millis(),
        "dashboard complete"
    );
    progress.done();

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
