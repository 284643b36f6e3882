//! In-place update of the "Core Repositories" section of an existing document.
//!
//! Only the section is regenerated; the rest of the file is copied through
//! byte-for-byte. Core repositories are rendered in their curated order, and
//! entries missing from the organization get a placeholder without any
//! workflow lookup.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use orgdash_forge::{ForgeClient, ForgeOptions};
use orgdash_markdown::{
    CoreRow, CoreStatus, RenderContext, find_section, render_core_section, replace_section,
};
use orgdash_shared::{CoreRepoEntry, Credentials, OrgDashError, Result};

use crate::output::{read_document, write_document};
use crate::pipeline::ProgressReporter;

// ---------------------------------------------------------------------------
// Update config & result
// ---------------------------------------------------------------------------

/// Configuration for the `update_core_section` pipeline.
#[derive(Debug, Clone)]
pub struct CoreSectionRunConfig {
    /// Organization and token.
    pub credentials: Credentials,
    /// API connection settings.
    pub forge: ForgeOptions,
    /// Browser host used in links and badges.
    pub web_host: String,
    /// Document to update in place.
    pub path: PathBuf,
    /// Section heading text (rendered as a level-2 heading).
    pub heading: String,
    /// Curated repositories, in display order.
    pub core_repos: Vec<CoreRepoEntry>,
    /// Workflow ranking keywords, highest priority first.
    pub priority_keywords: Vec<String>,
    /// Maximum badges per repository.
    pub badge_limit: usize,
    /// Timestamp printed under the table.
    pub generated_at: DateTime<Utc>,
    /// Fail instead of warning when the heading is missing.
    pub strict: bool,
    /// Render only; leave the file system alone.
    pub dry_run: bool,
}

impl CoreSectionRunConfig {
    /// The Markdown heading line that delimits the section.
    pub fn heading_line(&self) -> String {
        format!("## {}", self.heading.trim())
    }
}

/// Result of the `update_core_section` pipeline.
#[derive(Debug)]
pub struct CoreSectionRunResult {
    /// The updated document (identical to the input when the heading was missing).
    pub document: String,
    /// The freshly rendered section, `None` when the heading was missing.
    pub section: Option<String>,
    /// Whether the section heading was found.
    pub found: bool,
    /// Where the document was written, `None` if nothing was written.
    pub written_to: Option<PathBuf>,
    /// Core repositories present in the organization.
    pub present: usize,
    /// Core repositories missing from the organization.
    pub missing: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

// ---------------------------------------------------------------------------
// Row building
// ---------------------------------------------------------------------------

/// Resolve each core entry against the organization's repositories.
///
/// Present repositories get their prioritized workflows re-queried; missing
/// ones are marked without touching the API.
async fn build_rows(
    client: &ForgeClient,
    config: &CoreSectionRunConfig,
    progress: &dyn ProgressReporter,
) -> Result<Vec<CoreRow>> {
    let org = config.credentials.org.as_str();
    let repos = client.repository_map(org).await?;
    info!(count = repos.len(), "found repositories");

    progress.phase("Checking core repository workflows");
    let total = config.core_repos.len();
    let mut rows = Vec::with_capacity(total);

    for (i, entry) in config.core_repos.iter().enumerate() {
        progress.repo_checked(&entry.name, i + 1, total);

        let status = if repos.contains_key(&entry.name) {
            let workflows = client
                .prioritized_workflows(org, &entry.name, &config.priority_keywords, config.badge_limit)
                .await;
            CoreStatus::Present(workflows)
        } else {
            warn!(repo = %entry.name, "core repository not found in organization");
            CoreStatus::Missing
        };

        rows.push(CoreRow {
            entry: entry.clone(),
            status,
        });
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// Update pipeline
// ---------------------------------------------------------------------------

/// Run the core-section pipeline.
///
/// 1. Read the existing document (fatal if missing)
/// 2. Locate the section heading; when absent, warn (or fail under `strict`)
///    and stop before any API request
/// 3. List the organization's repositories (fatal on any HTTP error)
/// 4. Resolve each curated entry and fetch its top-ranked workflows
/// 5. Render the section and splice it into the document
/// 6. Write the document back to the same path
#[instrument(skip_all, fields(org = %config.credentials.org, path = %config.path.display()))]
pub async fn update_core_section(
    config: &CoreSectionRunConfig,
    progress: &dyn ProgressReporter,
) -> Result<CoreSectionRunResult> {
    let start = Instant::now();
    let org = config.credentials.org.as_str();

    progress.phase("Reading document");
    let original = read_document(&config.path)?;
    let heading_line = config.heading_line();

    if find_section(&original, &heading_line)?.is_none() {
        if config.strict {
            return Err(OrgDashError::validation(format!(
                "heading '{heading_line}' not found in {}",
                config.path.display()
            )));
        }
        warn!(
            heading = %heading_line,
            path = %config.path.display(),
            "section heading not found, document left unchanged"
        );
        progress.done();
        return Ok(CoreSectionRunResult {
            document: original,
            section: None,
            found: false,
            written_to: None,
            present: 0,
            missing: 0,
            elapsed: start.elapsed(),
        });
    }

    let client = ForgeClient::new(&config.forge, &config.credentials.token)?;
    info!(org, "fetching repositories for organization");
    progress.phase("Listing repositories");
    let rows = build_rows(&client, config, progress).await?;

    progress.phase("Rendering section");
    let ctx = RenderContext::new(org, &config.web_host);
    let section = render_core_section(&ctx, &heading_line, &rows, &config.generated_at);
    let replacement = replace_section(&original, &heading_line, &section)?;

    let written_to = if replacement.found && !config.dry_run {
        write_document(&config.path, &replacement.document)?;
        Some(config.path.clone())
    } else {
        None
    };

    let missing = rows
        .iter()
        .filter(|row| row.status == CoreStatus::Missing)
        .count();

    let result = CoreSectionRunResult {
        document: replacement.document,
        section: Some(section),
        found: replacement.found,
        written_to,
        present: rows.len() - missing,
        missing,
        elapsed: start.elapsed(),
    };

    info!(
        found = result.found,
        present = result.present,
        missing = result.missing,
        written = result.written_to.is_some(),
        elapsed_ms = result.elapsed.as_millis(),
        "core section update complete"
    );
    progress.done();

    Ok(result)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
