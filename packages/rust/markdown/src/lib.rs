//! Markdown rendering for orgdash.
//!
//! - [`render_dashboard`] builds the full CI/CD status document
//! - [`render_core_section`] builds the curated "Core Repositories" table
//! - [`replace_section`] swaps one section of an existing document in place,
//!   leaving every other byte untouched
//!
//! Rendering is pure: the generation timestamp is passed in by the caller.

mod badge;
mod core_table;
mod dashboard;
mod section;

use chrono::{DateTime, Utc};

pub use badge::render_badges;
pub use core_table::{CoreRow, CoreStatus, render_core_section};
pub use dashboard::{LEGEND, render_dashboard};
pub use section::{SectionReplacement, find_section, replace_section};

/// Descriptions longer than this many characters are truncated.
pub const DESCRIPTION_MAX_CHARS: usize = 50;

/// Appended to truncated descriptions.
const ELLIPSIS: &str = "...";

/// Placeholder for repositories without a description.
pub const NO_DESCRIPTION: &str = "*No description*";

/// Placeholder for repositories without active workflows.
pub const NO_CI: &str = "*No CI/CD*";

/// Placeholder for core repositories missing from the organization.
pub const REPO_NOT_FOUND: &str = "*Repository not found*";

/// Shown in the Last Push column for repositories that were never pushed to.
const NEVER_PUSHED: &str = "-";

// ---------------------------------------------------------------------------
// Render context
// ---------------------------------------------------------------------------

/// Organization and web host every link is built from.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Organization login.
    pub org: String,
    /// Browser host, e.g. `https://github.com` (no trailing slash).
    pub web_host: String,
}

impl RenderContext {
    pub fn new(org: impl Into<String>, web_host: &str) -> Self {
        Self {
            org: org.into(),
            web_host: web_host.trim_end_matches('/').to_string(),
        }
    }

    /// Browser URL of a repository in this organization.
    pub fn repo_url(&self, repo: &str) -> String {
        format!("{}/{}/{repo}", self.web_host, self.org)
    }

    /// `[name](url)` link to a repository.
    pub fn repo_link(&self, repo: &str) -> String {
        format!("[{repo}]({})", self.repo_url(repo))
    }
}

// ---------------------------------------------------------------------------
// Cell formatting
// ---------------------------------------------------------------------------

/// Description cell text: placeholder when missing, otherwise truncated to
/// 47 characters plus `...` once it exceeds 50 characters.
pub fn format_description(description: Option<&str>) -> String {
    match description {
        None | Some("") => NO_DESCRIPTION.to_string(),
        Some(text) if text.chars().count() > DESCRIPTION_MAX_CHARS => {
            let keep = DESCRIPTION_MAX_CHARS - ELLIPSIS.len();
            let mut truncated: String = text.chars().take(keep).collect();
            truncated.push_str(ELLIPSIS);
            truncated
        }
        Some(text) => text.to_string(),
    }
}

/// Date-only rendering of a push timestamp (`YYYY-MM-DD`).
pub fn format_push_date(pushed_at: Option<&DateTime<Utc>>) -> String {
    match pushed_at {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => NEVER_PUSHED.to_string(),
    }
}

/// `*Last updated: YYYY-MM-DD HH:MM:SS UTC*` line.
pub fn last_updated_line(generated_at: &DateTime<Utc>) -> String {
    format!(
        "*Last updated: {} UTC*",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn short_description_is_kept() {
        assert_eq!(format_description(Some("Public REST API")), "Public REST API");
        let exactly_fifty = "x".repeat(50);
        assert_eq!(format_description(Some(&exactly_fifty)), exactly_fifty);
    }

    #[test]
    fn long_description_is_truncated_to_fifty() {
        let long = "a".repeat(47) + "bcdefgh";
        let out = format_description(Some(&long));
        assert_eq!(out.chars().count(), 50);
        assert_eq!(out, "a".repeat(47) + "...");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(60);
        let out = format_description(Some(&long));
        assert_eq!(out.chars().count(), 50);
        assert!(out.starts_with(&"é".repeat(47)));
        assert!(out.ends_with("..."));
    }

    #[test]
    fn missing_description_uses_placeholder() {
        assert_eq!(format_description(None), NO_DESCRIPTION);
        assert_eq!(format_description(Some("")), NO_DESCRIPTION);
    }

    #[test]
    fn push_date_is_date_only() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 15, 18, 2, 11).unwrap();
        assert_eq!(format_push_date(Some(&ts)), "2024-03-15");
        assert_eq!(format_push_date(None), "-");
    }

    #[test]
    fn last_updated_format() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(last_updated_line(&ts), "*Last updated: 2024-01-02 03:04:05 UTC*");
    }

    #[test]
    fn context_trims_host_and_builds_links() {
        let ctx = RenderContext::new("acme", "https://github.com/");
        assert_eq!(ctx.repo_url("api"), "https://github.com/acme/api");
        assert_eq!(ctx.repo_link("api"), "[api](https://github.com/acme/api)");
    }
}
