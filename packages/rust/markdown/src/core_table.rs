//! "Core Repositories" section body.

use chrono::{DateTime, Utc};
use orgdash_shared::{CoreRepoEntry, Workflow};

use crate::badge::render_badges;
use crate::{REPO_NOT_FOUND, RenderContext, last_updated_line};

/// What the CI/CD cell of a core repository shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreStatus {
    /// The repository exists; these are its prioritized workflows (maybe none).
    Present(Vec<Workflow>),
    /// The repository is not in the organization's listing.
    Missing,
}

/// One row of the core table, in curated order.
#[derive(Debug, Clone)]
pub struct CoreRow {
    pub entry: CoreRepoEntry,
    pub status: CoreStatus,
}

/// Render the section, starting with `heading_line` (e.g. `## Core Repositories`).
///
/// Rows keep the order given. The result ends with a single newline.
pub fn render_core_section(
    ctx: &RenderContext,
    heading_line: &str,
    rows: &[CoreRow],
    generated_at: &DateTime<Utc>,
) -> String {
    let mut md = format!("{}\n\n", heading_line.trim_end());
    md.push_str("| Repository | Purpose | Team | CI/CD Status |\n");
    md.push_str("|------------|---------|------|--------------|\n");

    for row in rows {
        let name = &row.entry.name;
        let status = match &row.status {
            CoreStatus::Present(workflows) => render_badges(ctx, name, workflows),
            CoreStatus::Missing => REPO_NOT_FOUND.to_string(),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            ctx.repo_link(name),
            row.entry.purpose,
            row.entry.team,
            status
        ));
    }

    md.push('\n');
    md.push_str(&last_updated_line(generated_at));
    md.push('\n');
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(name: &str, status: CoreStatus) -> CoreRow {
        CoreRow {
            entry: CoreRepoEntry::new(name, &format!("{name} purpose"), "Platform"),
            status,
        }
    }

    #[test]
    fn renders_rows_in_given_order() {
        let ctx = RenderContext::new("acme", "https://github.com");
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let ci = Workflow {
            name: "CI".into(),
            path: ".github/workflows/ci.yml".into(),
            state: "active".into(),
        };
        let rows = vec![
            row("web", CoreStatus::Present(vec![ci])),
            row("api", CoreStatus::Present(vec![])),
            row("ghost", CoreStatus::Missing),
        ];

        let md = render_core_section(&ctx, "## Core Repositories", &rows, &ts);

        let expected = "## Core Repositories\n\
\n\
| Repository | Purpose | Team | CI/CD Status |\n\
|------------|---------|------|--------------|\n\
| [web](https://github.com/acme/web) | web purpose | Platform | \
[![CI](https://github.com/acme/web/actions/workflows/ci.yml/badge.svg)](https://github.com/acme/web/actions/workflows/ci.yml) |\n\
| [api](https://github.com/acme/api) | api purpose | Platform | *No CI/CD* |\n\
| [ghost](https://github.com/acme/ghost) | ghost purpose | Platform | *Repository not found* |\n\
\n\
*Last updated: 2024-05-01 10:00:00 UTC*\n";

        assert_eq!(md, expected);
    }

    #[test]
    fn empty_entry_list_still_renders_header() {
        let ctx = RenderContext::new("acme", "https://github.com");
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let md = render_core_section(&ctx, "## Core Repositories  ", &[], &ts);
        assert!(md.starts_with("## Core Repositories\n\n| Repository |"));
        assert!(md.ends_with("UTC*\n"));
    }
}
