//! Full CI/CD status dashboard document.

use chrono::{DateTime, Utc};
use orgdash_shared::RepoStatus;
use tracing::{debug, instrument};

use crate::badge::render_badges;
use crate::{RenderContext, format_description, format_push_date, last_updated_line};

/// Static status legend appended to every dashboard.
///
/// Documentation only: badges carry the live state, nothing here is computed.
pub const LEGEND: [&str; 4] = [
    "🟢 Passing - All checks passed",
    "🔴 Failing - One or more checks failed",
    "🟡 In Progress - Workflow currently running",
    "⚪ No Status - No recent runs",
];

/// Render the complete dashboard document.
///
/// Rows are ordered case-insensitively by repository name regardless of the
/// order of `repos`.
#[instrument(skip_all, fields(org = %ctx.org, repos = repos.len()))]
pub fn render_dashboard(
    ctx: &RenderContext,
    repos: &[RepoStatus],
    generated_at: &DateTime<Utc>,
) -> String {
    let mut rows: Vec<&RepoStatus> = repos.iter().collect();
    rows.sort_by_cached_key(|status| status.repo.sort_key());

    let total = rows.len();
    let with_ci = rows.iter().filter(|status| status.has_ci()).count();

    let mut md = format!("# {} CI/CD Status Dashboard\n\n", ctx.org);
    md.push_str(&last_updated_line(generated_at));
    md.push_str("\n\n");

    md.push_str("## Summary\n");
    md.push_str(&format!("- Total Repositories: {total}\n"));
    md.push_str(&format!("- Repositories with CI/CD: {with_ci}\n\n"));

    md.push_str("## Repository Status\n\n");
    md.push_str("| Repository | Description | CI/CD Status | Last Push |\n");
    md.push_str("|------------|-------------|--------------|------------|\n");

    for status in rows {
        let repo = &status.repo;
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            ctx.repo_link(&repo.name),
            format_description(repo.description.as_deref()),
            render_badges(ctx, &repo.name, &status.workflows),
            format_push_date(repo.pushed_at.as_ref()),
        ));
    }

    md.push_str("\n## Legend\n");
    for line in LEGEND {
        md.push_str("- ");
        md.push_str(line);
        md.push('\n');
    }

    debug!(total, with_ci, len = md.len(), "dashboard rendered");
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use orgdash_shared::{Repository, Workflow};

    fn ctx() -> RenderContext {
        RenderContext::new("acme", "https://github.com")
    }

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 16, 12, 0, 0).unwrap()
    }

    fn status(name: &str, workflows: Vec<Workflow>) -> RepoStatus {
        RepoStatus {
            repo: Repository {
                name: name.into(),
                description: None,
                pushed_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
            },
            workflows,
        }
    }

    fn ci() -> Workflow {
        Workflow {
            name: "CI".into(),
            path: ".github/workflows/ci.yml".into(),
            state: "active".into(),
        }
    }

    fn table_rows(md: &str) -> Vec<&str> {
        md.lines()
            .filter(|line| line.starts_with("| ["))
            .collect()
    }

    #[test]
    fn no_workflow_scenario() {
        let md = render_dashboard(
            &ctx(),
            &[status("Beta", vec![]), status("alpha", vec![])],
            &ts(),
        );

        let rows = table_rows(&md);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("| [alpha](https://github.com/acme/alpha) |"));
        assert!(rows[1].starts_with("| [Beta](https://github.com/acme/Beta) |"));
        assert!(rows.iter().all(|row| row.contains("| *No CI/CD* |")));
        assert!(md.contains("- Total Repositories: 2\n"));
        assert!(md.contains("- Repositories with CI/CD: 0\n"));
    }

    #[test]
    fn full_document_layout() {
        let md = render_dashboard(&ctx(), &[status("api", vec![ci()])], &ts());

        let expected = "# acme CI/CD Status Dashboard\n\
\n\
*Last updated: 2024-03-16 12:00:00 UTC*\n\
\n\
## Summary\n\
- Total Repositories: 1\n\
- Repositories with CI/CD: 1\n\
\n\
## Repository Status\n\
\n\
| Repository | Description | CI/CD Status | Last Push |\n\
|------------|-------------|--------------|------------|\n\
| [api](https://github.com/acme/api) | *No description* | \
[![CI](https://github.com/acme/api/actions/workflows/ci.yml/badge.svg)](https://github.com/acme/api/actions/workflows/ci.yml) \
| 2024-03-01 |\n\
\n\
## Legend\n\
- 🟢 Passing - All checks passed\n\
- 🔴 Failing - One or more checks failed\n\
- 🟡 In Progress - Workflow currently running\n\
- ⚪ No Status - No recent runs\n";

        assert_eq!(md, expected);
    }

    #[test]
    fn rows_are_case_insensitively_sorted() {
        let input: Vec<_> = ["zeta", "Alpha", "mid", "BRAVO", "charlie"]
            .into_iter()
            .map(|n| status(n, vec![]))
            .collect();
        let md = render_dashboard(&ctx(), &input, &ts());

        let names: Vec<String> = table_rows(&md)
            .iter()
            .map(|row| {
                let start = row.find('[').unwrap() + 1;
                let end = row.find(']').unwrap();
                row[start..end].to_lowercase()
            })
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn summary_counts_repositories_with_ci() {
        let md = render_dashboard(
            &ctx(),
            &[status("a", vec![ci()]), status("b", vec![]), status("c", vec![ci()])],
            &ts(),
        );
        assert!(md.contains("- Total Repositories: 3\n"));
        assert!(md.contains("- Repositories with CI/CD: 2\n"));
    }

    #[test]
    fn long_descriptions_are_truncated_in_table() {
        let mut repo = status("docs", vec![]);
        repo.repo.description = Some("d".repeat(80));
        let md = render_dashboard(&ctx(), &[repo], &ts());
        let expected_cell = format!("| {}... |", "d".repeat(47));
        assert!(md.contains(&expected_cell));
    }

    #[test]
    fn legend_is_always_present() {
        let md = render_dashboard(&ctx(), &[], &ts());
        assert!(md.contains("- Total Repositories: 0\n"));
        for line in LEGEND {
            assert!(md.contains(line));
        }
    }
}
