//! Keyword-based workflow ranking.
//!
//! Repositories often carry many workflows; the core table only shows a
//! couple of badges each. Workflows are ranked by the first keyword (in list
//! order) their name contains, case-insensitively:
//! - `ci`, `main`, `test`, `build`, `deploy` by default
//! - non-matching workflows rank after every matching one
//! - ties keep their input order

use orgdash_shared::Workflow;

/// Rank of a workflow name: index of the first matching keyword, or
/// `keywords.len()` when none match.
pub(crate) fn priority_rank(name: &str, keywords: &[String]) -> usize {
    let name = name.to_lowercase();
    keywords
        .iter()
        .position(|kw| name.contains(&kw.to_lowercase()))
        .unwrap_or(keywords.len())
}

/// Stable-sort `workflows` by `priority_rank` and keep the first `limit`.
pub fn rank_workflows(workflows: Vec<Workflow>, keywords: &[String], limit: usize) -> Vec<Workflow> {
    let mut ranked = workflows;
    ranked.sort_by_cached_key(|wf| priority_rank(&wf.name, keywords));
    ranked.truncate(limit);
    ranked
}
