//! Workflow status badges.

use orgdash_shared::Workflow;

use crate::{NO_CI, RenderContext};

/// Badge image URL for a workflow file.
pub(crate) fn badge_image_url(ctx: &RenderContext, repo: &str, workflow: &Workflow) -> String {
    format!("{}/badge.svg", workflow_url(ctx, repo, workflow))
}

/// Actions page URL for a workflow file.
pub(crate) fn workflow_url(ctx: &RenderContext, repo: &str, workflow: &Workflow) -> String {
    format!(
        "{}/actions/workflows/{}",
        ctx.repo_url(repo),
        workflow.file_name()
    )
}

/// Clickable badge: `[![name](image)](actions page)`.
pub(crate) fn badge_markdown(ctx: &RenderContext, repo: &str, workflow: &Workflow) -> String {
    format!(
        "[![{}]({})]({})",
        workflow.name,
        badge_image_url(ctx, repo, workflow),
        workflow_url(ctx, repo, workflow)
    )
}

/// Space-separated badges for every given workflow, or the no-CI placeholder.
pub fn render_badges(ctx: &RenderContext, repo: &str, workflows: &[Workflow]) -> String {
    if workflows.is_empty() {
        return NO_CI.to_string();
    }

    workflows
        .iter()
        .map(|wf| badge_markdown(ctx, repo, wf))
        .collect::<Vec<_>>()
        .join(" ")
}
