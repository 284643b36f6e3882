//! Shared types, error model, and configuration for orgdash.
//!
//! This crate is the foundation depended on by all other orgdash crates.
//! It provides:
//! - [`OrgDashError`], the unified error type
//! - Domain types ([`Repository`], [`Workflow`], [`CoreRepoEntry`])
//! - Configuration ([`AppConfig`], [`Credentials`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CoreSectionConfig, Credentials, DashboardConfig, GithubConfig, config_dir,
    config_file_path, default_priority_keywords, init_config, load_config, load_config_from,
    resolve_credentials,
};
pub use error::{OrgDashError, Result};
pub use types::{
    ACTIVE_STATE, CoreRepoEntry, RepoStatus, Repository, Workflow, WorkflowList,
    default_core_repos, sort_repositories,
};
