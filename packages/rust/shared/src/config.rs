//! Application configuration for orgdash.
//!
//! User config lives at `~/.orgdash/orgdash.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OrgDashError, Result};
use crate::types::{CoreRepoEntry, default_core_repos};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "orgdash.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".orgdash";

// ---------------------------------------------------------------------------
// Config structs (matching orgdash.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Forge API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Full dashboard output settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Core Repositories section settings.
    #[serde(default)]
    pub core_section: CoreSectionConfig,

    /// Curated core repositories. Empty means "use the built-in list".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub core_repos: Vec<CoreRepoEntry>,
}

impl AppConfig {
    /// Core repositories in declaration order, falling back to the built-in list.
    pub fn core_repos(&self) -> Vec<CoreRepoEntry> {
        if self.core_repos.is_empty() {
            default_core_repos()
        } else {
            self.core_repos.clone()
        }
    }
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL (override for GitHub Enterprise or tests).
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Browser host used for repository links and badge URLs.
    #[serde(default = "default_web_host")]
    pub web_host: String,

    /// Name of the env var holding the organization name.
    #[serde(default = "default_org_env")]
    pub org_env: String,

    /// Name of the env var holding the access token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            web_host: default_web_host(),
            org_env: default_org_env(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_web_host() -> String {
    "https://github.com".into()
}
fn default_org_env() -> String {
    "GITHUB_ORG".into()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[dashboard]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// File the full dashboard is written to.
    #[serde(default = "default_dashboard_output")]
    pub output: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            output: default_dashboard_output(),
        }
    }
}

fn default_dashboard_output() -> PathBuf {
    PathBuf::from("README.md")
}

/// `[core_section]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreSectionConfig {
    /// Existing Markdown file whose section is rewritten in place.
    #[serde(default = "default_core_path")]
    pub path: PathBuf,

    /// Heading text of the section (without the `## ` marker).
    #[serde(default = "default_core_heading")]
    pub heading: String,

    /// Maximum badges rendered per core repository.
    #[serde(default = "default_badge_limit")]
    pub badge_limit: usize,

    /// Ordered keywords used to rank workflows; earlier wins.
    #[serde(default = "default_priority_keywords")]
    pub priority_keywords: Vec<String>,
}

impl Default for CoreSectionConfig {
    fn default() -> Self {
        Self {
            path: default_core_path(),
            heading: default_core_heading(),
            badge_limit: default_badge_limit(),
            priority_keywords: default_priority_keywords(),
        }
    }
}

fn default_core_path() -> PathBuf {
    PathBuf::from("profile").join("README.md")
}
fn default_core_heading() -> String {
    "Core Repositories".into()
}
fn default_badge_limit() -> usize {
    2
}

/// Workflow ranking keywords, highest priority first.
pub fn default_priority_keywords() -> Vec<String> {
    ["ci", "main", "test", "build", "deploy"]
        .into_iter()
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// Credentials (runtime, resolved from env + CLI flags)
// ---------------------------------------------------------------------------

/// Organization and access token for one run.
///
/// Resolved once at the edge and passed down explicitly; nothing below the
/// CLI reads the environment.
#[derive(Clone)]
pub struct Credentials {
    /// Organization login.
    pub org: String,
    /// Access token sent as `Authorization: token <value>`.
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("org", &self.org)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolve credentials from explicit overrides, then the configured env vars.
///
/// Fails with a config error naming both variables when either value is
/// missing or empty.
pub fn resolve_credentials(
    config: &AppConfig,
    org: Option<&str>,
    token: Option<&str>,
) -> Result<Credentials> {
    let org = non_empty(org.map(String::from)).or_else(|| env_value(&config.github.org_env));
    let token = non_empty(token.map(String::from)).or_else(|| env_value(&config.github.token_env));

    match (org, token) {
        (Some(org), Some(token)) => Ok(Credentials { org, token }),
        _ => Err(OrgDashError::config(format!(
            "{} and {} environment variables must be set",
            config.github.org_env, config.github.token_env
        ))),
    }
}

fn env_value(name: &str) -> Option<String> {
    non_empty(std::env::var(name).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.orgdash/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| OrgDashError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.orgdash/orgdash.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OrgDashError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| OrgDashError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| OrgDashError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig {
        core_repos: default_core_repos(),
        ..AppConfig::default()
    };
    let content =
        toml::to_string_pretty(&config).map_err(|e| OrgDashError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| OrgDashError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("api_base"));
        assert!(toml_str.contains("GITHUB_TOKEN"));
        assert!(toml_str.contains("Core Repositories"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.github.org_env, "GITHUB_ORG");
        assert_eq!(parsed.core_section.badge_limit, 2);
        assert_eq!(parsed.dashboard.output, PathBuf::from("README.md"));
    }

    #[test]
    fn config_with_core_repos() {
        let toml_str = r#"
[github]
web_host = "https://git.example.com"

[core_section]
path = "docs/ORG.md"
priority_keywords = ["release", "ci"]

[[core_repos]]
name = "engine"
purpose = "Rendering engine"
team = "Graphics"

[[core_repos]]
name = "launcher"
purpose = "Desktop launcher"
team = "Client"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.github.web_host, "https://git.example.com");
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.core_section.path, PathBuf::from("docs/ORG.md"));
        assert_eq!(config.core_section.heading, "Core Repositories");
        assert_eq!(config.core_section.priority_keywords, vec!["release", "ci"]);

        let names: Vec<_> = config.core_repos().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["engine", "launcher"]);
    }

    #[test]
    fn empty_core_repos_fall_back_to_builtin() {
        let config = AppConfig::default();
        assert_eq!(config.core_repos(), default_core_repos());
    }

    #[test]
    fn default_keywords_are_ordered() {
        assert_eq!(
            default_priority_keywords(),
            vec!["ci", "main", "test", "build", "deploy"]
        );
    }

    #[test]
    fn credentials_from_overrides() {
        let mut config = AppConfig::default();
        // Unique env var names keep this independent of the host environment
        config.github.org_env = "ORGDASH_TEST_ORG_UNSET_12345".into();
        config.github.token_env = "ORGDASH_TEST_TOKEN_UNSET_12345".into();

        let creds = resolve_credentials(&config, Some("acme"), Some("t0ken")).expect("resolve");
        assert_eq!(creds.org, "acme");
        assert_eq!(creds.token, "t0ken");
        assert!(!format!("{creds:?}").contains("t0ken"));
    }

    #[test]
    fn credentials_missing_is_config_error() {
        let mut config = AppConfig::default();
        config.github.org_env = "ORGDASH_TEST_ORG_UNSET_12345".into();
        config.github.token_env = "ORGDASH_TEST_TOKEN_UNSET_12345".into();

        let err = resolve_credentials(&config, Some("acme"), None).unwrap_err();
        assert!(matches!(err, OrgDashError::Config { .. }));
        assert!(err.to_string().contains("ORGDASH_TEST_TOKEN_UNSET_12345"));

        let err = resolve_credentials(&config, Some("  "), Some("t0ken")).unwrap_err();
        assert!(matches!(err, OrgDashError::Config { .. }));
    }
}
