//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use orgdash_core::pipeline::{DashboardRunConfig, ProgressReporter, generate_dashboard};
use orgdash_core::update::{CoreSectionRunConfig, update_core_section};
use orgdash_forge::ForgeOptions;
use orgdash_shared::{
    AppConfig, config_file_path, init_config, load_config, load_config_from, resolve_credentials,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// orgdash: CI/CD status dashboards for a GitHub organization.
#[derive(Parser)]
#[command(
    name = "orgdash",
    version,
    about = "Generate CI/CD status dashboards for a GitHub organization.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.orgdash/orgdash.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Organization credentials, overriding the configured environment variables.
#[derive(clap::Args)]
pub(crate) struct CredentialArgs {
    /// Organization login (defaults to $GITHUB_ORG).
    #[arg(long)]
    pub org: Option<String>,

    /// Access token (defaults to $GITHUB_TOKEN).
    #[arg(long)]
    pub token: Option<String>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Regenerate the full CI/CD status dashboard.
    Dashboard {
        #[command(flatten)]
        creds: CredentialArgs,

        /// Output file (defaults to README.md).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the document instead of writing it.
        #[arg(long)]
        stdout: bool,
    },

    /// Refresh the "Core Repositories" section of an existing document.
    CoreSection {
        #[command(flatten)]
        creds: CredentialArgs,

        /// Document to update (defaults to profile/README.md).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Fail when the section heading is missing.
        #[arg(long)]
        strict: bool,

        /// Print the updated document instead of writing it.
        #[arg(long)]
        stdout: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "orgdash=info",
        1 => "orgdash=debug",
        _ => "orgdash=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Dashboard { creds, out, stdout } => {
            cmd_dashboard(config_path, &creds, out, stdout).await
        }
        Command::CoreSection {
            creds,
            file,
            strict,
            stdout,
        } => cmd_core_section(config_path, &creds, file, strict, stdout).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

/// Load the config from `--config` when given, else from the default location.
fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_dashboard(
    config_path: Option<&Path>,
    creds: &CredentialArgs,
    out: Option<PathBuf>,
    stdout: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let credentials = resolve_credentials(&config, creds.org.as_deref(), creds.token.as_deref())?;

    let run_config = DashboardRunConfig {
        credentials,
        forge: ForgeOptions::from(&config.github),
        web_host: config.github.web_host.clone(),
        output: out.unwrap_or_else(|| config.dashboard.output.clone()),
        generated_at: Utc::now(),
        dry_run: stdout,
    };

    info!(
        org = %run_config.credentials.org,
        output = %run_config.output.display(),
        dry_run = stdout,
        "generating dashboard"
    );

    let reporter = CliProgress::new();
    let result = generate_dashboard(&run_config, &reporter).await?;

    if stdout {
        print!("{}", result.document);
        return Ok(());
    }

    println!();
    println!("  Dashboard generated!");
    println!("  Repositories: {}", result.repo_count);
    println!("  With CI/CD:   {}", result.repos_with_ci);
    if let Some(path) = &result.written_to {
        println!("  Path:         {}", path.display());
    }
    println!("  Time:         {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_core_section(
    config_path: Option<&Path>,
    creds: &CredentialArgs,
    file: Option<PathBuf>,
    strict: bool,
    stdout: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let credentials = resolve_credentials(&config, creds.org.as_deref(), creds.token.as_deref())?;

    let run_config = CoreSectionRunConfig {
        credentials,
        forge: ForgeOptions::from(&config.github),
        web_host: config.github.web_host.clone(),
        path: file.unwrap_or_else(|| config.core_section.path.clone()),
        heading: config.core_section.heading.clone(),
        core_repos: config.core_repos(),
        priority_keywords: config.core_section.priority_keywords.clone(),
        badge_limit: config.core_section.badge_limit,
        generated_at: Utc::now(),
        strict,
        dry_run: stdout,
    };

    info!(
        org = %run_config.credentials.org,
        path = %run_config.path.display(),
        entries = run_config.core_repos.len(),
        strict,
        dry_run = stdout,
        "updating core section"
    );

    let reporter = CliProgress::new();
    let result = update_core_section(&run_config, &reporter).await?;

    if stdout {
        print!("{}", result.document);
        return Ok(());
    }

    println!();
    if !result.found {
        println!("  Heading '{}' not found; nothing written.", run_config.heading_line());
        println!();
        return Ok(());
    }

    println!("  Core section updated!");
    println!("  Present: {}", result.present);
    println!("  Missing: {}", result.missing);
    if let Some(path) = &result.written_to {
        println!("  Path:    {}", path.display());
    }
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = config_file_path()?;
    if path.exists() {
        return Err(eyre!(
            "config file already exists at '{}'; remove it first to regenerate",
            path.display()
        ));
    }
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let mut config = resolve_config(config_path)?;
    config.core_repos = config.core_repos();
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn repo_checked(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Checking workflows [{current}/{total}] {name}"));
    }

    fn done(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}
