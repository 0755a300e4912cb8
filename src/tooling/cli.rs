//! CLI Tooling
//!
//! Command-line interface for repository baseline checks. Configuration is
//! loaded once per invocation; flags override file and environment values.

use crate::assessment::no_binaries_in_repo;
use crate::cancel::{cancel_pair, CancelSignal};
use crate::config::{ConfigLoader, FailurePolicy, ScanConfig};
use crate::error::ApiError;
use crate::logging::init_logging;
use crate::scanner::RepoScanner;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use std::future::Future;
use std::path::PathBuf;
use tracing::{info, warn};

/// repo-baseline - OSPS Baseline checks for GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "repo-baseline")]
#[command(about = "Evaluate a GitHub repository against OSPS Baseline controls")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides ./repo-baseline.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Repository selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Repository owner
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Branch to scan (default branch when omitted)
    #[arg(long)]
    pub branch: Option<String>,

    /// GitHub token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Timeout for each partial-content request, in seconds
    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List suspected binary files in the top levels of the repository
    Binaries {
        #[command(flatten)]
        repo: RepoArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Log entries that cannot be checked and keep going
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Evaluate the no-binaries control
    Check {
        #[command(flatten)]
        repo: RepoArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Classify a single path
    Classify {
        #[command(flatten)]
        repo: RepoArgs,
        /// Repository-relative path
        #[arg(long)]
        path: String,
        /// Binary hint from the tree API, if known
        #[arg(long)]
        hint: Option<bool>,
        /// The tree API reported the blob as truncated
        #[arg(long)]
        truncated: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Commands {
    fn repo_args(&self) -> &RepoArgs {
        match self {
            Commands::Binaries { repo, .. }
            | Commands::Check { repo, .. }
            | Commands::Classify { repo, .. } => repo,
        }
    }
}

/// Rendered command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    /// Exit status 0 when true.
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// CLI execution context.
pub struct CliContext {
    config: ScanConfig,
}

impl CliContext {
    /// Load configuration and apply global flags. Logging is not started here.
    pub fn new(cli: &Cli, working_dir: PathBuf) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(cli.config.as_deref(), &working_dir)?;
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(Self { config })
    }

    pub fn from_config(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn init_logging(&self) -> Result<(), ApiError> {
        init_logging(Some(&self.config.logging))
    }

    /// Scan configuration for `command`: loaded config with command flags on top.
    pub fn scan_config(&self, command: &Commands) -> ScanConfig {
        let mut config = self.config.clone();
        let args = command.repo_args();
        if let Some(owner) = &args.owner {
            config.owner = owner.clone();
        }
        if let Some(repo) = &args.repo {
            config.repo = repo.clone();
        }
        if let Some(branch) = &args.branch {
            config.branch = Some(branch.clone());
        }
        if let Some(token) = &args.token {
            config.token = Some(token.clone());
        }
        if let Some(timeout) = args.fetch_timeout_secs {
            config.fetch_timeout_secs = timeout;
        }
        if let Commands::Binaries {
            continue_on_error: true,
            ..
        } = command
        {
            config.failure_policy = FailurePolicy::LogAndContinue;
        }
        config
    }

    /// Execute a command on a fresh runtime. Ctrl-C cancels in-flight fetches.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        block_on(async {
            let (handle, signal) = cancel_pair();
            let watcher = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, cancelling scan");
                    handle.cancel();
                }
            });
            let result = self.execute_async(command, signal).await;
            watcher.abort();
            result
        })?
    }

    /// Execute a command on the current runtime.
    pub async fn execute_async(
        &self,
        command: &Commands,
        cancel: CancelSignal,
    ) -> Result<CommandOutput, ApiError> {
        let config = self.scan_config(command);
        match command {
            Commands::Binaries { format, .. } => {
                let format = OutputFormat::parse(format)?;
                let scanner = RepoScanner::new(config, cancel)?;
                let found = scanner.suspected_binaries().await?;
                info!(count = found.len(), "Binaries command finished");
                let text = match format {
                    OutputFormat::Text if found.is_empty() => "No binary files found".to_string(),
                    OutputFormat::Text => found.join("\n"),
                    OutputFormat::Json => render_json(&json!({
                        "owner": scanner.config().owner,
                        "repo": scanner.config().repo,
                        "count": found.len(),
                        "binaries": found,
                    }))?,
                };
                Ok(CommandOutput::ok(text))
            }
            Commands::Check { format, .. } => {
                let format = OutputFormat::parse(format)?;
                let scanner = RepoScanner::new(config, cancel)?;
                let verdict = no_binaries_in_repo(scanner.suspected_binaries().await);
                let text = match format {
                    OutputFormat::Text => verdict.to_text(),
                    OutputFormat::Json => render_json(&verdict)?,
                };
                Ok(CommandOutput {
                    text,
                    success: verdict.passed(),
                })
            }
            Commands::Classify {
                path,
                hint,
                truncated,
                format,
                ..
            } => {
                let format = OutputFormat::parse(format)?;
                let scanner = RepoScanner::new(config, cancel)?;
                let (binary, evidence) = scanner.classify_path(path, *hint, *truncated).await?;
                let text = match format {
                    OutputFormat::Text => format!(
                        "{}: {} ({})",
                        path,
                        if binary { "binary" } else { "text" },
                        evidence.as_str()
                    ),
                    OutputFormat::Json => render_json(&json!({
                        "path": path,
                        "binary": binary,
                        "evidence": evidence.as_str(),
                    }))?,
                };
                Ok(CommandOutput::ok(text))
            }
        }
    }
}

/// Run `future` to completion on a fresh multi-thread runtime.
pub fn block_on<T>(future: impl Future<Output = T>) -> Result<T, ApiError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;
    Ok(rt.block_on(future))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(format: &str) -> Result<Self, ApiError> {
        match format {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}
