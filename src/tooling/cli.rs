//! CLI Tooling
//!
//! Command-line interface over the integrity engine. Resolves paths and
//! configuration, calls into `snapshot`/`verify`, and renders results.

use crate::config::{ConfigLoader, DriftConfig};
use crate::error::ApiError;
use crate::format::{format_check_json, format_check_text, Palette};
use crate::logging::{resolve_log_file_path, LoggingConfig};
use crate::snapshot::{self, collect, persist};
use crate::verify::{find_additions, verify_all};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

/// Exit status when a command fails outright
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when a check completes but finds drift
pub const EXIT_DRIFT: i32 = 2;

/// Driftcheck CLI - file integrity snapshots
#[derive(Parser, Debug)]
#[command(name = "driftcheck", version)]
#[command(about = "Snapshot file fingerprints for a directory tree and report drift")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
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

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Logging configuration with command-line overrides applied to `base`
    pub fn logging_config(&self, base: &LoggingConfig) -> Result<LoggingConfig, ApiError> {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if self.no_color {
            logging.color = false;
        }
        if self.log_file.is_some() || logging.file.is_some() {
            logging.file = Some(resolve_log_file_path(
                self.log_file.clone(),
                logging.file.take(),
            )?);
        }
        Ok(logging)
    }

    /// Whether report output should be colored
    pub fn use_color(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fingerprint a directory and print the snapshot as JSON
    Scan {
        /// Directory to walk
        directory: PathBuf,
    },
    /// Fingerprint a directory and save the snapshot
    Save {
        /// Directory to walk
        directory: PathBuf,
        /// Destination file (default: <data dir>/snapshot_<name>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare a saved snapshot with the filesystem
    #[command(alias = "verify")]
    Check {
        /// Snapshot file to verify
        snapshot: PathBuf,
        /// Also report files under this directory that the snapshot lacks.
        /// Must be spelled as it was when the snapshot was saved.
        #[arg(long)]
        root: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Only print entries that drifted
        #[arg(long)]
        quiet: bool,
    },
}

/// Check report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Result of one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Rendered output for stdout
    pub text: String,
    /// True when a check observed any drift
    pub drift: bool,
}

impl CommandOutput {
    fn clean(text: String) -> Self {
        CommandOutput { text, drift: false }
    }

    pub fn exit_code(&self) -> i32 {
        if self.drift {
            EXIT_DRIFT
        } else {
            0
        }
    }
}

/// CLI context holding resolved configuration
pub struct CliContext {
    config: DriftConfig,
    palette: Palette,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path`
    /// or the default sources.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(cfg_path) => ConfigLoader::load_from_file(cfg_path).map_err(|e| {
                ApiError::ConfigError(format!(
                    "Failed to load config from {}: {}",
                    cfg_path.display(),
                    e
                ))
            })?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    /// Create a context from an already-built configuration
    pub fn from_config(config: DriftConfig) -> Self {
        Self {
            config,
            palette: Palette::plain(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.palette = Palette { color };
        self
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        match &result {
            Ok(output) => info!(
                command = command_name(command),
                drift = output.drift,
                duration_ms = started.elapsed().as_millis() as u64,
                "Command completed"
            ),
            Err(e) => warn!(command = command_name(command), error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        match command {
            Commands::Scan { directory } => {
                let snapshot = collect(directory)?;
                let bytes = snapshot::encode(&snapshot)?;
                let text = String::from_utf8_lossy(&bytes).trim_end().to_string();
                Ok(CommandOutput::clean(text))
            }
            Commands::Save { directory, output } => self.handle_save(directory, output.as_deref()),
            Commands::Check {
                snapshot,
                root,
                format,
                quiet,
            } => self.handle_check(snapshot, root.as_deref(), *format, *quiet),
        }
    }

    fn handle_save(
        &self,
        directory: &Path,
        output: Option<&Path>,
    ) -> Result<CommandOutput, ApiError> {
        let snapshot = collect(directory)?;
        let destination = match output {
            Some(path) => path.to_path_buf(),
            None => self.config.storage.default_snapshot_path(directory)?,
        };
        persist(&snapshot, &destination)?;
        Ok(CommandOutput::clean(format!(
            "{} Snapshot saved to {}",
            self.palette.success(),
            destination.display()
        )))
    }

    fn handle_check(
        &self,
        snapshot_path: &Path,
        root: Option<&Path>,
        format: ReportFormat,
        quiet: bool,
    ) -> Result<CommandOutput, ApiError> {
        let old = snapshot::load(snapshot_path)?;
        let mut report = verify_all(&old);
        if let Some(root) = root {
            report = report.with_additions(find_additions(&old, root)?);
        }

        let text = match format {
            ReportFormat::Text => format_check_text(&report, self.palette, quiet)
                .trim_end()
                .to_string(),
            ReportFormat::Json => format_check_json(&report)?,
        };
        Ok(CommandOutput {
            text,
            drift: report.has_drift(),
        })
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Scan { .. } => "scan",
        Commands::Save { .. } => "save",
        Commands::Check { .. } => "check",
    }
}
