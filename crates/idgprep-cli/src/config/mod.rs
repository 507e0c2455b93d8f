//! Configuration loading for idgprep.
//! Reads idgprep.toml from the path given by --config / IDGPREP_CONFIG, or
//! from the current directory. A missing default file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use anyhow::Context;
use idgprep_ingestion::discovery::DEFAULT_INPUT_PATTERN;
use idgprep_ingestion::writer::{WriteMode, OUTPUT_FILE_NAME};

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "idgprep.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            pattern: default_pattern(),
        }
    }
}

fn default_input_dir() -> PathBuf { PathBuf::from(".") }
fn default_pattern()   -> String  { DEFAULT_INPUT_PATTERN.to_string() }

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `None` means next to the running executable.
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub atomic: bool,
}


impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist; the default `idgprep.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                path.to_path_buf()
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::info!(config = %path.display(), "Configuration loaded");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Effective settings for one run: config file values with CLI overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Explicit inputs; empty means discover in `input_dir`.
    pub inputs: Vec<PathBuf>,
    pub input_dir: PathBuf,
    pub pattern: String,
    /// `None` means next to the running executable.
    pub output: Option<PathBuf>,
    pub write_mode: WriteMode,
    pub dry_run: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: Config) -> Self {
        let atomic = cli.atomic || config.output.atomic;
        Self {
            inputs: cli.inputs.clone(),
            input_dir: cli.input_dir.clone().unwrap_or(config.input.dir),
            pattern: cli.pattern.clone().unwrap_or(config.input.pattern),
            output: cli.output.clone().or(config.output.path),
            write_mode: if atomic { WriteMode::Atomic } else { WriteMode::Truncate },
            dry_run: cli.dry_run,
        }
    }

    /// Output path, falling back to the executable's directory.
    pub fn output_path(&self) -> anyhow::Result<PathBuf> {
        match &self.output {
            Some(path) => Ok(path.clone()),
            None => default_output_path(),
        }
    }
}

/// `idg_target_list.tsv` in the directory holding the running executable.
pub fn default_output_path() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe().context("Could not locate the running executable")?;
    let dir = exe
        .parent()
        .context("Executable path has no parent directory")?;
    Ok(dir.join(OUTPUT_FILE_NAME))
}
