pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, PriorityThresholds, RankingEngine};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::FixedOffset;
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lead-ranking")]
#[command(about = "Score, rank and export qualified leads")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Directory holding the lead collection")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Save a score under a company name
    Save {
        #[arg(long)]
        score: u32,
        #[arg(long)]
        name: Option<String>,
    },
    /// Sum questionnaire answers and show the verdict
    Triage {
        #[arg(long, value_delimiter = ',', required = true)]
        answers: Vec<u32>,
        #[arg(long, help = "Save the total to the ranking")]
        save: bool,
        #[arg(long)]
        name: Option<String>,
    },
    /// Show the ranking
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show ranking statistics
    Stats {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Export the ranking as CSV
    Export {
        #[arg(long)]
        output_dir: Option<String>,
    },
    /// Delete every stored lead
    Clear {
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<RankingSettings> {
        RankingSettings::load(self.config.as_deref(), self.data_dir.as_deref())
    }
}

/// Effective settings after merging defaults, the TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingSettings {
    pub data_dir: String,
    pub storage_key: String,
    pub thresholds: PriorityThresholds,
    pub utc_offset_minutes: Option<i32>,
    pub debounce: Duration,
    pub export_dir: String,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self::from(TomlConfig::default())
    }
}

impl From<TomlConfig> for RankingSettings {
    fn from(config: TomlConfig) -> Self {
        Self {
            data_dir: config.storage.data_dir,
            storage_key: config.storage.storage_key,
            thresholds: PriorityThresholds {
                high: config.ranking.high_threshold,
                medium: config.ranking.medium_threshold,
            },
            utc_offset_minutes: config.ranking.utc_offset_minutes,
            debounce: Duration::from_millis(config.search.debounce_ms),
            export_dir: config.export.output_dir,
        }
    }
}

impl RankingSettings {
    /// Precedence: explicit override > TOML file > defaults. The TOML
    /// layer is validated before it is merged.
    pub fn load(config_path: Option<&str>, data_dir_override: Option<&str>) -> Result<Self> {
        let mut toml = match config_path {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };

        if let Some(data_dir) = data_dir_override {
            toml.storage.data_dir = data_dir.to_string();
        }

        toml.validate()?;
        Ok(Self::from(toml))
    }
}

impl ConfigProvider for RankingSettings {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }

    fn high_threshold(&self) -> u32 {
        self.thresholds.high
    }

    fn medium_threshold(&self) -> u32 {
        self.thresholds.medium
    }

    fn utc_offset_minutes(&self) -> Option<i32> {
        self.utc_offset_minutes
    }

    fn debounce(&self) -> Duration {
        self.debounce
    }

    fn export_dir(&self) -> &str {
        &self.export_dir
    }
}

/// Builds the ranking engine described by a configuration.
pub fn ranking_engine(config: &impl ConfigProvider) -> RankingEngine {
    let engine = RankingEngine::new(PriorityThresholds {
        high: config.high_threshold(),
        medium: config.medium_threshold(),
    });

    match config
        .utc_offset_minutes()
        .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    {
        Some(offset) => engine.with_display_offset(offset),
        None => engine,
    }
}
