use crate::core::store::DEFAULT_STORAGE_KEY;
use crate::domain::model::{MAX_SCORE, MIN_SCORE};
use crate::utils::error::{LeadError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_range, validate_storage_key, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub ranking: RankingConfig,
    pub search: SearchConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub storage_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./lead-data".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub high_threshold: u32,
    pub medium_threshold: u32,
    /// Offset used to display dates; host local offset when absent.
    pub utc_offset_minutes: Option<i32>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            high_threshold: 25,
            medium_threshold: 15,
            utc_offset_minutes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: "./exports".to_string(),
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LeadError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LeadError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LeadError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_storage_key("storage.storage_key", &self.storage.storage_key)?;
        validate_path("export.output_dir", &self.export.output_dir)?;

        validate_range(
            "ranking.high_threshold",
            self.ranking.high_threshold,
            MIN_SCORE,
            MAX_SCORE,
        )?;
        validate_range(
            "ranking.medium_threshold",
            self.ranking.medium_threshold,
            MIN_SCORE,
            MAX_SCORE,
        )?;
        if self.ranking.medium_threshold >= self.ranking.high_threshold {
            return Err(LeadError::InvalidConfigValueError {
                field: "ranking.medium_threshold".to_string(),
                value: self.ranking.medium_threshold.to_string(),
                reason: format!(
                    "Must be lower than ranking.high_threshold ({})",
                    self.ranking.high_threshold
                ),
            });
        }
        if let Some(offset) = self.ranking.utc_offset_minutes {
            validate_range("ranking.utc_offset_minutes", offset, -14 * 60, 14 * 60)?;
        }

        validate_positive_number("search.debounce_ms", self.search.debounce_ms, 1)?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
