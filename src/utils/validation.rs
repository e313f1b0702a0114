use crate::domain::model::{MAX_NAME_CHARS, MAX_SCORE, MIN_SCORE};
use crate::utils::error::{LeadError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Storage keys name files, so only ASCII letters, digits, '_' and '-' are allowed.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(LeadError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Keys may only contain ASCII letters, digits, '_' and '-'".to_string(),
        });
    }
    Ok(())
}

/// Trims the company name and checks it against the stored-name rules.
pub fn validate_lead_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LeadError::validation("name", "Nome da empresa é obrigatório"));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(LeadError::validation(
            "name",
            format!(
                "Nome da empresa deve ter no máximo {} caracteres",
                MAX_NAME_CHARS
            ),
        ));
    }
    Ok(trimmed)
}

pub fn validate_lead_score(score: u32) -> Result<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(LeadError::validation(
            "score",
            format!("Pontuação deve estar entre {} e {}", MIN_SCORE, MAX_SCORE),
        ));
    }
    Ok(())
}
