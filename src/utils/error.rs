use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Local storage unavailable: {reason}")]
    StorageUnavailableError { reason: String },

    #[error("Nothing to export: the lead list is empty")]
    EmptyExportError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Storage,
    Export,
    Configuration,
    System,
}

impl LeadError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        LeadError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn storage_unavailable(reason: impl Into<String>) -> Self {
        LeadError::StorageUnavailableError {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            LeadError::ValidationError { .. } => ErrorCategory::Validation,
            LeadError::StorageUnavailableError { .. } => ErrorCategory::Storage,
            LeadError::EmptyExportError => ErrorCategory::Export,
            LeadError::ConfigError { .. } | LeadError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            LeadError::IoError(_)
            | LeadError::SerializationError(_)
            | LeadError::CsvError(_)
            | LeadError::EncodingError(_) => ErrorCategory::System,
        }
    }

    /// Text shown to the user inside a notification.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LeadError::ValidationError { message, .. } => message.clone(),
            LeadError::StorageUnavailableError { .. } => {
                "Armazenamento local não disponível".to_string()
            }
            LeadError::EmptyExportError => "Não há dados para exportar".to_string(),
            LeadError::ConfigError { message } => format!("Configuração inválida: {}", message),
            LeadError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuração inválida em {}: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LeadError>;
