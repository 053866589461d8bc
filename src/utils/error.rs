use crate::domain::model::{Field, FieldError};
use std::fmt;
use thiserror::Error;

/// All field-level failures found by one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Records the outcome of a field rule and hands back the accepted value.
    pub fn check<T>(&mut self, outcome: std::result::Result<T, FieldError>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Notification dispatch failed: {message}")]
    DispatchError { message: String },

    #[error("Feed '{feed}' could not be fetched: {message}")]
    FeedError { feed: String, message: String },

    #[error("'{action}' is not allowed on step {step}")]
    InvalidTransition { step: String, action: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Network,
    State,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn dispatch(message: impl Into<String>) -> Self {
        SiteError::DispatchError {
            message: message.into(),
        }
    }

    pub fn feed(feed: impl Into<String>, message: impl Into<String>) -> Self {
        SiteError::FeedError {
            feed: feed.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ConfigError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            SiteError::Validation(_) => ErrorCategory::Validation,
            SiteError::HttpError(_) | SiteError::DispatchError { .. } | SiteError::FeedError { .. } => {
                ErrorCategory::Network
            }
            SiteError::InvalidTransition { .. } => ErrorCategory::State,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Every failure here is recoverable by user action; severity only drives
    /// CLI exit codes and log levels.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::State => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SiteError::Validation(errors) => {
                let fields: Vec<&str> = errors.errors().iter().map(|e| e.field.label()).collect();
                format!("Correct the highlighted fields and try again: {}", fields.join(", "))
            }
            SiteError::DispatchError { .. } | SiteError::HttpError(_) => {
                "Your details were kept. Submit again in a moment.".to_string()
            }
            SiteError::FeedError { .. } => {
                "Check the feed credentials; the bundled portfolio is shown meanwhile.".to_string()
            }
            SiteError::MissingConfigError { field } => {
                format!("Add '{}' to the site configuration file", field)
            }
            SiteError::InvalidConfigValueError { field, .. }
            | SiteError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' in the site configuration file", field)
            }
            SiteError::ConfigError { .. } => "Review the site configuration file".to_string(),
            SiteError::InvalidTransition { .. } => {
                "Complete the current step before moving on".to_string()
            }
            SiteError::IoError(_) | SiteError::SerializationError(_) => {
                "Check file permissions and disk space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Validation(errors) => errors.to_string(),
            SiteError::DispatchError { .. } | SiteError::HttpError(_) => {
                "There was an error submitting your request. Please try again.".to_string()
            }
            SiteError::FeedError { feed, .. } => {
                format!("Latest {} posts are unavailable right now", feed)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
