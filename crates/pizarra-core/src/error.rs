//! Error types for Pizarra.
//!
//! Cache operations themselves never fail: a miss is `None` and invalidating
//! or removing an absent key is a no-op. The only fallible surface is
//! loading the cache settings, which reports through [`PizarraError`].

use thiserror::Error;

/// Main error type for Pizarra operations.
///
/// # Example
///
/// ```
/// use pizarra_core::PizarraError;
///
/// let error = PizarraError::settings("pizarra.toml", "invalid type for stale_time_seconds");
/// assert!(error.is_settings_error());
/// ```
#[derive(Debug, Error)]
pub enum PizarraError {
    /// Settings could not be read or deserialized.
    #[error("Failed to load cache settings from '{source_name}': {message}")]
    Settings {
        /// File path or environment prefix that was being read
        source_name: String,
        /// Description of the failure
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A setting was read but holds an unusable value.
    #[error("Invalid setting '{field}': {message}")]
    InvalidSetting {
        /// Field that failed validation
        field: String,
        /// Why the value was rejected
        message: String,
    },
}

impl PizarraError {
    /// Creates a settings error without an underlying cause.
    pub fn settings(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Settings {
            source_name: source_name.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a settings error wrapping the underlying cause.
    pub fn settings_with_cause<E>(source_name: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Settings {
            source_name: source_name.into(),
            message: cause.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an invalid setting error.
    pub fn invalid_setting(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for any settings-related failure.
    pub fn is_settings_error(&self) -> bool {
        matches!(self, Self::Settings { .. } | Self::InvalidSetting { .. })
    }
}

/// Result type alias for Pizarra operations.
pub type Result<T> = std::result::Result<T, PizarraError>;
