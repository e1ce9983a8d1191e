//! Error types for the settings system

use thiserror::Error;

/// Errors that can occur when loading or validating settings
#[derive(Error, Debug)]
pub enum SettingError {
    /// Invalid value for the setting
    #[error("Invalid value for setting '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] toml::de::Error),

    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SettingError {
    /// Create an invalid value error
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingError::InvalidValue {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for settings operations
pub type SettingResult<T> = Result<T, SettingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SettingError::invalid("labels.faded_opacity", "must be within [0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid value for setting 'labels.faded_opacity': must be within [0, 1]"
        );
    }
}
