//! Configuration validation.

use crate::config::types::ChatavelConfig;
use crate::errors::ConfigError;

/// Validate the effective configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` if the taskbar label would be
/// empty or the group id is blank.
pub fn validate_config(config: &ChatavelConfig) -> Result<(), ConfigError> {
    if config.taskbar.label_chars() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "taskbar.label_chars must be at least 1".to_string(),
        });
    }

    if config.group.id().trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "group.id cannot be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{GroupConfig, TaskbarConfig};
    use crate::errors::ChatavelError;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ChatavelConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_label_chars_rejected() {
        let config = ChatavelConfig {
            taskbar: TaskbarConfig {
                label_chars: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("label_chars"));
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
        assert!(err.is_user_error());
    }

    #[test]
    fn test_blank_group_id_rejected() {
        let config = ChatavelConfig {
            group: GroupConfig {
                name: None,
                id: Some("   ".to_string()),
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }
}
