//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.chatavel/config.toml`
//! 3. **Project config** - `./.chatavel/config.toml`
//! 4. **CLI arguments** - Command-line flags (highest priority)

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::types::{ChatavelConfig, GroupConfig, SurfaceConfig, TaskbarConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".chatavel";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// Missing config files are not errors; unreadable or malformed ones are.
pub fn load_hierarchy() -> Result<ChatavelConfig, ConfigError> {
    let user_dir = dirs::home_dir();
    let project_dir = std::env::current_dir()?;
    load_hierarchy_from(user_dir.as_deref(), &project_dir)
}

/// Load configuration using explicit base directories.
///
/// `user_dir` is normally the home directory (skipped when `None`), and
/// `project_dir` the current working directory. Each is searched for
/// `.chatavel/config.toml`.
pub fn load_hierarchy_from(
    user_dir: Option<&Path>,
    project_dir: &Path,
) -> Result<ChatavelConfig, ConfigError> {
    let mut config = ChatavelConfig::default();

    if let Some(dir) = user_dir {
        match load_config_file(&config_path(dir)) {
            Ok(user_config) => config = merge_configs(config, user_config),
            Err(ConfigError::ConfigNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    match load_config_file(&config_path(project_dir)) {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(ConfigError::ConfigNotFound { .. }) => {}
        Err(e) => return Err(e),
    }

    validate_config(&config)?;

    tracing::debug!(
        event = "core.config.load_completed",
        project_dir = %project_dir.display()
    );

    Ok(config)
}

fn config_path(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a single configuration file.
pub fn load_config_file(path: &Path) -> Result<ChatavelConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        Err(e) => return Err(ConfigError::IoError { source: e }),
    };

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with `override_config` taking precedence
/// wherever it sets a value.
pub fn merge_configs(base: ChatavelConfig, override_config: ChatavelConfig) -> ChatavelConfig {
    ChatavelConfig {
        taskbar: TaskbarConfig {
            base_z_index: override_config
                .taskbar
                .base_z_index
                .or(base.taskbar.base_z_index),
            label_chars: override_config
                .taskbar
                .label_chars
                .or(base.taskbar.label_chars),
        },
        surface: SurfaceConfig {
            show_minimize: override_config
                .surface
                .show_minimize
                .or(base.surface.show_minimize),
            close_on_backdrop: override_config
                .surface
                .close_on_backdrop
                .or(base.surface.close_on_backdrop),
            escape_scope: override_config
                .surface
                .escape_scope
                .or(base.surface.escape_scope),
        },
        group: GroupConfig {
            name: override_config.group.name.or(base.group.name),
            id: override_config.group.id.or(base.group.id),
        },
    }
}
