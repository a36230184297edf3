//! # Configuration System
//!
//! Hierarchical TOML configuration for Chatavel.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.chatavel/config.toml` (global user preferences)
//! 3. **Project config** - `./.chatavel/config.toml` (project-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use chatavel_core::config::ChatavelConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChatavelConfig::load_hierarchy()?;
//!     println!("taskbar labels use {} chars", config.taskbar.label_chars());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{ChatavelConfig, EscapeScope, GroupConfig, SurfaceConfig, TaskbarConfig};
pub use validation::validate_config;

impl ChatavelConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
