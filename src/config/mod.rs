//! Configuration module for erdai.
//!
//! Handles the settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, ExtractSettings, LoggingSettings, Settings, SettingsError, CONFIG_ENV,
    CONFIG_FILE,
};
