//! Configuration management
//!
//! Handles user settings and selection of the API environment.

pub mod environment;
pub mod settings;

pub use environment::Environment;
pub use settings::{EnvironmentConfig, Settings, config_dir, load_settings};
