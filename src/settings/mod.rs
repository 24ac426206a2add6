//! Settings module
//!
//! Typed configuration loaded from YAML with every default resolved at load
//! time.

use std::path::PathBuf;

use thiserror::Error;

pub mod settings_struct;
pub mod yaml_deserializer;

pub use settings_struct::Settings;
pub use yaml_deserializer::{default_regions, ClashSettings, NamingSettings, OutputSettings};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
}
