use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::yaml_deserializer::{ClashSettings, NamingSettings, OutputSettings};
use super::SettingsError;

/// Settings structure holding every option a run needs, defaults resolved
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub clash: ClashSettings,
    pub output: OutputSettings,
    pub naming: NamingSettings,
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded settings from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Parse settings from YAML content. Empty content yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, SettingsError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Default location of the generated Clash configuration
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.output.directory).join(&self.output.clash_config_file)
    }
}

impl ClashSettings {
    /// The document every conversion starts from.
    ///
    /// Keys come in a fixed order with `proxies` empty; extra keys from the
    /// settings file follow.
    pub fn base_document(&self) -> Mapping {
        let mut doc = Mapping::new();
        doc.insert("port".into(), self.port.into());
        doc.insert("socks-port".into(), self.socks_port.into());
        doc.insert("allow-lan".into(), self.allow_lan.into());
        doc.insert("mode".into(), self.mode.clone().into());
        doc.insert("log-level".into(), self.log_level.clone().into());
        doc.insert(
            "external-controller".into(),
            self.external_controller.clone().into(),
        );
        doc.insert("secret".into(), self.secret.clone().into());
        doc.insert("dns".into(), self.dns.clone());
        doc.insert("rule-providers".into(), self.rule_providers.clone());
        doc.insert(
            "rules".into(),
            Value::Sequence(self.rules.iter().cloned().map(Value::String).collect()),
        );
        doc.insert(
            "proxy-groups".into(),
            Value::Sequence(self.proxy_groups.clone()),
        );
        doc.insert("proxies".into(), Value::Sequence(Vec::new()));

        for (key, value) in &self.extra {
            // proxies always come from the conversion
            if key.as_str() == Some("proxies") || doc.contains_key(key) {
                continue;
            }
            doc.insert(key.clone(), value.clone());
        }
        doc
    }
}
