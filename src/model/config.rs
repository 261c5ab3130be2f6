use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::plugin::descriptor::PluginDescriptor;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub scan: ScanConfig,
    #[serde(default)]
    pub plugins: Vec<PluginDescriptor>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Levels to descend below a dropped directory; 0 = the entry itself
    /// only, negative = unlimited.
    pub depth: i32,
    pub extensions: Vec<String>,
    pub filter_by_extensions: bool,
    pub include_directories: bool,
}

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::parse(include_str!("../../config/default.toml"))?;

        if let Some(config_path) = Self::user_config_path()
            && config_path.exists()
        {
            let user_str = fs::read_to_string(&config_path)?;
            config = Self::parse(&user_str)?; // TODO: deep merge instead of full replace
        }

        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "rebatch")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn save(&self) -> Result<PathBuf> {
        let Some(config_path) = Self::user_config_path() else {
            bail!("cannot determine the user config directory");
        };
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_path, toml::to_string_pretty(self)?)?;
        Ok(config_path)
    }

    /// Append built-in descriptors the user's plugin list does not shadow,
    /// so every registered plugin is visible in one place.
    pub fn ensure_built_in_plugins<'a>(
        &mut self,
        built_ins: impl IntoIterator<Item = &'a PluginDescriptor>,
    ) {
        for descriptor in built_ins {
            if !self.plugins.iter().any(|p| p.id == descriptor.id) {
                self.plugins.push(descriptor.clone());
            }
        }
    }

    /// Find a plugin descriptor by exact id, or by name ignoring case.
    pub fn find_plugin(&self, key: &str) -> Option<&PluginDescriptor> {
        self.plugins
            .iter()
            .find(|plugin| plugin.id == key)
            .or_else(|| {
                self.plugins
                    .iter()
                    .find(|plugin| plugin.name.eq_ignore_ascii_case(key))
            })
    }

    /// The extension filter the scanner should apply: empty when filtering
    /// is disabled.
    pub fn effective_extensions(&self) -> &[String] {
        if self.scan.filter_by_extensions {
            &self.scan.extensions
        } else {
            &[]
        }
    }
}
