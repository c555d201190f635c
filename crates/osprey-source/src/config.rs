use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Settings for one resolution session.
///
/// ```toml
/// [crate]
/// name = "demo"
/// prefix_crate_name = false
///
/// [resolve]
/// check_privacy = true
/// max_diagnostics = 0
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ResolveConfig {
    #[serde(default, rename = "crate")]
    pub krate: CrateSection,

    #[serde(default)]
    pub resolve: ResolveSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrateSection {
    /// Name of the crate being resolved
    #[serde(default = "default_crate_name")]
    pub name: String,

    /// Start every canonical path with the crate name
    #[serde(default)]
    pub prefix_crate_name: bool,
}

impl Default for CrateSection {
    fn default() -> Self {
        Self { name: default_crate_name(), prefix_crate_name: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Run the privacy reporter once resolution is done
    #[serde(default = "default_true")]
    pub check_privacy: bool,

    /// Keep at most this many diagnostics; `0` keeps all of them
    #[serde(default)]
    pub max_diagnostics: usize,
}

impl Default for ResolveSection {
    fn default() -> Self {
        Self { check_privacy: true, max_diagnostics: 0 }
    }
}

pub fn default_crate_name() -> String {
    "main".to_string()
}

fn default_true() -> bool {
    true
}

impl ResolveConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ResolveConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading resolver configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn with_crate_name(mut self, name: impl Into<String>) -> Self {
        self.krate.name = name.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.krate.name;
        let valid = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(ConfigError::InvalidValue {
                key: "crate.name".to_string(),
                message: format!("`{name}` is not a valid crate name"),
            });
        }
        Ok(())
    }
}
