//! Format-agnostic loading of allow-list config files

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// On-disk shape of an allow-list file.
///
/// ```toml
/// keep = ["crm_get_company", "notes_list"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowListConfig {
    /// Tool names whose blocks are preserved.
    #[serde(default)]
    pub keep: Vec<String>,
}

/// Format-agnostic configuration loader.
///
/// Detects the format from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load and deserialize a config file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        let extension = path.extension().unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::ConfigParse {
                path: path.to_native(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Load an allow-list file.
    pub fn load_allow_list(&self, path: &NormalizedPath) -> Result<AllowListConfig> {
        let config: AllowListConfig = self.load(path)?;
        tracing::debug!(path = %path, names = config.keep.len(), "loaded allow-list config");
        Ok(config)
    }
}
