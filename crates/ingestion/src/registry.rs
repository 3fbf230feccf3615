//! Dataset lookup table behind the asset selector.

use ohlcv_core::config::{DataConfig, DatasetEntry};
use ohlcv_core::{Error, Result};

/// Maps asset keys to dataset files, falling back to a default asset.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    data_dir: String,
    entries: Vec<DatasetEntry>,
    default_idx: usize,
}

impl DatasetRegistry {
    /// Build the registry from configuration.
    pub fn new(config: &DataConfig) -> Result<Self> {
        let default_idx = config
            .datasets
            .iter()
            .position(|d| d.key == config.default_asset)
            .ok_or_else(|| {
                Error::config(format!(
                    "default asset '{}' is not in the dataset table",
                    config.default_asset
                ))
            })?;

        Ok(Self {
            data_dir: config.data_dir.trim_end_matches('/').to_string(),
            entries: config.datasets.clone(),
            default_idx,
        })
    }

    /// Dataset for a key, or the default dataset for unknown keys.
    pub fn resolve(&self, key: &str) -> &DatasetEntry {
        self.entries
            .iter()
            .find(|d| d.key == key)
            .unwrap_or(&self.entries[self.default_idx])
    }

    /// Whether the key is configured.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|d| d.key == key)
    }

    /// Location of the dataset for a key.
    pub fn url(&self, key: &str) -> String {
        let file = &self.resolve(key).file;
        if self.data_dir.is_empty() {
            file.clone()
        } else {
            format!("{}/{}", self.data_dir, file)
        }
    }

    /// `(key, label)` pairs in display order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|d| (d.key.as_str(), d.label.as_str()))
    }
}
