// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data directory configuration

use ifc_schema_model::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where schema documents and the property-set library live
///
/// All fields default, so a config document only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataLayerConfig {
    /// Directory holding `ifc_elements_<version>.json` schema documents
    pub schema_dir: PathBuf,
    /// Directory holding the `pset/` library
    pub data_dir: PathBuf,
    /// Schema version used to pick the schema document (e.g., "IFC4", "IFC2X3")
    pub schema_version: String,
}

impl Default for DataLayerConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from("schema"),
            data_dir: PathBuf::from("data"),
            schema_version: "IFC4".to_string(),
        }
    }
}

impl DataLayerConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a config document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::other(format!("invalid config: {e}")))
    }

    /// Set the schema directory
    pub fn with_schema_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schema_dir = dir.into();
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the schema version
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = version.into();
        self
    }

    /// Path of the schema document for the configured version
    pub fn schema_path(&self) -> PathBuf {
        self.schema_dir
            .join(format!("ifc_elements_{}.json", self.schema_version))
    }

    /// Root of the property-set library
    pub fn pset_dir(&self) -> PathBuf {
        self.data_dir.join("pset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DataLayerConfig::new();
        assert_eq!(
            config.schema_path(),
            PathBuf::from("schema/ifc_elements_IFC4.json")
        );
        assert_eq!(config.pset_dir(), PathBuf::from("data/pset"));
    }

    #[test]
    fn test_partial_document() {
        let config = DataLayerConfig::from_json_str(r#"{"schema_version": "IFC2X3"}"#).unwrap();
        assert_eq!(config.schema_version, "IFC2X3");
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_builder() {
        let config = DataLayerConfig::new()
            .with_schema_dir("/opt/bim/schema")
            .with_data_dir("/opt/bim/data")
            .with_schema_version("IFC4X3");
        assert_eq!(
            config.schema_path(),
            PathBuf::from("/opt/bim/schema/ifc_elements_IFC4X3.json")
        );
        assert_eq!(config.pset_dir(), PathBuf::from("/opt/bim/data/pset"));
    }

    #[test]
    fn test_malformed_document() {
        assert!(DataLayerConfig::from_json_str("{not json").is_err());
    }
}
