// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-set library on disk
//!
//! Layout: `<data_dir>/pset/<Pset name>/<file>.csv`. Only names are listed; the
//! CSV contents belong to whoever applies the property set.

use crate::config::DataLayerConfig;
use ifc_schema_model::{DirectoryListing, Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

const PSET_FILE_EXTENSION: &str = "csv";

/// Filesystem-backed [`DirectoryListing`] over a property-set library
#[derive(Clone, Debug)]
pub struct PsetLibrary {
    root: PathBuf,
}

impl PsetLibrary {
    /// Create a library rooted at `root` (the `pset/` directory itself)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Library at the config's `pset_dir()`
    pub fn from_config(config: &DataLayerConfig) -> Self {
        Self::new(config.pset_dir())
    }

    /// Library root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of `group`; the name must be a single plain path component
    fn group_dir(&self, group: &str) -> Result<PathBuf> {
        let mut components = Path::new(group).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == group => Ok(self.root.join(name)),
            _ => Err(Error::invalid_option("pset_name", group)),
        }
    }

    fn sorted_names(
        dir: &Path,
        keep: impl Fn(&fs::DirEntry) -> Option<String>,
    ) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            if let Some(name) = keep(&entry?) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

impl DirectoryListing for PsetLibrary {
    fn list_groups(&self) -> Result<Vec<String>> {
        Self::sorted_names(&self.root, |entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            is_dir.then(|| entry.file_name().to_string_lossy().into_owned())
        })
    }

    fn list_leaves(&self, group: &str) -> Result<Vec<String>> {
        Self::sorted_names(&self.group_dir(group)?, |entry| {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                return None;
            }
            let path = entry.path();
            let is_pset = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(PSET_FILE_EXTENSION));
            if !is_pset {
                return None;
            }
            path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> (tempfile::TempDir, PsetLibrary) {
        let dir = tempfile::tempdir().unwrap();
        let pset = dir.path().join("pset");
        fs::create_dir_all(pset.join("Pset_WallCommon")).unwrap();
        fs::create_dir_all(pset.join("Pset_DoorCommon")).unwrap();
        fs::write(pset.join("Pset_WallCommon/fire.csv"), "FireRating,REI60\n").unwrap();
        fs::write(pset.join("Pset_WallCommon/acoustic.csv"), "AcousticRating,45dB\n").unwrap();
        fs::write(pset.join("Pset_WallCommon/notes.txt"), "ignored").unwrap();
        fs::write(pset.join("README"), "ignored").unwrap();
        fs::create_dir_all(pset.join("Pset_WallCommon/archive.csv")).unwrap();
        fs::write(dir.path().join("outside.csv"), "ignored").unwrap();

        let config = DataLayerConfig::new().with_data_dir(dir.path());
        (dir, PsetLibrary::from_config(&config))
    }

    #[test]
    fn test_list_groups() {
        let (_dir, library) = library();
        assert_eq!(
            library.list_groups().unwrap(),
            vec!["Pset_DoorCommon", "Pset_WallCommon"]
        );
    }

    #[test]
    fn test_list_leaves_strips_extension() {
        let (_dir, library) = library();
        assert_eq!(
            library.list_leaves("Pset_WallCommon").unwrap(),
            vec!["acoustic", "fire"]
        );
        assert!(library.list_leaves("Pset_DoorCommon").unwrap().is_empty());
    }

    #[test]
    fn test_group_must_be_single_component() {
        let (_dir, library) = library();
        for group in ["..", "../pset", "/etc", "Pset_WallCommon/..", "."] {
            let err = library.list_leaves(group).unwrap_err();
            assert!(matches!(err, Error::InvalidOption { .. }), "{group}");
        }
    }

    #[test]
    fn test_missing_group_is_io_error() {
        let (_dir, library) = library();
        let err = library.list_leaves("Pset_Missing").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
