// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cascading selection of dependent fields
//!
//! Two dependent pairs are tracked per editing session:
//!
//! - IFC class -> predefined type, options from the [`SchemaCatalog`]
//! - property-set name -> property-set file, options from a [`DirectoryListing`]
//!
//! Every transition goes through a validating setter on [`CascadingSelector`];
//! [`SelectionState`] itself is read-only to everything else.

use crate::catalog::SchemaCatalog;
use ifc_schema_model::{DirectoryListing, Error, Result, PREDEFINED_TYPE};
use std::sync::Arc;

/// Per-session selection state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    ifc_class: Option<String>,
    predefined_type: Option<String>,
    userdefined_type: String,
    pset_name: Option<String>,
    pset_file: Option<String>,
}

impl SelectionState {
    /// Chosen class
    pub fn ifc_class(&self) -> Option<&str> {
        self.ifc_class.as_deref()
    }

    /// Chosen predefined type
    pub fn predefined_type(&self) -> Option<&str> {
        self.predefined_type.as_deref()
    }

    /// Free-text user-defined type
    pub fn userdefined_type(&self) -> &str {
        &self.userdefined_type
    }

    /// Chosen property-set group
    pub fn pset_name(&self) -> Option<&str> {
        self.pset_name.as_deref()
    }

    /// Chosen property-set file within the group
    pub fn pset_file(&self) -> Option<&str> {
        self.pset_file.as_deref()
    }
}

/// Enforces the dependent-field rules of a [`SelectionState`]
///
/// Not synchronized: one selector per editing session.
pub struct CascadingSelector {
    catalog: Arc<SchemaCatalog>,
    directory: Arc<dyn DirectoryListing>,
    state: SelectionState,
}

impl CascadingSelector {
    /// Create a selector with an empty selection
    pub fn new(catalog: Arc<SchemaCatalog>, directory: Arc<dyn DirectoryListing>) -> Self {
        Self {
            catalog,
            directory,
            state: SelectionState::default(),
        }
    }

    /// Current selection
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Class options, in schema order
    pub fn available_classes(&self) -> Vec<&str> {
        self.catalog.class_names()
    }

    /// Choose a class
    ///
    /// A predefined type that the new class does not offer is cleared. On an
    /// unknown class the state is left untouched.
    pub fn set_class(&mut self, class_name: &str) -> Result<()> {
        if !self.catalog.contains(class_name) {
            return Err(Error::UnknownClass(class_name.to_string()));
        }

        let still_valid = match self.state.predefined_type.as_deref() {
            Some(current) => self
                .catalog
                .enum_values_of(class_name, PREDEFINED_TYPE)
                .iter()
                .any(|v| v == current),
            None => true,
        };
        if !still_valid {
            log::debug!(
                "clearing predefined type {:?}: not offered by {class_name}",
                self.state.predefined_type
            );
            self.state.predefined_type = None;
        }

        self.state.ifc_class = Some(class_name.to_string());
        Ok(())
    }

    /// Predefined type options for the chosen class
    ///
    /// Empty when no class is chosen or the class has no `PredefinedType`.
    pub fn available_predefined_types(&self) -> &[String] {
        match self.state.ifc_class.as_deref() {
            Some(class_name) => self.catalog.enum_values_of(class_name, PREDEFINED_TYPE),
            None => &[],
        }
    }

    /// Choose a predefined type from the current options
    pub fn set_predefined_type(&mut self, value: &str) -> Result<()> {
        if !self.available_predefined_types().iter().any(|v| v == value) {
            return Err(Error::invalid_option(PREDEFINED_TYPE, value));
        }
        self.state.predefined_type = Some(value.to_string());
        Ok(())
    }

    /// Set the free-text user-defined type
    pub fn set_userdefined_type(&mut self, value: impl Into<String>) {
        self.state.userdefined_type = value.into();
    }

    /// Property-set group options
    pub fn available_pset_names(&self) -> Result<Vec<String>> {
        self.directory.list_groups()
    }

    /// Choose a property-set group; always resets the file choice
    pub fn set_pset_name(&mut self, group: &str) -> Result<()> {
        if !self.directory.list_groups()?.iter().any(|g| g == group) {
            return Err(Error::invalid_option("pset_name", group));
        }
        self.state.pset_name = Some(group.to_string());
        self.state.pset_file = None;
        Ok(())
    }

    /// Property-set file options for the chosen group
    ///
    /// Empty when no group is chosen.
    pub fn available_pset_files(&self) -> Result<Vec<String>> {
        match self.state.pset_name.as_deref() {
            Some(group) => self.directory.list_leaves(group),
            None => Ok(Vec::new()),
        }
    }

    /// Choose a property-set file from the current options
    pub fn set_pset_file(&mut self, file: &str) -> Result<()> {
        if !self.available_pset_files()?.iter().any(|f| f == file) {
            return Err(Error::invalid_option("pset_file", file));
        }
        self.state.pset_file = Some(file.to_string());
        Ok(())
    }
}
