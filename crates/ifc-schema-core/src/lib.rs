// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Schema Core - Schema-driven data layer for IFC authoring
//!
//! This crate resolves which attributes and legal values apply to an IFC class,
//! writes attribute edits onto model entities, and classifies a model's entities
//! into facility-management taxonomies. It works against the collaborator traits
//! defined in `ifc-schema-model`.
//!
//! # Components
//!
//! - [`SchemaCatalog`] - Class and attribute definitions, in schema order
//! - [`CascadingSelector`] - Class -> predefined type and pset -> file selection
//! - [`EntityMutator`] - Apply a set of named attributes to one entity
//! - [`ClassificationIndex`] - COBie / FMHEM style taxonomies with exclusion rules
//!
//! # Example
//!
//! ```ignore
//! use ifc_schema_core::{CascadingSelector, DataLayerConfig, PsetLibrary, SchemaCatalog};
//! use std::sync::Arc;
//!
//! let config = DataLayerConfig::new().with_schema_version("IFC4");
//! let catalog = Arc::new(SchemaCatalog::from_config(&config)?);
//! let library = Arc::new(PsetLibrary::from_config(&config));
//!
//! let mut selector = CascadingSelector::new(catalog, library);
//! selector.set_class("IfcDoor")?;
//! println!("Types: {:?}", selector.available_predefined_types());
//! ```

mod catalog;
mod classify;
mod config;
#[cfg(test)]
mod fixtures;
mod memory;
mod mutator;
mod pset;
mod selector;
mod taxonomy;

pub use catalog::SchemaCatalog;
pub use classify::{ClassificationIndex, ClassificationReport};
pub use config::DataLayerConfig;
pub use memory::MemoryRepository;
pub use mutator::{EntityMutator, MutationOverrides, MutationRequest};
pub use pset::PsetLibrary;
pub use selector::{CascadingSelector, SelectionState};
pub use taxonomy::{
    ExclusionRule, Taxonomy, TaxonomyRegistry, COBIE_COMPONENTS, COBIE_TYPES, FMHEM_TYPES,
};

pub use ifc_schema_model::{Error, Result};
