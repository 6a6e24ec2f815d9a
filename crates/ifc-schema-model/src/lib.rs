// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC Schema Model - Shared types and collaborator traits for schema-driven authoring
//!
//! This crate provides the vocabulary shared by the data layer and the collaborators
//! it talks to: class and attribute definitions decoded from an IFC schema document,
//! tagged attribute values, entity handles, and the traits a model file backend or a
//! property-set library implements.
//!
//! # Architecture
//!
//! - [`ClassDefinition`] / [`AttributeDefinition`] - Decoded schema classes
//! - [`AttributeValue`] - Value tagged with one of the four [`DataType`]s
//! - [`EntityRepository`] - By-type lookup and is-a chains over model entities
//! - [`MutableRepository`] - Narrow `set_attribute` write capability
//! - [`DirectoryListing`] - Group/leaf listing for dependent selections
//!
//! # Example
//!
//! ```ignore
//! use ifc_schema_model::{EntityRepository, EntityRepositoryExt};
//!
//! let repo: &dyn EntityRepository = get_repository();
//! for id in repo.entities_of_type("IfcDoor")? {
//!     if repo.is_a(id, "IfcDoorStandardCase") {
//!         println!("standard case door {id}");
//!     }
//! }
//! ```

pub mod directory;
pub mod error;
pub mod repository;
pub mod types;

// Re-export all public types
pub use directory::*;
pub use error::*;
pub use repository::*;
pub use types::*;
