// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for schema resolution, entity mutation and classification

use crate::EntityId;
use thiserror::Error;

/// Result type alias for data layer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the schema-driven data layer
#[derive(Error, Debug)]
pub enum Error {
    /// Schema source unreadable or malformed
    #[error("Failed to load schema: {0}")]
    SchemaLoad(String),

    /// Class name not defined by the loaded schema
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Type tag not defined in the repository's schema version
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Value outside the current option set of a dependent field
    #[error("Invalid option for {field}: {value}")]
    InvalidOption { field: String, value: String },

    /// Mutation executed without a target entity
    #[error("Mutation has no target entity")]
    MissingTarget,

    /// The target entity has no attribute of that name
    #[error("Entity {entity} does not support attribute {attribute}")]
    UnsupportedAttribute { entity: EntityId, attribute: String },

    /// Value data type does not match the attribute definition
    #[error(
        "Type mismatch at entity {entity} attribute {attribute}: expected {expected}, got {actual}"
    )]
    TypeMismatch {
        entity: EntityId,
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Entity handle not present in the repository
    #[error("Entity {0} not found")]
    UnknownEntity(EntityId),

    /// Taxonomy name not registered
    #[error("Unknown taxonomy: {0}")]
    UnknownTaxonomy(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a schema load error
    pub fn schema_load(msg: impl Into<String>) -> Self {
        Error::SchemaLoad(msg.into())
    }

    /// Create an invalid option error
    pub fn invalid_option(field: impl Into<String>, value: impl Into<String>) -> Self {
        Error::InvalidOption {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an unsupported attribute error
    pub fn unsupported_attribute(entity: EntityId, attribute: impl Into<String>) -> Self {
        Error::UnsupportedAttribute {
            entity,
            attribute: attribute.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Whether this is the repository's "type tag not in this schema" failure
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Error::UnknownType(_))
    }
}
