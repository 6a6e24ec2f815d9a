// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory entity repository

use crate::catalog::SchemaCatalog;
use ifc_schema_model::{
    AttributeValue, EntityId, EntityRecord, EntityRepository, Error, MutableRepository, Result,
};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Entity store with a polymorphic type index
///
/// Every entity is indexed under each class on its type chain, so by-type lookup
/// returns subtypes too. Type tags are matched case-insensitively.
///
/// With a [`SchemaCatalog`] attached, the catalog's classes are the known type
/// tags and attribute writes are checked against the entity's class definition.
#[derive(Default)]
pub struct MemoryRepository {
    /// Entity ID -> entity
    entities: FxHashMap<EntityId, EntityRecord>,
    /// Uppercase type tag -> entity IDs, in insertion order
    type_index: FxHashMap<String, Vec<EntityId>>,
    /// Uppercase type tags defined for this repository
    known_types: FxHashSet<String>,
    /// Schema used to validate attribute writes
    catalog: Option<Arc<SchemaCatalog>>,
}

impl MemoryRepository {
    /// Create an empty repository with no known types
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a schema catalog; its classes become known type tags
    pub fn with_catalog(mut self, catalog: Arc<SchemaCatalog>) -> Self {
        self.known_types
            .extend(catalog.class_names().into_iter().map(str::to_uppercase));
        self.catalog = Some(catalog);
        self
    }

    /// Declare a type tag as defined even if no entity uses it
    pub fn register_type(&mut self, type_tag: &str) {
        self.known_types.insert(type_tag.to_uppercase());
    }

    /// Add an entity; every class on its chain becomes a known type tag
    ///
    /// Replaces an existing entity with the same ID.
    pub fn insert(&mut self, entity: EntityRecord) {
        if self.entities.contains_key(&entity.id) {
            self.remove_from_index(entity.id);
        }

        for type_tag in &entity.type_chain {
            let key = type_tag.to_uppercase();
            self.type_index.entry(key.clone()).or_default().push(entity.id);
            self.known_types.insert(key);
        }
        self.entities.insert(entity.id, entity);
    }

    /// Get entity by ID
    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the repository holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    fn remove_from_index(&mut self, id: EntityId) {
        for ids in self.type_index.values_mut() {
            ids.retain(|&other| other != id);
        }
    }

    /// Check a write against the entity's class definition, if the catalog has one
    fn validate(&self, entity: &EntityRecord, name: &str, value: &AttributeValue) -> Result<()> {
        let Some(catalog) = self.catalog.as_deref() else {
            return Ok(());
        };
        let Some(class) = entity
            .declared_type()
            .and_then(|t| catalog.class_ignore_case(t)) else {
            log::debug!("{} has no class definition; accepting {name}", entity.id);
            return Ok(());
        };

        let definition = class
            .attribute(name)
            .ok_or_else(|| Error::unsupported_attribute(entity.id, name))?;

        if value.data_type() != definition.data_type {
            return Err(Error::TypeMismatch {
                entity: entity.id,
                attribute: name.to_string(),
                expected: definition.data_type.to_string(),
                actual: value.data_type().to_string(),
            });
        }

        if let (Some(legal), Some(text)) = (&definition.enum_values, value.as_string()) {
            if !legal.iter().any(|v| v == text) {
                return Err(Error::invalid_option(name, text));
            }
        }

        Ok(())
    }
}

impl EntityRepository for MemoryRepository {
    fn entities_of_type(&self, type_tag: &str) -> Result<Vec<EntityId>> {
        let key = type_tag.to_uppercase();
        if !self.known_types.contains(&key) {
            return Err(Error::UnknownType(type_tag.to_string()));
        }
        Ok(self.type_index.get(&key).cloned().unwrap_or_default())
    }

    fn type_chain_of(&self, entity: EntityId) -> Vec<String> {
        self.entities
            .get(&entity)
            .map(|e| e.type_chain.clone())
            .unwrap_or_default()
    }
}

impl MutableRepository for MemoryRepository {
    fn set_attribute(
        &mut self,
        entity: EntityId,
        name: &str,
        value: AttributeValue,
    ) -> Result<()> {
        let record = self
            .entities
            .get(&entity)
            .ok_or(Error::UnknownEntity(entity))?;
        self.validate(record, name, &value)?;

        if let Some(record) = self.entities.get_mut(&entity) {
            record.attributes.insert(name.to_string(), value);
        }
        Ok(())
    }
}
