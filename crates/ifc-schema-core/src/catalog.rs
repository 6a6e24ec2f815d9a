// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SchemaCatalog - indexed, read-only class and attribute definitions
//!
//! The catalog is built once from a schema document and never mutated, so it
//! can be shared (`Arc<SchemaCatalog>`) between any number of readers.

use crate::config::DataLayerConfig;
use ifc_schema_model::{AttributeDefinition, ClassDefinition, DataType, Error, Result};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Class definitions in schema declaration order with O(1) lookup by name
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    /// Schema version the catalog was loaded for (e.g., "IFC4")
    schema_version: Option<String>,
    /// Classes in declaration order
    classes: Vec<ClassDefinition>,
    /// Class name -> position in `classes`
    index: FxHashMap<String, usize>,
    /// Uppercase class name -> position, first declaration wins
    folded_index: FxHashMap<String, usize>,
}

impl SchemaCatalog {
    /// Build a catalog from already decoded class definitions
    ///
    /// Fails with `SchemaLoad` on a duplicate class name or a duplicate attribute
    /// name within one class.
    pub fn from_classes(classes: Vec<ClassDefinition>) -> Result<Self> {
        let mut index = FxHashMap::default();
        let mut folded_index = FxHashMap::default();
        index.reserve(classes.len());

        for (pos, class) in classes.iter().enumerate() {
            if index.insert(class.name.clone(), pos).is_some() {
                return Err(Error::schema_load(format!(
                    "duplicate class '{}'",
                    class.name
                )));
            }
            folded_index.entry(class.name.to_uppercase()).or_insert(pos);

            let mut seen = FxHashSet::default();
            for attribute in &class.attributes {
                if !seen.insert(attribute.name.as_str()) {
                    return Err(Error::schema_load(format!(
                        "duplicate attribute '{}' on class '{}'",
                        attribute.name, class.name
                    )));
                }
            }
        }

        log::debug!("loaded schema catalog with {} classes", classes.len());

        Ok(Self {
            schema_version: None,
            classes,
            index,
            folded_index,
        })
    }

    /// Load a catalog from a JSON schema document
    pub fn load<R: Read>(reader: R) -> Result<Self> {
        let document: SchemaDocument = serde_json::from_reader(reader)
            .map_err(|e| Error::schema_load(format!("malformed schema document: {e}")))?;
        Self::from_classes(document.into_classes()?)
    }

    /// Load a catalog from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::load(json.as_bytes())
    }

    /// Load a catalog from a schema file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::schema_load(format!("{}: {e}", path.display())))?;
        Self::load(BufReader::new(file))
    }

    /// Load the schema document named by the config
    pub fn from_config(config: &DataLayerConfig) -> Result<Self> {
        Ok(Self::from_path(config.schema_path())?.with_schema_version(&config.schema_version))
    }

    /// Tag the catalog with the schema version it was loaded for
    pub fn with_schema_version(mut self, version: impl Into<String>) -> Self {
        self.schema_version = Some(version.into());
        self
    }

    /// Schema version, if known
    pub fn schema_version(&self) -> Option<&str> {
        self.schema_version.as_deref()
    }

    /// All class names in declaration order
    pub fn class_names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get a class by name
    pub fn class(&self, name: &str) -> Option<&ClassDefinition> {
        self.index.get(name).map(|&pos| &self.classes[pos])
    }

    /// Get a class by name, ignoring case (STEP files spell classes as `IFCDOOR`)
    pub fn class_ignore_case(&self, name: &str) -> Option<&ClassDefinition> {
        self.class(name).or_else(|| {
            self.folded_index
                .get(&name.to_uppercase())
                .map(|&pos| &self.classes[pos])
        })
    }

    /// Check if a class is defined
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the catalog has no classes
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Attributes of a class in declaration order
    pub fn attributes_of(&self, class_name: &str) -> Result<&[AttributeDefinition]> {
        self.class(class_name)
            .map(|c| c.attributes.as_slice())
            .ok_or_else(|| Error::UnknownClass(class_name.to_string()))
    }

    /// Legal values of an enumerated attribute
    ///
    /// Unknown classes, missing attributes and free-form attributes all yield an
    /// empty slice, so callers can treat "no options" uniformly.
    pub fn enum_values_of(&self, class_name: &str, attribute_name: &str) -> &[String] {
        self.class(class_name)
            .and_then(|c| c.attribute(attribute_name))
            .map(AttributeDefinition::values)
            .unwrap_or(&[])
    }
}

/// Attribute entry as written in the schema document
#[derive(Deserialize)]
struct RawAttribute {
    name: String,
    #[serde(default, alias = "type")]
    data_type: Option<String>,
    #[serde(default)]
    enum_values: Option<Vec<String>>,
}

/// Class entry as written in the schema document
#[derive(Deserialize)]
struct RawClass {
    #[serde(default)]
    attributes: Vec<RawAttribute>,
}

/// Top-level document: class entries in the order they appear
struct SchemaDocument(Vec<(String, RawClass)>);

impl SchemaDocument {
    fn into_classes(self) -> Result<Vec<ClassDefinition>> {
        self.0
            .into_iter()
            .map(|(name, raw)| {
                let attributes = raw
                    .attributes
                    .into_iter()
                    .map(|attr| {
                        let data_type = match attr.data_type.as_deref() {
                            Some(tag) => tag.parse::<DataType>().map_err(|e| {
                                Error::schema_load(format!("{name}.{}: {e}", attr.name))
                            })?,
                            None => DataType::String,
                        };
                        Ok(AttributeDefinition {
                            name: attr.name,
                            data_type,
                            enum_values: attr.enum_values,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ClassDefinition::new(name, attributes))
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for SchemaDocument {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = SchemaDocument;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of class name to class definition")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut classes = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, class)) = map.next_entry::<String, RawClass>()? {
                    classes.push((name, class));
                }
                Ok(SchemaDocument(classes))
            }
        }

        deserializer.deserialize_map(DocumentVisitor)
    }
}
