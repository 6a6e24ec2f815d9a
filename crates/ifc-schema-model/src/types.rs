// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for schema-driven attribute data
//!
//! This module defines the class/attribute definitions decoded from an IFC schema
//! document and the tagged values written onto model entities.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name of the attribute carrying a class's enumerated sub-type
pub const PREDEFINED_TYPE: &str = "PredefinedType";

/// Opaque entity handle managed by the entity repository
///
/// Wraps the raw IFC entity ID (e.g., #123 becomes EntityId(123))
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Data type tag of an attribute definition
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Boolean,
    Integer,
    Float,
}

impl DataType {
    /// Lowercase tag as it appears in schema documents
    pub fn name(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Float => "float",
        }
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(DataType::String),
            "boolean" | "bool" => Ok(DataType::Boolean),
            "integer" | "int" => Ok(DataType::Integer),
            "float" | "real" => Ok(DataType::Float),
            other => Err(format!("unknown data type '{other}'")),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tagged attribute value
///
/// One variant per [`DataType`]; the tag travels with the value so a
/// repository can check it against the attribute definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "data_type", content = "value", rename_all = "lowercase")]
pub enum AttributeValue {
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

impl AttributeValue {
    /// Data type tag of this value
    pub fn data_type(&self) -> DataType {
        match self {
            AttributeValue::String(_) => DataType::String,
            AttributeValue::Boolean(_) => DataType::Boolean,
            AttributeValue::Integer(_) => DataType::Integer,
            AttributeValue::Float(_) => DataType::Float,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::Boolean(b) => write!(f, "{b}"),
            AttributeValue::Integer(i) => write!(f, "{i}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Boolean(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

/// Attribute declared by a schema class
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name, unique within its class
    pub name: String,
    /// Data type tag
    #[serde(default)]
    pub data_type: DataType,
    /// Legal values, in schema order; `None` for free-form attributes
    #[serde(default)]
    pub enum_values: Option<Vec<String>>,
}

impl AttributeDefinition {
    /// Create a free-form attribute
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            enum_values: None,
        }
    }

    /// Create an enumerated string attribute
    pub fn enumerated<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            data_type: DataType::String,
            enum_values: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether the attribute has a fixed list of legal values
    pub fn is_enumerated(&self) -> bool {
        self.enum_values.is_some()
    }

    /// Legal values, empty for free-form attributes
    pub fn values(&self) -> &[String] {
        self.enum_values.as_deref().unwrap_or(&[])
    }
}

/// Class definition with its attributes in declared schema order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    /// Unique class name (e.g., "IfcWall")
    pub name: String,
    /// Attributes in declaration order
    pub attributes: Vec<AttributeDefinition>,
}

impl ClassDefinition {
    /// Create a class definition
    pub fn new(name: impl Into<String>, attributes: Vec<AttributeDefinition>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Get an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Check if the class declares an attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Stored entity: handle, is-a chain and attribute values
///
/// `type_chain[0]` is the declared class; the rest are its supertypes.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity handle
    pub id: EntityId,
    /// Declared class followed by its supertypes
    pub type_chain: Vec<String>,
    /// Attribute values by name
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl EntityRecord {
    /// Create an entity with no attributes
    pub fn new<I, S>(id: EntityId, type_chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            type_chain: type_chain.into_iter().map(Into::into).collect(),
            attributes: BTreeMap::new(),
        }
    }

    /// Declared class of the entity
    pub fn declared_type(&self) -> Option<&str> {
        self.type_chain.first().map(String::as_str)
    }

    /// Whether the entity's type chain includes `type_tag` (IFC names are case-insensitive)
    pub fn is_a(&self, type_tag: &str) -> bool {
        self.type_chain
            .iter()
            .any(|t| t.eq_ignore_ascii_case(type_tag))
    }

    /// Get attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Get string attribute by name
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_parse() {
        assert_eq!("string".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("BOOLEAN".parse::<DataType>().unwrap(), DataType::Boolean);
        assert_eq!("real".parse::<DataType>().unwrap(), DataType::Float);
        assert!("binary".parse::<DataType>().is_err());
    }

    #[test]
    fn test_value_data_type() {
        assert_eq!(AttributeValue::from("A").data_type(), DataType::String);
        assert_eq!(AttributeValue::from(true).data_type(), DataType::Boolean);
        assert_eq!(AttributeValue::from(3i64).data_type(), DataType::Integer);
        assert_eq!(AttributeValue::from(2.5).data_type(), DataType::Float);
        assert_eq!(AttributeValue::Integer(3).as_float(), Some(3.0));
    }

    #[test]
    fn test_attribute_values() {
        let free = AttributeDefinition::new("Name", DataType::String);
        assert!(!free.is_enumerated());
        assert!(free.values().is_empty());

        let enumerated = AttributeDefinition::enumerated(PREDEFINED_TYPE, ["SOLIDWALL", "PARAPET"]);
        assert!(enumerated.is_enumerated());
        assert_eq!(enumerated.values().to_vec(), vec!["SOLIDWALL", "PARAPET"]);
    }

    #[test]
    fn test_entity_is_a() {
        let entity = EntityRecord::new(
            EntityId(1),
            ["IfcCooledBeamType", "IfcEnergyConversionDeviceType"],
        );
        assert_eq!(entity.declared_type(), Some("IfcCooledBeamType"));
        assert!(entity.is_a("IFCENERGYCONVERSIONDEVICETYPE"));
        assert!(!entity.is_a("IfcChillerType"));
    }
}
