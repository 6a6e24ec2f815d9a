// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared test fixtures

use crate::SchemaCatalog;
use std::sync::Arc;

/// Small IFC4 excerpt; classes deliberately not in alphabetical order
pub const TEST_SCHEMA: &str = r#"{
    "IfcWall": {
        "attributes": [
            {"name": "Name", "data_type": "string"},
            {"name": "PredefinedType", "data_type": "string",
             "enum_values": ["MOVABLE", "PARAPET", "PARTITIONING", "SOLIDWALL", "USERDEFINED", "NOTDEFINED"]},
            {"name": "Description", "data_type": "string", "enum_values": null}
        ]
    },
    "IfcDoor": {
        "attributes": [
            {"name": "Name", "data_type": "string"},
            {"name": "OverallHeight", "data_type": "float"},
            {"name": "PredefinedType", "data_type": "string",
             "enum_values": ["DOOR", "GATE", "TRAPDOOR", "USERDEFINED", "NOTDEFINED"]}
        ]
    },
    "IfcBuildingElementProxy": {
        "attributes": [
            {"name": "Name"},
            {"name": "PredefinedType",
             "enum_values": ["COMPLEX", "ELEMENT", "PARTIAL", "USERDEFINED", "NOTDEFINED"]}
        ]
    },
    "IfcFurnishingElement": {
        "attributes": [
            {"name": "Name", "data_type": "string"},
            {"name": "Tag", "data_type": "string"},
            {"name": "IsExternal", "data_type": "boolean"},
            {"name": "Count", "data_type": "integer"}
        ]
    }
}"#;

/// Catalog built from [`TEST_SCHEMA`]
pub fn test_catalog() -> Arc<SchemaCatalog> {
    Arc::new(SchemaCatalog::from_json_str(TEST_SCHEMA).unwrap())
}
