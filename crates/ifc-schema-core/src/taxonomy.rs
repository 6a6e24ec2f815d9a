// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facility-management taxonomies
//!
//! A taxonomy is data: an ordered list of type tags plus exclusion rules. The
//! three built-ins are declared as static tables below; more can be loaded from
//! a JSON document or registered at runtime.

use ifc_schema_model::{Error, Result};
use serde::{Deserialize, Serialize};

/// COBie type classes
pub const COBIE_TYPES: &str = "COBie Types";
/// COBie component (instance) classes
pub const COBIE_COMPONENTS: &str = "COBie Components";
/// Facilities-maintenance handover equipment types
pub const FMHEM_TYPES: &str = "FMHEM Types";

/// Drop entities of a subtype from one type tag's results
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    /// Type tag the rule is attached to
    pub type_tag: String,
    /// Entities whose type chain includes this class are removed
    pub excluded_subtype: String,
}

impl ExclusionRule {
    /// Create a rule
    pub fn new(type_tag: impl Into<String>, excluded_subtype: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            excluded_subtype: excluded_subtype.into(),
        }
    }

    /// Whether an entity with this type chain is excluded
    pub fn matches(&self, type_chain: &[String]) -> bool {
        type_chain
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&self.excluded_subtype))
    }
}

/// Named classification: type tags in order plus exclusion rules
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Taxonomy name (e.g., "COBie Types")
    pub name: String,
    /// Type tags queried, in order
    pub type_tags: Vec<String>,
    /// Exclusion rules
    #[serde(default)]
    pub exclusions: Vec<ExclusionRule>,
}

impl Taxonomy {
    /// Create a taxonomy without exclusions
    pub fn new<I, S>(name: impl Into<String>, type_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            type_tags: type_tags.into_iter().map(Into::into).collect(),
            exclusions: Vec::new(),
        }
    }

    /// Add an exclusion rule
    pub fn with_exclusion(mut self, rule: ExclusionRule) -> Self {
        self.exclusions.push(rule);
        self
    }

    /// Rules attached to `type_tag`
    pub fn exclusions_for<'a>(
        &'a self,
        type_tag: &'a str,
    ) -> impl Iterator<Item = &'a ExclusionRule> {
        self.exclusions
            .iter()
            .filter(move |r| r.type_tag.eq_ignore_ascii_case(type_tag))
    }
}

/// Static taxonomy table entry
struct BuiltinTaxonomy {
    name: &'static str,
    type_tags: &'static [&'static str],
    exclusions: &'static [(&'static str, &'static str)],
}

impl BuiltinTaxonomy {
    fn to_taxonomy(&self) -> Taxonomy {
        Taxonomy {
            name: self.name.to_string(),
            type_tags: self.type_tags.iter().map(|t| t.to_string()).collect(),
            exclusions: self
                .exclusions
                .iter()
                .map(|(tag, subtype)| ExclusionRule::new(*tag, *subtype))
                .collect(),
        }
    }
}

const BUILTIN_TAXONOMIES: &[BuiltinTaxonomy] = &[
    BuiltinTaxonomy {
        name: COBIE_TYPES,
        type_tags: &[
            "IfcDoorStyle",
            "IfcBuildingElementProxyType",
            "IfcChimneyType",
            "IfcCoveringType",
            "IfcDoorType",
            "IfcFootingType",
            "IfcPileType",
            "IfcRoofType",
            "IfcShadingDeviceType",
            "IfcWindowType",
            "IfcDistributionControlElementType",
            "IfcDistributionChamberElementType",
            "IfcEnergyConversionDeviceType",
            "IfcFlowControllerType",
            "IfcFlowMovingDeviceType",
            "IfcFlowStorageDeviceType",
            "IfcFlowTerminalType",
            "IfcFlowTreatmentDeviceType",
            "IfcElementAssemblyType",
            "IfcBuildingElementPartType",
            "IfcDiscreteAccessoryType",
            "IfcMechanicalFastenerType",
            "IfcReinforcingElementType",
            "IfcVibrationIsolatorType",
            "IfcFurnishingElementType",
            "IfcGeographicElementType",
            "IfcTransportElementType",
            "IfcSpatialZoneType",
            "IfcWindowStyle",
        ],
        exclusions: &[],
    },
    BuiltinTaxonomy {
        name: COBIE_COMPONENTS,
        type_tags: &[
            "IfcBuildingElementProxy",
            "IfcChimney",
            "IfcCovering",
            "IfcDoor",
            "IfcShadingDevice",
            "IfcWindow",
            "IfcDistributionControlElement",
            "IfcDistributionChamberElement",
            "IfcEnergyConversionDevice",
            "IfcFlowController",
            "IfcFlowMovingDevice",
            "IfcFlowStorageDevice",
            "IfcFlowTerminal",
            "IfcFlowTreatmentDevice",
            "IfcDiscreteAccessory",
            "IfcTendon",
            "IfcTendonAnchor",
            "IfcVibrationIsolator",
            "IfcFurnishingElement",
            "IfcGeographicElement",
            "IfcTransportElement",
        ],
        exclusions: &[],
    },
    BuiltinTaxonomy {
        name: FMHEM_TYPES,
        type_tags: &[
            "IfcDoorStyle",
            "IfcWindowStyle",
            "IfcDoorType",
            "IfcWindowType",
            "IfcRoofType",
            "IfcShadingDeviceType",
            "IfcDistributionControlElementType",
            "IfcEnergyConversionDeviceType",
            "IfcFlowControllerType",
            "IfcJunctionBoxType",
            "IfcFlowMovingDeviceType",
            "IfcFlowStorageDeviceType",
            "IfcFlowTerminalType",
            "IfcFlowTreatmentDeviceType",
            "IfcFurnishingElementType",
            "IfcTransportElementType",
        ],
        exclusions: &[("IfcEnergyConversionDeviceType", "IfcCooledBeamType")],
    },
];

/// Taxonomies by name, in registration order
#[derive(Clone, Debug, Default)]
pub struct TaxonomyRegistry {
    taxonomies: Vec<Taxonomy>,
}

impl TaxonomyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in taxonomies
    pub fn builtin() -> Self {
        Self {
            taxonomies: BUILTIN_TAXONOMIES.iter().map(BuiltinTaxonomy::to_taxonomy).collect(),
        }
    }

    /// Read taxonomies from a JSON array
    pub fn from_json_str(json: &str) -> Result<Self> {
        let taxonomies: Vec<Taxonomy> = serde_json::from_str(json)
            .map_err(|e| Error::other(format!("invalid taxonomy document: {e}")))?;
        let mut registry = Self::new();
        for taxonomy in taxonomies {
            registry.register(taxonomy);
        }
        Ok(registry)
    }

    /// Add a taxonomy, replacing one with the same name
    pub fn register(&mut self, taxonomy: Taxonomy) {
        match self.taxonomies.iter_mut().find(|t| t.name == taxonomy.name) {
            Some(existing) => *existing = taxonomy,
            None => self.taxonomies.push(taxonomy),
        }
    }

    /// Add every taxonomy from another registry
    pub fn extend(&mut self, other: TaxonomyRegistry) {
        for taxonomy in other.taxonomies {
            self.register(taxonomy);
        }
    }

    /// Get a taxonomy by name
    pub fn get(&self, name: &str) -> Option<&Taxonomy> {
        self.taxonomies.iter().find(|t| t.name == name)
    }

    /// Registered names, in order
    pub fn names(&self) -> Vec<&str> {
        self.taxonomies.iter().map(|t| t.name.as_str()).collect()
    }

    /// Iterate over taxonomies
    pub fn iter(&self) -> impl Iterator<Item = &Taxonomy> {
        self.taxonomies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin() {
        let registry = TaxonomyRegistry::builtin();
        assert_eq!(registry.names(), vec![COBIE_TYPES, COBIE_COMPONENTS, FMHEM_TYPES]);

        let cobie = registry.get(COBIE_TYPES).unwrap();
        assert_eq!(cobie.type_tags.len(), 29);
        assert_eq!(cobie.type_tags[0], "IfcDoorStyle");
        assert!(cobie.exclusions.is_empty());

        assert_eq!(registry.get(COBIE_COMPONENTS).unwrap().type_tags.len(), 21);

        let fmhem = registry.get(FMHEM_TYPES).unwrap();
        assert_eq!(fmhem.type_tags.len(), 16);
        assert_eq!(
            fmhem.exclusions,
            vec![ExclusionRule::new("IfcEnergyConversionDeviceType", "IfcCooledBeamType")]
        );
    }

    #[test]
    fn test_exclusions_for() {
        let registry = TaxonomyRegistry::builtin();
        let fmhem = registry.get(FMHEM_TYPES).unwrap();
        assert_eq!(fmhem.exclusions_for("IFCENERGYCONVERSIONDEVICETYPE").count(), 1);
        assert_eq!(fmhem.exclusions_for("IfcDoorType").count(), 0);
    }

    #[test]
    fn test_rule_matches_type_chain() {
        let rule = ExclusionRule::new("IfcEnergyConversionDeviceType", "IfcCooledBeamType");
        let cooled_beam = vec![
            "IfcCooledBeamType".to_string(),
            "IfcEnergyConversionDeviceType".to_string(),
        ];
        let chiller = vec![
            "IfcChillerType".to_string(),
            "IfcEnergyConversionDeviceType".to_string(),
        ];
        assert!(rule.matches(&cooled_beam));
        assert!(!rule.matches(&chiller));
    }

    #[test]
    fn test_from_json_and_register() {
        let json = r#"[
            {"name": "Equipment", "type_tags": ["ConverterType", "ChamberType"],
             "exclusions": [{"type_tag": "ConverterType", "excluded_subtype": "CooledBeamType"}]},
            {"name": "Doors", "type_tags": ["IfcDoor"]}
        ]"#;
        let mut registry = TaxonomyRegistry::builtin();
        registry.extend(TaxonomyRegistry::from_json_str(json).unwrap());
        assert_eq!(registry.names().len(), 5);
        assert_eq!(registry.get("Equipment").unwrap().exclusions.len(), 1);
        assert!(registry.get("Doors").unwrap().exclusions.is_empty());

        registry.register(Taxonomy::new("Doors", ["IfcDoor", "IfcDoorStandardCase"]));
        assert_eq!(registry.names().len(), 5);
        assert_eq!(registry.get("Doors").unwrap().type_tags.len(), 2);
    }

    #[test]
    fn test_malformed_json() {
        assert!(TaxonomyRegistry::from_json_str(r#"[{"name": "x"}]"#).is_err());
    }
}
