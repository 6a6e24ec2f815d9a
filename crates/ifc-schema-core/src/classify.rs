// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ClassificationIndex - resolve a taxonomy against an entity repository
//!
//! Schema versions differ in which classes they define (IFC4 has no
//! `IfcDoorStyle`, IFC2X3 has no `IfcChimneyType`), so a type tag the repository
//! reports as unknown contributes nothing and classification moves on. That is
//! the only failure recovered here; anything else the repository reports is
//! returned to the caller.

use crate::taxonomy::{ExclusionRule, Taxonomy, TaxonomyRegistry};
use ifc_schema_model::{EntityId, EntityRepository, Error, Result};
use rustc_hash::FxHashSet;

/// Outcome of classifying one taxonomy
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassificationReport {
    /// Entities belonging to the taxonomy
    pub entities: FxHashSet<EntityId>,
    /// Type tags the repository does not define, in query order
    pub unknown_tags: Vec<String>,
    /// Entities removed by exclusion rules
    pub excluded: usize,
}

/// Classifies entities into registered taxonomies
#[derive(Clone, Debug, Default)]
pub struct ClassificationIndex {
    registry: TaxonomyRegistry,
}

impl ClassificationIndex {
    /// Create an index over a taxonomy registry
    pub fn new(registry: TaxonomyRegistry) -> Self {
        Self { registry }
    }

    /// Index over the built-in taxonomies
    pub fn builtin() -> Self {
        Self::new(TaxonomyRegistry::builtin())
    }

    /// Registered taxonomies
    pub fn registry(&self) -> &TaxonomyRegistry {
        &self.registry
    }

    /// Mutable access for registering more taxonomies
    pub fn registry_mut(&mut self) -> &mut TaxonomyRegistry {
        &mut self.registry
    }

    /// Entities belonging to `taxonomy`
    pub fn classify<R>(taxonomy: &Taxonomy, repository: &R) -> Result<FxHashSet<EntityId>>
    where
        R: EntityRepository + ?Sized,
    {
        Self::classify_report(taxonomy, repository).map(|report| report.entities)
    }

    /// Classify the registered taxonomy called `name`
    pub fn classify_named<R>(&self, name: &str, repository: &R) -> Result<FxHashSet<EntityId>>
    where
        R: EntityRepository + ?Sized,
    {
        let taxonomy = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownTaxonomy(name.to_string()))?;
        Self::classify(taxonomy, repository)
    }

    /// Classify and report which tags were unknown and how many entities were excluded
    pub fn classify_report<R>(
        taxonomy: &Taxonomy,
        repository: &R,
    ) -> Result<ClassificationReport>
    where
        R: EntityRepository + ?Sized,
    {
        let mut report = ClassificationReport::default();

        for type_tag in &taxonomy.type_tags {
            match repository.entities_of_type(type_tag) {
                Ok(ids) => report.entities.extend(ids),
                Err(e) if e.is_unknown_type() => {
                    log::info!(
                        "{}: skipping {type_tag}, not defined in this schema",
                        taxonomy.name
                    );
                    report.unknown_tags.push(type_tag.clone());
                }
                Err(e) => return Err(e),
            }
        }

        let rules: Vec<&ExclusionRule> = taxonomy
            .type_tags
            .iter()
            .flat_map(|tag| taxonomy.exclusions_for(tag))
            .collect();

        if !rules.is_empty() {
            let before = report.entities.len();
            report.entities.retain(|&id| {
                let chain = repository.type_chain_of(id);
                !rules.iter().any(|rule| rule.matches(&chain))
            });
            report.excluded = before - report.entities.len();
        }

        log::debug!(
            "{}: {} entities, {} excluded, {} unknown tags",
            taxonomy.name,
            report.entities.len(),
            report.excluded,
            report.unknown_tags.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryRepository;
    use crate::taxonomy::{COBIE_COMPONENTS, FMHEM_TYPES};
    use ifc_schema_model::EntityRecord;

    fn ids(values: &[u32]) -> FxHashSet<EntityId> {
        values.iter().map(|&v| EntityId(v)).collect()
    }

    fn equipment_repository() -> MemoryRepository {
        let mut repo = MemoryRepository::new();
        repo.insert(EntityRecord::new(EntityId(1), ["ConverterType"]));
        repo.insert(EntityRecord::new(EntityId(2), ["ConverterType"]));
        repo.insert(EntityRecord::new(EntityId(3), ["CooledBeamType", "ConverterType"]));
        repo.insert(EntityRecord::new(EntityId(4), ["ChamberType"]));
        repo.insert(EntityRecord::new(EntityId(5), ["ChamberType"]));
        repo
    }

    fn equipment_taxonomy() -> Taxonomy {
        Taxonomy::new("EquipmentType", ["ConverterType", "ChamberType"])
            .with_exclusion(ExclusionRule::new("ConverterType", "CooledBeamType"))
    }

    #[test]
    fn test_exclusion_by_subtype() {
        let repo = equipment_repository();
        let report = ClassificationIndex::classify_report(&equipment_taxonomy(), &repo).unwrap();
        assert_eq!(report.entities, ids(&[1, 2, 4, 5]));
        assert_eq!(report.excluded, 1);
        assert!(report.unknown_tags.is_empty());
    }

    #[test]
    fn test_rule_for_unqueried_tag_is_ignored() {
        let repo = equipment_repository();
        let taxonomy = Taxonomy::new("Converters", ["ConverterType"])
            .with_exclusion(ExclusionRule::new("ChamberType", "CooledBeamType"));
        let entities = ClassificationIndex::classify(&taxonomy, &repo).unwrap();
        assert_eq!(entities, ids(&[1, 2, 3]));
    }

    #[test]
    fn test_unknown_tag_does_not_abort() {
        let mut repo = MemoryRepository::new();
        repo.insert(EntityRecord::new(EntityId(10), ["IfcDoorType", "IfcTypeProduct"]));
        repo.insert(EntityRecord::new(EntityId(11), ["IfcDoorType", "IfcTypeProduct"]));
        repo.insert(EntityRecord::new(EntityId(12), ["IfcWallType", "IfcTypeProduct"]));

        let taxonomy = Taxonomy::new("Doors", ["IfcDoorStyle", "IfcDoorType"]);
        let report = ClassificationIndex::classify_report(&taxonomy, &repo).unwrap();
        assert_eq!(report.entities, ids(&[10, 11]));
        assert_eq!(report.unknown_tags, vec!["IfcDoorStyle"]);
    }

    #[test]
    fn test_no_duplicates_across_tags() {
        let mut repo = MemoryRepository::new();
        repo.insert(EntityRecord::new(
            EntityId(1),
            ["IfcFlowTerminal", "IfcDistributionFlowElement"],
        ));

        let taxonomy = Taxonomy::new("Overlap", ["IfcFlowTerminal", "IfcDistributionFlowElement"]);
        let entities = ClassificationIndex::classify(&taxonomy, &repo).unwrap();
        assert_eq!(entities, ids(&[1]));
    }

    #[test]
    fn test_builtin_fmhem() {
        let mut repo = MemoryRepository::new();
        let device = "IfcEnergyConversionDeviceType";
        repo.insert(EntityRecord::new(EntityId(1), ["IfcChillerType", device]));
        repo.insert(EntityRecord::new(EntityId(2), ["IfcCooledBeamType", device]));
        repo.insert(EntityRecord::new(EntityId(3), ["IfcBoilerType", device]));
        repo.insert(EntityRecord::new(EntityId(4), ["IfcDoorType"]));
        repo.insert(EntityRecord::new(EntityId(5), ["IfcDoor"]));

        let index = ClassificationIndex::builtin();
        let entities = index.classify_named(FMHEM_TYPES, &repo).unwrap();
        assert_eq!(entities, ids(&[1, 3, 4]));

        let components = index.classify_named(COBIE_COMPONENTS, &repo).unwrap();
        assert_eq!(components, ids(&[5]));
    }

    #[test]
    fn test_unknown_taxonomy() {
        let repo = MemoryRepository::new();
        let err = ClassificationIndex::builtin()
            .classify_named("Uniclass", &repo)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownTaxonomy(_)));
    }

    #[test]
    fn test_custom_taxonomy_registration() {
        let repo = equipment_repository();
        let mut index = ClassificationIndex::builtin();
        index.registry_mut().register(equipment_taxonomy());
        let entities = index.classify_named("EquipmentType", &repo).unwrap();
        assert_eq!(entities.len(), 4);
    }

    /// Repository whose lookups fail for reasons other than an unknown type
    struct BrokenRepository;

    impl EntityRepository for BrokenRepository {
        fn entities_of_type(&self, _type_tag: &str) -> Result<Vec<EntityId>> {
            Err(Error::other("model file closed"))
        }

        fn type_chain_of(&self, _entity: EntityId) -> Vec<String> {
            Vec::new()
        }
    }

    #[test]
    fn test_other_errors_propagate() {
        let taxonomy = Taxonomy::new("Doors", ["IfcDoor"]);
        let err = ClassificationIndex::classify(&taxonomy, &BrokenRepository).unwrap_err();
        assert!(matches!(err, Error::Other(_)));
    }
}
