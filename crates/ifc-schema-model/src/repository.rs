// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity repository traits implemented by the model file layer

use crate::{AttributeValue, EntityId, Result};

/// Read access to model entities by type
///
/// Implementations are provided by the model file reader/writer. Lookup by type
/// is polymorphic: an entity is returned for every class on its is-a chain.
///
/// # Example
///
/// ```ignore
/// use ifc_schema_model::EntityRepository;
///
/// fn count_doors(repo: &dyn EntityRepository) -> usize {
///     repo.entities_of_type("IfcDoor").map(|ids| ids.len()).unwrap_or(0)
/// }
/// ```
pub trait EntityRepository: Send + Sync {
    /// Get all entities whose type chain includes `type_tag`
    ///
    /// # Returns
    /// The matching entity handles, or `Error::UnknownType` if the tag is not
    /// defined in the repository's schema version
    fn entities_of_type(&self, type_tag: &str) -> Result<Vec<EntityId>>;

    /// Get the is-a chain of an entity (declared class first)
    ///
    /// Returns an empty chain for handles the repository does not hold.
    fn type_chain_of(&self, entity: EntityId) -> Vec<String>;
}

/// Narrow write capability: set one named attribute on one entity
pub trait MutableRepository: EntityRepository {
    /// Write `value` onto `entity` under `name`
    ///
    /// # Returns
    /// `Error::UnsupportedAttribute` if the entity's concrete type has no such
    /// attribute; implementations may also reject ill-typed values
    fn set_attribute(
        &mut self,
        entity: EntityId,
        name: &str,
        value: AttributeValue,
    ) -> Result<()>;
}

/// Extension methods for EntityRepository
pub trait EntityRepositoryExt: EntityRepository {
    /// Whether the entity's type chain includes `type_tag` (case-insensitive)
    fn is_a(&self, entity: EntityId, type_tag: &str) -> bool {
        self.type_chain_of(entity)
            .iter()
            .any(|t| t.eq_ignore_ascii_case(type_tag))
    }
}

// Blanket implementation for all EntityRepository types
impl<T: EntityRepository + ?Sized> EntityRepositoryExt for T {}
