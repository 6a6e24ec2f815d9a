// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EntityMutator - apply a set of named attributes to one entity
//!
//! The mutator knows nothing about the entity's shape; every write goes through
//! [`MutableRepository::set_attribute`], which decides whether the name is valid
//! for that entity.
//!
//! Execution is not transactional: when a write is rejected, attributes already
//! written by the same request stay written.

use ifc_schema_model::{AttributeValue, EntityId, Error, MutableRepository, Result};
use std::collections::BTreeMap;

/// Resolved mutation settings: target entity plus attributes to write
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationRequest {
    /// Entity to write to
    pub target: Option<EntityId>,
    /// Attribute name -> value
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Keys named by the overrides this request was merged from
    overridden: OverriddenKeys,
}

/// Which settings keys a caller named explicitly
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct OverriddenKeys {
    target: bool,
    attributes: bool,
}

impl MutationRequest {
    /// Create an empty request (no target, no attributes)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Add one attribute
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Apply overrides: keys present in `overrides` win, the rest keep their value
    pub fn merge(&self, overrides: &MutationOverrides) -> Self {
        Self {
            target: overrides.target.unwrap_or(self.target),
            attributes: overrides
                .attributes
                .clone()
                .unwrap_or_else(|| self.attributes.clone()),
            overridden: OverriddenKeys {
                target: self.overridden.target || overrides.target.is_some(),
                attributes: self.overridden.attributes || overrides.attributes.is_some(),
            },
        }
    }

    /// Overrides that turn `defaults` into `self`
    ///
    /// Reports every key named by a merged override, even one set to its default
    /// value, plus any key whose value differs from the default.
    pub fn diff(&self, defaults: &MutationRequest) -> MutationOverrides {
        let target = self.overridden.target || self.target != defaults.target;
        let attributes = self.overridden.attributes || self.attributes != defaults.attributes;
        MutationOverrides {
            target: target.then_some(self.target),
            attributes: attributes.then(|| self.attributes.clone()),
        }
    }
}

/// Caller-supplied settings; `None` means "key not given, keep the default"
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MutationOverrides {
    /// Replacement target (`Some(None)` explicitly clears it)
    pub target: Option<Option<EntityId>>,
    /// Replacement attribute map
    pub attributes: Option<BTreeMap<String, AttributeValue>>,
}

impl MutationOverrides {
    /// Create an empty override set
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the target
    pub fn target(mut self, target: EntityId) -> Self {
        self.target = Some(Some(target));
        self
    }

    /// Override the target with "no target"
    pub fn clear_target(mut self) -> Self {
        self.target = Some(None);
        self
    }

    /// Override the whole attribute map
    pub fn attributes(mut self, attributes: BTreeMap<String, AttributeValue>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Whether no key is overridden
    pub fn is_empty(&self) -> bool {
        self.target.is_none() && self.attributes.is_none()
    }
}

/// Builder and executor for one attribute mutation
#[derive(Clone, Debug, Default)]
pub struct EntityMutator {
    settings: MutationRequest,
}

impl EntityMutator {
    /// Start from base settings
    pub fn configure(defaults: MutationRequest) -> Self {
        Self { settings: defaults }
    }

    /// Merge caller overrides into the settings
    pub fn with_overrides(mut self, overrides: MutationOverrides) -> Self {
        self.settings = self.settings.merge(&overrides);
        self
    }

    /// Set the target entity
    pub fn with_target(mut self, target: EntityId) -> Self {
        self.settings.target = Some(target);
        self
    }

    /// Add or replace one attribute
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.settings.attributes.insert(name.into(), value.into());
        self
    }

    /// Resolved settings
    pub fn settings(&self) -> &MutationRequest {
        &self.settings
    }

    /// Write every attribute onto the target
    ///
    /// # Returns
    /// The number of attributes written, `Error::MissingTarget` without a target,
    /// or the first rejection from the repository
    pub fn execute<R>(&self, repository: &mut R) -> Result<usize>
    where
        R: MutableRepository + ?Sized,
    {
        let target = self.settings.target.ok_or(Error::MissingTarget)?;

        let mut written = 0;
        for (name, value) in &self.settings.attributes {
            if let Err(e) = repository.set_attribute(target, name, value.clone()) {
                log::warn!(
                    "mutation of {target} stopped at {name} after {written} attribute(s): {e}"
                );
                return Err(e);
            }
            log::debug!("set {target}.{name} = {value}");
            written += 1;
        }

        Ok(written)
    }
}
