//! Attribute resolution: which fields of a target object hold ownership
//! identifiers for which resource category.

use std::collections::{BTreeMap, BTreeSet};

use keyward_core::{Resource, ResourceCategory};

/// The resolved category → candidate-field mapping for one target object.
///
/// After [`AttributeMap::resolve`], every category in the enumeration is
/// present. Resolution is a union of convention defaults and declared
/// associations; nothing ever removes a candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    fields: BTreeMap<ResourceCategory, BTreeSet<String>>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `field` as a candidate for `category`.
    pub fn associate(&mut self, category: ResourceCategory, field: impl Into<String>) {
        self.fields.entry(category).or_default().insert(field.into());
    }

    /// Candidate fields for `category`, empty when none were associated.
    pub fn candidates(&self, category: ResourceCategory) -> impl Iterator<Item = &str> {
        self.fields
            .get(&category)
            .into_iter()
            .flat_map(|fields| fields.iter().map(String::as_str))
    }

    pub fn contains(&self, category: ResourceCategory, field: &str) -> bool {
        self.fields
            .get(&category)
            .is_some_and(|fields| fields.contains(field))
    }

    /// Compute the attribute map for one target object.
    ///
    /// Per category: the literal `id` field is always a candidate (an object
    /// is always check-able against its own identity), and the conventional
    /// `<category>_id` field is a candidate when the object actually has it.
    /// Declared associations are unioned in on top. The probe set is the
    /// category enumeration, so this is O(|categories|) for any object.
    pub fn resolve(target: &dyn Resource) -> Self {
        let mut map = Self::new();
        for category in ResourceCategory::ALL {
            map.associate(category, "id");
            let conventional = category.owner_field();
            if target.has_attribute(conventional) {
                map.associate(category, conventional);
            }
        }
        for association in target.declared_associations() {
            for category in association.categories {
                map.associate(*category, association.field);
            }
        }
        map
    }
}
