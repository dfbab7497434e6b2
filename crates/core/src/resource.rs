//! The seam through which domain objects expose ownership attributes.

use std::collections::{BTreeMap, HashMap};

use crate::category::ResourceCategory;
use crate::id::Identifier;

/// A declared association between one field of a domain type and the
/// categories whose ownership identifiers it may hold.
///
/// Associations are additive: resolution unions them with the convention
/// defaults, never replaces them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldAssociation {
    pub field: &'static str,
    pub categories: &'static [ResourceCategory],
}

/// A domain object authorization decisions can be made about.
///
/// Implementations only need to answer field lookups by name; the engine
/// probes a finite set of candidate fields per category, so this is O(known
/// categories) regardless of the object's shape — no reflection involved.
pub trait Resource {
    /// The ownership identifier stored in the named field, if the field
    /// exists and holds a value.
    fn attribute(&self, field: &str) -> Option<Identifier>;

    /// Whether the field exists on this object at all.
    ///
    /// Defaults to "the field holds a value". Types with optional fields
    /// should override this so a present-but-empty field still counts.
    fn has_attribute(&self, field: &str) -> bool {
        self.attribute(field).is_some()
    }

    /// Explicit field→category associations declared for this type.
    ///
    /// A wrapping type extends the associations of the types it embeds by
    /// appending its own; associations accumulate down a composition chain
    /// and are never removed.
    fn declared_associations(&self) -> Vec<FieldAssociation> {
        Vec::new()
    }
}

impl Resource for BTreeMap<String, Identifier> {
    fn attribute(&self, field: &str) -> Option<Identifier> {
        self.get(field).cloned()
    }
}

impl Resource for HashMap<String, Identifier> {
    fn attribute(&self, field: &str) -> Option<Identifier> {
        self.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Invoice {
        id: Identifier,
        division_id: Option<Identifier>,
    }

    impl Resource for Invoice {
        fn attribute(&self, field: &str) -> Option<Identifier> {
            match field {
                "id" => Some(self.id.clone()),
                "division_id" => self.division_id.clone(),
                _ => None,
            }
        }

        fn has_attribute(&self, field: &str) -> bool {
            matches!(field, "id" | "division_id")
        }
    }

    #[test]
    fn optional_fields_are_present_even_when_empty() {
        let invoice = Invoice {
            id: Identifier::new("o_1"),
            division_id: None,
        };
        assert!(invoice.has_attribute("division_id"));
        assert_eq!(invoice.attribute("division_id"), None);
        assert!(!invoice.has_attribute("user_id"));
    }

    #[test]
    fn map_backed_targets_answer_lookups() {
        let mut target = BTreeMap::new();
        target.insert("id".to_string(), Identifier::new("u_1"));
        assert_eq!(target.attribute("id"), Some(Identifier::new("u_1")));
        assert!(!target.has_attribute("division_id"));
        assert!(target.declared_associations().is_empty());
    }
}
