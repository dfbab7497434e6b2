//! Opaque, namespace-prefixed entity identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::ResourceCategory;

/// An opaque string that both uniquely names an entity and encodes, via its
/// namespace prefix (`u_…`, `d_…`, `b_…`, `o_…`), which external
/// resource-category it belongs to.
///
/// The engine never inspects identifier contents beyond the prefix lookup in
/// [`Identifier::category`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Issue a fresh identifier in the category's canonical namespace.
    ///
    /// Uses UUIDv7 (time-ordered) for the payload. Prefer fixed identifiers
    /// in tests for determinism.
    pub fn mint(category: ResourceCategory) -> Self {
        Self(format!("{}_{}", category.prefix(), Uuid::now_v7().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The namespace prefix, i.e. everything before the first `_`.
    pub fn prefix(&self) -> Option<&str> {
        match self.0.split_once('_') {
            Some((prefix, rest)) if !prefix.is_empty() && !rest.is_empty() => Some(prefix),
            _ => None,
        }
    }

    /// The resource category this identifier's namespace normalizes to.
    pub fn category(&self) -> Option<ResourceCategory> {
        self.prefix().and_then(ResourceCategory::from_prefix)
    }
}

impl core::fmt::Display for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_everything_before_the_first_underscore() {
        assert_eq!(Identifier::new("u_12345").prefix(), Some("u"));
        assert_eq!(Identifier::new("b_1_2").prefix(), Some("b"));
        assert_eq!(Identifier::new("plain").prefix(), None);
        assert_eq!(Identifier::new("_rest").prefix(), None);
        assert_eq!(Identifier::new("u_").prefix(), None);
    }

    #[test]
    fn category_resolves_through_the_normalizer() {
        assert_eq!(
            Identifier::new("u_1").category(),
            Some(ResourceCategory::User)
        );
        assert_eq!(
            Identifier::new("b_9").category(),
            Some(ResourceCategory::Division)
        );
        assert_eq!(
            Identifier::new("d_9").category(),
            Some(ResourceCategory::Division)
        );
        assert_eq!(Identifier::new("x_1").category(), None);
        assert_eq!(Identifier::new("anonymous").category(), None);
    }

    #[test]
    fn minted_identifiers_carry_the_canonical_prefix() {
        let id = Identifier::mint(ResourceCategory::Order);
        assert_eq!(id.prefix(), Some("o"));
        assert_eq!(id.category(), Some(ResourceCategory::Order));
    }
}
