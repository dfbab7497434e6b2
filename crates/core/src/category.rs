//! Authorizable resource categories and the namespace normalizer.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;

/// A coarse authorizable entity kind.
///
/// Policies are written against categories, never against raw identifier
/// namespaces; the [`ResourceCategory::normalize`] table is the only place
/// where external namespace names are interpreted.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    Division,
    User,
    Order,
}

impl ResourceCategory {
    /// Every category, in a fixed order.
    pub const ALL: [ResourceCategory; 3] = [
        ResourceCategory::Division,
        ResourceCategory::User,
        ResourceCategory::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Division => "division",
            ResourceCategory::User => "user",
            ResourceCategory::Order => "order",
        }
    }

    /// Conventional name of the field holding an ownership identifier for
    /// this category (`<category>_id`).
    pub fn owner_field(&self) -> &'static str {
        match self {
            ResourceCategory::Division => "division_id",
            ResourceCategory::User => "user_id",
            ResourceCategory::Order => "order_id",
        }
    }

    /// Canonical identifier-namespace prefix minted for this category.
    pub fn prefix(&self) -> &'static str {
        match self {
            ResourceCategory::Division => "d",
            ResourceCategory::User => "u",
            ResourceCategory::Order => "o",
        }
    }

    /// Map an external namespace name (or a category name) to a category.
    ///
    /// Several external namespaces may collapse to a single category:
    /// `branch` entities are authorized as their owning `division`. Unknown
    /// input yields `None`, which callers must treat as "matches no policy".
    pub fn normalize(input: &str) -> Option<ResourceCategory> {
        match input {
            "division" | "branch" => Some(ResourceCategory::Division),
            "user" => Some(ResourceCategory::User),
            "order" => Some(ResourceCategory::Order),
            _ => None,
        }
    }

    /// Map an identifier-namespace prefix (the part before `_`) to a category.
    pub fn from_prefix(prefix: &str) -> Option<ResourceCategory> {
        let namespace = match prefix {
            "d" => "division",
            "b" => "branch",
            "u" => "user",
            "o" => "order",
            _ => return None,
        };
        Self::normalize(namespace)
    }
}

impl core::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceCategory {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "division" => Ok(ResourceCategory::Division),
            "user" => Ok(ResourceCategory::User),
            "order" => Ok(ResourceCategory::Order),
            _ => Err(UnknownName::new("resource category", s)),
        }
    }
}

/// Argument type for APIs that accept either a typed category or a raw
/// external namespace name.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceRef<'a> {
    Category(ResourceCategory),
    Namespace(&'a str),
}

impl ResourceRef<'_> {
    pub fn normalize(self) -> Option<ResourceCategory> {
        match self {
            ResourceRef::Category(category) => Some(category),
            ResourceRef::Namespace(namespace) => ResourceCategory::normalize(namespace),
        }
    }
}

impl From<ResourceCategory> for ResourceRef<'static> {
    fn from(value: ResourceCategory) -> Self {
        ResourceRef::Category(value)
    }
}

impl<'a> From<&'a str> for ResourceRef<'a> {
    fn from(value: &'a str) -> Self {
        ResourceRef::Namespace(value)
    }
}
