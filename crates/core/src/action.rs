//! Operations a policy can grant.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;

/// An operation against a resource instance.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Query,
    Approve,
    Request,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Query => "query",
            Action::Approve => "approve",
            Action::Request => "request",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Action::Create),
            "read" => Ok(Action::Read),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            "query" => Ok(Action::Query),
            "approve" => Ok(Action::Approve),
            "request" => Ok(Action::Request),
            _ => Err(UnknownName::new("action", s)),
        }
    }
}
