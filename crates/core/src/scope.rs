//! Coarse escalation scopes.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A coarse-grained escalation flag, orthogonal to role/action/resource
/// checks.
///
/// Scopes are modeled as opaque strings so deployments can add their own
/// without touching this crate. The one scope the engine interprets itself is
/// [`Scope::SYSTEM_ADMIN`], which satisfies every scope check and every
/// decision check unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    /// Full escalation: satisfies every scope and every `can` check.
    pub const SYSTEM_ADMIN: Scope = Scope(Cow::Borrowed("system-admin"));

    /// Escalation for banking back-office operations.
    pub const BANKING_ADMIN: Scope = Scope(Cow::Borrowed("banking-admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_system_admin(&self) -> bool {
        *self == Self::SYSTEM_ADMIN
    }
}

impl core::fmt::Display for Scope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_admin_is_recognized() {
        assert!(Scope::SYSTEM_ADMIN.is_system_admin());
        assert!(Scope::new("system-admin").is_system_admin());
        assert!(!Scope::BANKING_ADMIN.is_system_admin());
        assert!(!Scope::new("system-admin-lite").is_system_admin());
    }
}
