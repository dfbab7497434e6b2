//! The role → resource-category → action permission matrix.

use std::collections::{BTreeMap, BTreeSet};

use keyward_core::{Action, ResourceCategory, ResourceRef, Role};

/// A declarative permission policy: which roles may perform which actions on
/// which resource categories.
///
/// Built once by policy authors via [`PermissionMatrix::allow`] and queried
/// read-only afterwards. Queries are total: an unset role or category is an
/// empty cell, never an error — absence means "no permission", not
/// "misconfiguration".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMatrix {
    grants: BTreeMap<Role, BTreeMap<ResourceCategory, BTreeSet<Action>>>,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant `actions` to `role` on the category `resource` normalizes to.
    ///
    /// Idempotent: re-allowing an already-allowed action is a no-op. A
    /// namespace that fails normalization drops the grant (and is worth a
    /// warning, since it usually means a misspelled policy).
    pub fn allow<'a>(
        &mut self,
        role: Role,
        resource: impl Into<ResourceRef<'a>>,
        actions: impl IntoIterator<Item = Action>,
    ) {
        let resource = resource.into();
        let Some(category) = resource.normalize() else {
            tracing::warn!(?role, ?resource, "dropping grant for unknown namespace");
            return;
        };
        self.grants
            .entry(role)
            .or_default()
            .entry(category)
            .or_default()
            .extend(actions);
    }

    /// Whether `role` may perform `action` on the category `resource`
    /// normalizes to. False on failed normalization.
    pub fn allows<'a>(
        &self,
        role: Role,
        resource: impl Into<ResourceRef<'a>>,
        action: Action,
    ) -> bool {
        self.allows_any(role, resource, &[action])
    }

    /// Whether `role` may perform *any* of `actions` on the category.
    ///
    /// The list is an OR, not an AND: a caller probing a set of acceptable
    /// actions is satisfied by any single match.
    pub fn allows_any<'a>(
        &self,
        role: Role,
        resource: impl Into<ResourceRef<'a>>,
        actions: &[Action],
    ) -> bool {
        let Some(category) = resource.into().normalize() else {
            return false;
        };
        match self.cell(role, category) {
            Some(cell) => actions.iter().any(|action| cell.contains(action)),
            None => false,
        }
    }

    /// The actions granted to `role` on `resource`; empty for unset cells
    /// and for namespaces that fail normalization.
    pub fn actions<'a>(
        &self,
        role: Role,
        resource: impl Into<ResourceRef<'a>>,
    ) -> BTreeSet<Action> {
        resource
            .into()
            .normalize()
            .and_then(|category| self.cell(role, category))
            .cloned()
            .unwrap_or_default()
    }

    /// The categories `role` holds any grant on, in a fixed order.
    pub fn categories(&self, role: Role) -> impl Iterator<Item = ResourceCategory> + '_ {
        self.grants
            .get(&role)
            .into_iter()
            .flat_map(|cells| cells.keys().copied())
    }

    fn cell(&self, role: Role, category: ResourceCategory) -> Option<&BTreeSet<Action>> {
        self.grants.get(&role)?.get(&category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_cells_are_empty_not_errors() {
        let matrix = PermissionMatrix::new();
        assert!(matrix.actions(Role::Admin, ResourceCategory::User).is_empty());
        assert!(!matrix.allows(Role::Admin, ResourceCategory::User, Action::Read));
        assert_eq!(matrix.categories(Role::Admin).count(), 0);
    }

    #[test]
    fn allow_is_idempotent() {
        let mut matrix = PermissionMatrix::new();
        matrix.allow(Role::User, ResourceCategory::Order, [Action::Read]);
        matrix.allow(Role::User, ResourceCategory::Order, [Action::Read]);
        assert_eq!(matrix.actions(Role::User, ResourceCategory::Order).len(), 1);
    }

    #[test]
    fn namespaces_normalize_on_both_sides() {
        let mut matrix = PermissionMatrix::new();
        matrix.allow(Role::Admin, "branch", [Action::Update]);
        // `branch` and `division` are the same category.
        assert!(matrix.allows(Role::Admin, ResourceCategory::Division, Action::Update));
        assert!(matrix.allows(Role::Admin, "division", Action::Update));
    }

    #[test]
    fn unknown_namespace_never_matches() {
        let mut matrix = PermissionMatrix::new();
        matrix.allow(Role::Admin, "warehouse", [Action::Read]);
        assert!(!matrix.allows(Role::Admin, "warehouse", Action::Read));
        assert_eq!(matrix.categories(Role::Admin).count(), 0);
    }

    #[test]
    fn allows_any_is_an_or_over_the_requested_actions() {
        let mut matrix = PermissionMatrix::new();
        matrix.allow(Role::User, ResourceCategory::Order, [Action::Read]);

        // Satisfied by one match regardless of list order.
        assert!(matrix.allows_any(
            Role::User,
            ResourceCategory::Order,
            &[Action::Delete, Action::Read]
        ));
        assert!(matrix.allows_any(
            Role::User,
            ResourceCategory::Order,
            &[Action::Read, Action::Delete]
        ));
        assert!(!matrix.allows_any(
            Role::User,
            ResourceCategory::Order,
            &[Action::Delete, Action::Update]
        ));
        assert!(!matrix.allows_any(Role::User, ResourceCategory::Order, &[]));
    }

    #[test]
    fn roles_do_not_leak_grants_to_each_other() {
        let mut matrix = PermissionMatrix::new();
        matrix.allow(Role::Admin, ResourceCategory::User, [Action::Delete]);
        assert!(!matrix.allows(Role::User, ResourceCategory::User, Action::Delete));
        assert!(!matrix.allows(Role::Pending, ResourceCategory::User, Action::Delete));
    }
}
