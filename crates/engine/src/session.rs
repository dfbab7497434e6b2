//! The two-phase session and the decision procedure.
//!
//! The state machine is rendered as two types: [`PendingSession`] exposes
//! only `authenticate()`, [`Session`] exposes the query API. Querying before
//! authentication is therefore a compile error rather than a runtime guard.

use std::collections::{BTreeMap, BTreeSet};

use keyward_core::{Action, Identifier, Resource, ResourceCategory, ResourceRef, Role, Scope};

use crate::attributes::AttributeMap;
use crate::claims::{self, Claims, SignOptions};
use crate::error::{EngineError, EngineResult};
use crate::matrix::PermissionMatrix;

const BEARER_SCHEME: &str = "Bearer ";

/// A constructed but not yet verified session.
///
/// Construction validates the lexical shape of the header only; no
/// cryptographic work happens until [`PendingSession::authenticate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSession {
    token: String,
}

impl PendingSession {
    /// Extract the raw token from a `Bearer <token>` header.
    ///
    /// The header must match `Bearer <base64url>.<base64url>` with an
    /// optional third segment that may be empty; anything else fails here,
    /// regardless of whether the signature would verify.
    pub fn from_header(header: &str) -> EngineResult<Self> {
        let token = extract_token(header)?;
        Ok(Self {
            token: token.to_string(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Ok(true)` only when verification fails solely because of expiry;
    /// a bad signature is never masked as "expired".
    pub fn is_expired(&self) -> EngineResult<bool> {
        claims::is_expired(&self.token)
    }

    /// Verify and decode the held token, producing a queryable session.
    pub fn authenticate(self) -> EngineResult<Session> {
        let decoded = claims::verify(&self.token)?;
        Session::from_parts(self.token, decoded)
    }
}

/// An authenticated session: one verified token and its decoded claims,
/// with the role → identifier index materialized.
///
/// Not designed for concurrent mutation; `extend` takes `&mut self`, so
/// callers needing concurrent decisions construct independent sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    claims: Claims,
    subject: Identifier,
    roles: BTreeMap<Role, BTreeSet<Identifier>>,
}

impl Session {
    fn from_parts(token: String, decoded: Claims) -> EngineResult<Self> {
        let subject = decoded
            .sub
            .clone()
            .ok_or_else(|| EngineError::verification("payload is missing a subject"))?;

        let mut roles: BTreeMap<Role, BTreeSet<Identifier>> = BTreeMap::new();
        for (role, identifiers) in &decoded.roles {
            if identifiers.is_empty() {
                continue;
            }
            roles.insert(*role, identifiers.iter().cloned().collect());
        }

        tracing::debug!(subject = %subject, roles = roles.len(), "session authenticated");

        Ok(Self {
            token,
            claims: decoded,
            subject,
            roles,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> &Identifier {
        &self.subject
    }

    pub fn on_behalf_of(&self) -> Option<&Identifier> {
        self.claims.act.as_ref()
    }

    /// Roles the session holds at least one identifier under.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.keys().copied()
    }

    /// Identifiers held under `role`; empty for roles not held.
    pub fn identifiers(&self, role: Role) -> impl Iterator<Item = &Identifier> {
        self.roles.get(&role).into_iter().flatten()
    }

    /// See [`PendingSession::is_expired`]; the held token can expire after
    /// authentication too.
    pub fn is_expired(&self) -> EngineResult<bool> {
        claims::is_expired(&self.token)
    }

    /// Whether the token carries `scope` — or the system-admin escalation,
    /// which satisfies every scope check unconditionally.
    pub fn in_scope(&self, scope: &Scope) -> bool {
        self.claims
            .scopes
            .iter()
            .any(|held| held.is_system_admin() || held == scope)
    }

    /// Whether any of `scopes` is satisfied.
    pub fn in_any_scope(&self, scopes: &[Scope]) -> bool {
        scopes.iter().any(|scope| self.in_scope(scope))
    }

    /// May this session perform `action` on `target` under `matrix`?
    ///
    /// Resolves the attribute map from the target; use [`Session::can_with`]
    /// to supply an explicit map instead.
    pub fn can(&self, action: Action, target: &dyn Resource, matrix: &PermissionMatrix) -> bool {
        self.can_with(action, target, matrix, &AttributeMap::resolve(target))
    }

    /// The decision procedure.
    ///
    /// Matching is existential across held roles, held identifiers, and
    /// candidate attributes: one successful combination anywhere grants
    /// access, and no rule outranks another, so iteration order cannot
    /// change the outcome.
    pub fn can_with(
        &self,
        action: Action,
        target: &dyn Resource,
        matrix: &PermissionMatrix,
        attributes: &AttributeMap,
    ) -> bool {
        if self.in_scope(&Scope::SYSTEM_ADMIN) {
            return true;
        }

        for (role, held) in &self.roles {
            for category in matrix.categories(*role) {
                if !matrix.allows(*role, category, action) {
                    continue;
                }
                for field in attributes.candidates(category) {
                    if let Some(value) = target.attribute(field) {
                        if held.contains(&value) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// The inverse query: every held identifier whose own category is
    /// granted `action` for the role it is held under.
    ///
    /// Concatenates across roles without deduplication; an identifier held
    /// under two qualifying roles appears once per role.
    pub fn identifiers_that_can(
        &self,
        action: Action,
        matrix: &PermissionMatrix,
    ) -> Vec<Identifier> {
        self.collect_identifiers(action, matrix, None)
    }

    /// [`Session::identifiers_that_can`] restricted to identifiers whose
    /// category equals the normalization of `only`. A filter that fails
    /// normalization matches nothing.
    pub fn identifiers_that_can_for<'a>(
        &self,
        action: Action,
        matrix: &PermissionMatrix,
        only: impl Into<ResourceRef<'a>>,
    ) -> Vec<Identifier> {
        match only.into().normalize() {
            Some(category) => self.collect_identifiers(action, matrix, Some(category)),
            None => Vec::new(),
        }
    }

    fn collect_identifiers(
        &self,
        action: Action,
        matrix: &PermissionMatrix,
        only: Option<ResourceCategory>,
    ) -> Vec<Identifier> {
        let mut matching = Vec::new();
        for (role, held) in &self.roles {
            for identifier in held {
                let Some(category) = identifier.category() else {
                    continue;
                };
                if only.is_some_and(|filter| filter != category) {
                    continue;
                }
                if matrix.allows(*role, category, action) {
                    matching.push(identifier.clone());
                }
            }
        }
        matching
    }

    /// Re-sign the held claims with a fresh expiry and re-authenticate in
    /// place, superseding the held token.
    pub fn extend(&mut self, opts: &SignOptions) -> EngineResult<()> {
        let header = claims::create_auth_header(&self.claims, opts)?;
        let refreshed = PendingSession::from_header(&header)?.authenticate()?;
        tracing::debug!(subject = %refreshed.subject, "session extended");
        *self = refreshed;
        Ok(())
    }
}

fn extract_token(header: &str) -> EngineResult<&str> {
    let token = header
        .strip_prefix(BEARER_SCHEME)
        .ok_or_else(|| EngineError::malformed("expected `Bearer <token>`"))?;

    let segments: Vec<&str> = token.split('.').collect();
    if !(2..=3).contains(&segments.len()) {
        return Err(EngineError::malformed(
            "token must have two or three dot-separated segments",
        ));
    }
    for (index, segment) in segments.iter().enumerate() {
        // Only the trailing signature segment may be empty (unsigned token).
        if segment.is_empty() && index < 2 {
            return Err(EngineError::malformed("empty token segment"));
        }
        if !segment.bytes().all(is_base64url_byte) {
            return Err(EngineError::malformed(
                "token segments must be base64url",
            ));
        }
    }
    Ok(token)
}

fn is_base64url_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}
