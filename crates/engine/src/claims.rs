//! Claims codec: builds, signs, verifies, and marshals token payloads.
//!
//! Tokens are standard three-part signed-claims tokens (HS256 via
//! `jsonwebtoken`). The marshaled-claims format is an internal interchange
//! snapshot, not a public wire protocol: base64 over the JSON payload with
//! the timestamp fields removed, meant to be re-signed on the other side of
//! a boundary that cannot forward the original token.

use std::collections::BTreeMap;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use keyward_core::{Identifier, Role, Scope};

use crate::config;
use crate::error::{EngineError, EngineResult};

/// Default lifetime of an interactive access token.
const ACCESS_WINDOW_SECS: i64 = 9 * 60 * 60;
/// Default lifetime of a service-to-service token.
const SERVICE_WINDOW_SECS: i64 = 5 * 60;
/// Default lifetime of a refresh token.
const REFRESH_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

/// Grant-type marker distinguishing refresh tokens from access claims.
pub const REFRESH_GRANT_TYPE: &str = "refresh";

/// What kind of token is being minted; selects the default expiry window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Interactive access token (long-lived window).
    #[default]
    Access,
    /// Service-to-service token (short-lived window).
    Service,
}

/// Options for a signing operation.
#[derive(Debug, Clone, Default)]
pub struct SignOptions {
    pub kind: TokenKind,
    /// Explicit expiry window; overrides the kind's default.
    pub expires_in: Option<Duration>,
}

impl SignOptions {
    pub fn access() -> Self {
        Self::default()
    }

    pub fn service() -> Self {
        Self {
            kind: TokenKind::Service,
            ..Self::default()
        }
    }

    pub fn expiring_in(window: Duration) -> Self {
        Self {
            expires_in: Some(window),
            ..Self::default()
        }
    }

    fn window_secs(&self) -> i64 {
        match self.expires_in {
            Some(window) => window.num_seconds(),
            None => match self.kind {
                TokenKind::Access => ACCESS_WINDOW_SECS,
                TokenKind::Service => SERVICE_WINDOW_SECS,
            },
        }
    }
}

/// The token payload.
///
/// Immutable once decoded; operations that "extend" a session work on a
/// timestamp-stripped clone and re-sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal's own identifier. Always present in signed
    /// tokens; optional here so callers can have the service subject
    /// substituted at signing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Identifier>,

    /// On-behalf-of identifier, for delegated access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act: Option<Identifier>,

    /// Identifiers held under each role.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub roles: BTreeMap<Role, Vec<Identifier>>,

    /// Escalation scopes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<Scope>,

    /// Issued-at, unix seconds. Stamped at signing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiry, unix seconds. Stamped at signing time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    pub fn for_subject(sub: Identifier) -> Self {
        Self {
            sub: Some(sub),
            ..Self::default()
        }
    }

    /// Raw scope membership. The session layer applies the system-admin
    /// bypass on top of this.
    pub fn has_scope(&self, scope: &Scope) -> bool {
        self.scopes.contains(scope)
    }

    /// A clone with the timestamp fields removed: the re-signable snapshot
    /// shape used by `marshal` and `extend`.
    pub fn stripped(&self) -> Claims {
        Claims {
            iat: None,
            exp: None,
            ..self.clone()
        }
    }
}

/// Minimal refresh-token payload, distinct from access-claims shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Identifier,
    pub grant_type: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign `claims` and wrap the token in the bearer header format.
pub fn create_auth_header(claims: &Claims, opts: &SignOptions) -> EngineResult<String> {
    Ok(format!("Bearer {}", sign(claims, opts)?))
}

/// Sign `claims` into a token.
///
/// Stamps `iat = now` and `exp = iat + window`. A missing subject is an
/// error unless the scopes carry the system-admin escalation, in which case
/// the configured service subject is substituted.
pub fn sign(claims: &Claims, opts: &SignOptions) -> EngineResult<String> {
    let config = config::get()?;

    let mut payload = claims.stripped();
    if payload.sub.is_none() {
        if payload.scopes.iter().any(Scope::is_system_admin) {
            payload.sub = Some(config.service_subject.clone());
        } else {
            return Err(EngineError::MissingClaim("sub"));
        }
    }

    let now = Utc::now().timestamp();
    payload.iat = Some(now);
    payload.exp = Some(now + opts.window_secs());

    encode(&payload, &config.signing_secret)
}

/// Sign a minimal refresh payload for `owner`.
///
/// `opts.kind` is ignored here; refresh tokens default to a 30-day window
/// unless `expires_in` is set.
pub fn create_refresh_token(owner: &Identifier, opts: &SignOptions) -> EngineResult<String> {
    let config = config::get()?;

    let now = Utc::now().timestamp();
    let window = match opts.expires_in {
        Some(window) => window.num_seconds(),
        None => REFRESH_WINDOW_SECS,
    };
    let payload = RefreshClaims {
        sub: owner.clone(),
        grant_type: REFRESH_GRANT_TYPE.to_string(),
        iat: now,
        exp: now + window,
    };

    encode(&payload, &config.signing_secret)
}

/// Verify and decode an access token against the process secret.
pub fn verify(token: &str) -> EngineResult<Claims> {
    let config = config::get()?;
    decode(token, &config.signing_secret)
}

/// Verify a refresh token and check its grant-type marker.
pub fn verify_refresh_token(token: &str) -> EngineResult<RefreshClaims> {
    let config = config::get()?;
    let claims: RefreshClaims = decode(token, &config.signing_secret)?;
    if claims.grant_type != REFRESH_GRANT_TYPE {
        return Err(EngineError::verification("not a refresh token"));
    }
    Ok(claims)
}

/// `Ok(false)` when the token verifies, `Ok(true)` when the only failure is
/// expiry; any other verification failure propagates untouched.
pub(crate) fn is_expired(token: &str) -> EngineResult<bool> {
    match verify(token) {
        Ok(_) => Ok(false),
        Err(EngineError::Expired) => Ok(true),
        Err(err) => Err(err),
    }
}

/// Portable, re-signable snapshot of `claims`: timestamps stripped, JSON
/// serialized, base64 encoded. The caller must re-sign after `unmarshal`.
pub fn marshal(claims: &Claims) -> EngineResult<String> {
    let json = serde_json::to_vec(&claims.stripped())
        .map_err(|err| EngineError::Signing(err.to_string()))?;
    Ok(BASE64.encode(json))
}

/// Inverse of [`marshal`].
pub fn unmarshal(input: &str) -> EngineResult<Claims> {
    let bytes = BASE64
        .decode(input)
        .map_err(|err| EngineError::verification(format!("marshaled claims: {err}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| EngineError::verification(format!("marshaled claims: {err}")))
}

fn encode<T: Serialize>(payload: &T, secret: &[u8]) -> EngineResult<String> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        payload,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|err| EngineError::Signing(err.to_string()))
}

fn decode<T: for<'de> Deserialize<'de>>(token: &str, secret: &[u8]) -> EngineResult<T> {
    let validation = Validation::new(Algorithm::HS256);
    jsonwebtoken::decode::<T>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => EngineError::Expired,
            _ => EngineError::verification(err.to_string()),
        })
}
