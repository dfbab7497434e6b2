//! Engine error taxonomy.
//!
//! Every failure here is deterministic given its inputs: there is no retry
//! policy because nothing is idempotent-but-flaky. Precondition violations
//! (querying before authentication) are not represented — the query API only
//! exists on an authenticated session, so the compiler rejects them.

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Process-wide configuration was never installed. Fatal; never retried.
    #[error("engine configuration was never initialized")]
    ConfigMissing,

    /// A second `config::init` call. Configuration is write-once.
    #[error("engine configuration is already initialized")]
    ConfigAlreadyInitialized,

    /// The authorization header failed the lexical format check. Raised at
    /// session construction, before any cryptographic work.
    #[error("malformed authorization header: {0}")]
    MalformedHeader(String),

    /// Bad signature or malformed payload. The session is unusable.
    #[error("token verification failed: {0}")]
    Verification(String),

    /// Distinguished sub-case of verification failure: the token is past its
    /// expiry. Only `is_expired` treats this specially.
    #[error("token has expired")]
    Expired,

    /// A claim required at header-construction time was absent.
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),

    /// The signing primitive failed (key material or serialization).
    #[error("token signing failed: {0}")]
    Signing(String),
}

impl EngineError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedHeader(msg.into())
    }

    pub(crate) fn verification(msg: impl Into<String>) -> Self {
        Self::Verification(msg.into())
    }
}
