//! Vocabulary parse errors.

use thiserror::Error;

/// A name did not match any variant of a fixed enumeration.
///
/// Raised only by the `FromStr` impls; the normalizer deliberately returns
/// `Option` instead (an unknown namespace means "matches no policy", not
/// "misconfiguration").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: '{value}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownName {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
