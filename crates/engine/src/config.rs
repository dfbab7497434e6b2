//! Process-wide engine configuration.
//!
//! Installed exactly once at startup and read-only thereafter. Every signing
//! and verification path resolves the config first and fails fast with
//! [`EngineError::ConfigMissing`] if it was never installed.

use std::sync::OnceLock;

use keyward_core::Identifier;

use crate::error::{EngineError, EngineResult};

/// Static configuration supplied once at startup.
#[derive(Clone)]
pub struct EngineConfig {
    /// Shared secret for HS256 signing and verification.
    pub signing_secret: Vec<u8>,
    /// Subject substituted into tokens minted under the system-admin scope
    /// without an explicit user identifier (service-to-service traffic).
    pub service_subject: Identifier,
}

impl EngineConfig {
    pub fn new(signing_secret: impl Into<Vec<u8>>, service_subject: Identifier) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            service_subject,
        }
    }
}

// Keep the secret out of log output.
impl core::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("signing_secret", &"<redacted>")
            .field("service_subject", &self.service_subject)
            .finish()
    }
}

static CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Install the process-wide configuration. Write-once.
pub fn init(config: EngineConfig) -> EngineResult<()> {
    CONFIG
        .set(config)
        .map_err(|_| EngineError::ConfigAlreadyInitialized)
}

/// Whether `init` has run.
pub fn installed() -> bool {
    CONFIG.get().is_some()
}

pub(crate) fn get() -> EngineResult<&'static EngineConfig> {
    CONFIG.get().ok_or(EngineError::ConfigMissing)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub const TEST_SECRET: &[u8] = b"unit-test-secret";
    pub const TEST_SERVICE_SUBJECT: &str = "u_service";

    /// Install the shared test configuration; tolerates repeat calls so any
    /// test module can run first.
    pub fn install() {
        let _ = init(EngineConfig::new(
            TEST_SECRET.to_vec(),
            Identifier::new(TEST_SERVICE_SUBJECT),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        test_support::install();
        let err = init(EngineConfig::new(
            b"other".to_vec(),
            Identifier::new("u_other"),
        ))
        .unwrap_err();
        assert_eq!(err, EngineError::ConfigAlreadyInitialized);
        assert!(installed());
    }

    #[test]
    fn debug_redacts_the_secret() {
        let config = EngineConfig::new(b"hunter2".to_vec(), Identifier::new("u_svc"));
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }
}
