//! `keyward-engine` — the authorization decision engine.
//!
//! Embedded as a library inside request-handling services: a caller builds a
//! [`PendingSession`] from a bearer header, authenticates it into a
//! [`Session`], and asks decision questions against a [`PermissionMatrix`].
//! This crate is intentionally decoupled from HTTP and storage; framework
//! adapters call into it once per inbound request.

pub mod attributes;
pub mod claims;
pub mod config;
pub mod error;
pub mod matrix;
pub mod session;

pub use attributes::AttributeMap;
pub use claims::{
    Claims, RefreshClaims, SignOptions, TokenKind, create_auth_header, create_refresh_token,
    marshal, unmarshal, verify_refresh_token,
};
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use matrix::PermissionMatrix;
pub use session::{PendingSession, Session};
