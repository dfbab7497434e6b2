//! `keyward-core` — the fixed authorization vocabulary and identity primitives.
//!
//! This crate contains **pure domain** types (no cryptography, no I/O): the
//! enumerations policies are written against, the opaque identifier type, and
//! the seam through which domain objects expose ownership attributes.

pub mod action;
pub mod category;
pub mod error;
pub mod id;
pub mod resource;
pub mod role;
pub mod scope;

pub use action::Action;
pub use category::{ResourceCategory, ResourceRef};
pub use error::UnknownName;
pub use id::Identifier;
pub use resource::{FieldAssociation, Resource};
pub use role::Role;
pub use scope::Scope;
