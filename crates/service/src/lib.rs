//! Service layer running every business operation through the same pipeline:
//! validate -> authorize -> scoped fetch -> mutate -> audit.
//! - Declarative per-service rule sets evaluated by one engine.
//! - Named permission checks resolved through a pluggable registry.
//! - Parent-scoped fetches so a row from another tenant is simply not found.
//! - Fire-and-forget audit dispatch decoupled from the caller's result.

pub mod errors;
pub mod payload;
pub mod validate;
pub mod permission;
pub mod scoped;
pub mod audit;
pub mod pipeline;
pub mod audit_trail;

pub mod account;
pub mod contact;

#[cfg(test)]
pub mod test_support;
