//! Entity definitions for the PRM backend, one module per table.
//! Tenancy flows from `account` down: users, vaults and reference data hang
//! off an account; contacts hang off a vault.

pub mod errors;
pub mod db;

pub mod account;
pub mod user;
pub mod vault;
pub mod vault_user;
pub mod contact;
pub mod address_type;
pub mod address;
pub mod relationship_group_type;
pub mod relationship_type;
pub mod pronoun;
pub mod audit_log;
