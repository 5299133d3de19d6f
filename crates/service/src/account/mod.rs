//! Services mutating account-scoped reference data. All of them require the
//! author to belong to the account and to be an account administrator.

pub mod address_types;
pub mod pronouns;
pub mod relationship_group_types;
pub mod relationship_types;
