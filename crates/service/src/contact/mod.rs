//! Services mutating a contact's data. These run inside a vault, so they
//! additionally require edit-level access to it.

pub mod addresses;
