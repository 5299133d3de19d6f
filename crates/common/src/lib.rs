//! Shared plumbing for the PRM backend: logging setup and pagination.

pub mod pagination;
pub mod utils;
