//! Named permission checks evaluated against the resolved author context.
//! Checks are registered by name so new predicates plug in without touching
//! the pipeline.

use std::collections::HashMap;

use models::{user, vault_user};

use crate::errors::ServiceError;

pub const AUTHOR_MUST_BELONG_TO_ACCOUNT: &str = "author_must_belong_to_account";
pub const AUTHOR_MUST_BE_ACCOUNT_ADMINISTRATOR: &str = "author_must_be_account_administrator";
pub const AUTHOR_MUST_HAVE_VAULT_EDIT_ACCESS: &str = "author_must_have_vault_edit_access";

/// Caller identity and target scope a predicate evaluates against.
#[derive(Debug, Clone)]
pub struct AuthorContext {
    pub author: user::Model,
    pub account_id: i64,
    /// The author's permission in the target vault, when the request names one.
    pub vault_permission: Option<i32>,
}

impl AuthorContext {
    /// Lower permission values grant more; `level` is the weakest acceptable.
    pub fn vault_access_at_least(&self, level: i32) -> bool {
        matches!(self.vault_permission, Some(p) if p <= level)
    }
}

pub type Predicate = fn(&AuthorContext) -> bool;

pub struct Registry {
    checks: HashMap<&'static str, Predicate>,
}

impl Registry {
    pub fn with_builtins() -> Self {
        let mut registry = Self { checks: HashMap::new() };
        registry.register(AUTHOR_MUST_BELONG_TO_ACCOUNT, |ctx| {
            ctx.author.account_id == ctx.account_id
        });
        registry.register(AUTHOR_MUST_BE_ACCOUNT_ADMINISTRATOR, |ctx| {
            ctx.author.is_account_administrator
        });
        registry.register(AUTHOR_MUST_HAVE_VAULT_EDIT_ACCESS, |ctx| {
            ctx.vault_access_at_least(vault_user::PERMISSION_EDIT)
        });
        registry
    }

    pub fn register(&mut self, name: &'static str, predicate: Predicate) {
        self.checks.insert(name, predicate);
    }

    /// Run the named checks in order; the first failure aborts with a
    /// `Permission` error carrying the check's name.
    pub fn check_all(&self, names: &[&'static str], ctx: &AuthorContext) -> Result<(), ServiceError> {
        for name in names {
            let predicate = self
                .checks
                .get(name)
                .ok_or_else(|| ServiceError::Permission(format!("unknown permission check {name}")))?;
            if !predicate(ctx) {
                return Err(ServiceError::permission(name));
            }
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
