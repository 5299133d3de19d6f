//! The fixed sequence every service invocation runs:
//! validate -> authorize -> scoped fetch -> mutate -> audit.
//! Failure at any step aborts the invocation; there are no retries and no
//! cross-invocation state.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use models::user;

use crate::audit::AuditDispatcher;
use crate::errors::ServiceError;
use crate::payload::Payload;
use crate::permission::{AuthorContext, Registry};
use crate::scoped;
use crate::validate::{self, FieldRules};

/// Shared per-process state handed to every service invocation.
pub struct ServiceContext {
    pub db: DatabaseConnection,
    pub audit: AuditDispatcher,
    pub permissions: Registry,
}

impl ServiceContext {
    pub fn new(db: DatabaseConnection, audit: AuditDispatcher) -> Self {
        Self { db, audit, permissions: Registry::with_builtins() }
    }
}

/// One business operation. A service declares its rule set and named
/// permission checks; `execute` then performs its scoped fetches, its single
/// mutation, and its audit dispatch.
#[async_trait]
pub trait Service {
    type Output: Send;

    fn rules(&self) -> Vec<FieldRules>;
    fn permissions(&self) -> &'static [&'static str];

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<Self::Output, ServiceError>;
}

/// The validate + authorize prefix shared by every service. Resolves the
/// author, and the author's vault permission when the request names a vault,
/// then runs the declared permission checks.
pub async fn guard(
    ctx: &ServiceContext,
    payload: &Payload,
    rules: &[FieldRules],
    permissions: &[&'static str],
) -> Result<AuthorContext, ServiceError> {
    validate::validate(&ctx.db, payload, rules).await?;

    let account_id = payload.id("account_id")?;
    let author_id = payload.id("author_id")?;
    let author = user::Entity::find_by_id(author_id)
        .one(&ctx.db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("author"))?;

    let vault_permission = match payload.get_i64("vault_id") {
        Some(vault_id) => {
            let vault = scoped::vault_in_account(&ctx.db, account_id, vault_id).await?;
            scoped::vault_permission(&ctx.db, vault.id, author.id).await?
        }
        None => None,
    };

    let author_ctx = AuthorContext { author, account_id, vault_permission };
    ctx.permissions.check_all(permissions, &author_ctx)?;
    Ok(author_ctx)
}
