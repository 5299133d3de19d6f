#![cfg(test)]
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tokio::sync::mpsc::UnboundedReceiver;

use models::{account, contact, user, vault, vault_user};

use crate::audit::{AuditDispatcher, AuditEntry};
use crate::pipeline::ServiceContext;

/// Fresh in-memory database with the full schema applied.
pub async fn get_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Service context whose audit dispatcher feeds the returned receiver
/// instead of a worker, so tests can assert on dispatched entries.
pub async fn get_context() -> Result<(ServiceContext, UnboundedReceiver<AuditEntry>)> {
    let db = get_db().await?;
    let (audit, rx) = AuditDispatcher::capture();
    Ok((ServiceContext::new(db, audit), rx))
}

/// A fresh account with an administrator user.
pub async fn seed_admin(db: &DatabaseConnection) -> Result<(account::Model, user::Model)> {
    let account = account::create(db).await?;
    let user = user::create(db, account.id, "Regis", "regis@example.com", true).await?;
    Ok((account, user))
}

pub async fn seed_member(db: &DatabaseConnection, account_id: i64, name: &str) -> Result<user::Model> {
    let email = format!("{}@example.com", name.to_lowercase());
    Ok(user::create(db, account_id, name, &email, false).await?)
}

/// A vault in the account with the given permission granted to the user.
pub async fn seed_vault_for(
    db: &DatabaseConnection,
    account_id: i64,
    user_id: i64,
    permission: i32,
) -> Result<vault::Model> {
    let vault = vault::create(db, account_id, "Family").await?;
    vault_user::grant(db, vault.id, user_id, permission).await?;
    Ok(vault)
}

pub async fn seed_contact(db: &DatabaseConnection, vault_id: i64) -> Result<contact::Model> {
    Ok(contact::create(db, vault_id, "Ross", Some("Geller")).await?)
}

/// Assert exactly one audit entry was dispatched and return it.
pub fn expect_single_audit(rx: &mut UnboundedReceiver<AuditEntry>) -> AuditEntry {
    let entry = rx.try_recv().expect("expected one audit entry");
    assert!(rx.try_recv().is_err(), "expected exactly one audit entry");
    entry
}

/// Assert nothing was dispatched.
pub fn expect_no_audit(rx: &mut UnboundedReceiver<AuditEntry>) {
    assert!(rx.try_recv().is_err(), "expected no audit entries");
}
