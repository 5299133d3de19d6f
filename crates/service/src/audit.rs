//! Fire-and-forget audit dispatch. Services hand an entry to the dispatcher
//! after their mutation committed; a spawned worker persists it. The caller
//! never blocks on, or observes, audit persistence.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use models::audit_log;

use crate::permission::AuthorContext;

/// One action to record: who did what, in which account, to which objects.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub account_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub action_name: String,
    /// Action-specific snapshot of what changed.
    pub objects: serde_json::Value,
}

impl AuditEntry {
    pub fn for_author(ctx: &AuthorContext, action_name: &str, objects: serde_json::Value) -> Self {
        Self {
            account_id: ctx.author.account_id,
            author_id: ctx.author.id,
            author_name: ctx.author.name.clone(),
            action_name: action_name.to_string(),
            objects,
        }
    }
}

#[derive(Clone)]
pub struct AuditDispatcher {
    tx: mpsc::UnboundedSender<AuditEntry>,
}

impl AuditDispatcher {
    /// Spawn the persisting worker and return a dispatch handle.
    pub fn spawn(db: DatabaseConnection) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<AuditEntry>();
        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                match persist(&db, &entry).await {
                    Ok(row) => debug!(id = row.id, action = %row.action_name, "audit log recorded"),
                    Err(e) => error!(action = %entry.action_name, "audit log insert failed: {e}"),
                }
            }
        });
        Self { tx }
    }

    /// Channel-only dispatcher: entries land in the returned receiver instead
    /// of a worker. Used by tests to assert on dispatched entries.
    pub fn capture() -> (Self, mpsc::UnboundedReceiver<AuditEntry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Hand off an entry. Never blocks; a closed channel is logged and the
    /// entry dropped, since audit persistence is best-effort.
    pub fn dispatch(&self, entry: AuditEntry) {
        if let Err(e) = self.tx.send(entry) {
            warn!(action = %e.0.action_name, "audit channel closed; entry dropped");
        }
    }
}

async fn persist(
    db: &DatabaseConnection,
    entry: &AuditEntry,
) -> Result<audit_log::Model, models::errors::ModelError> {
    let objects = entry.objects.to_string();
    audit_log::create(
        db,
        entry.account_id,
        entry.author_id,
        &entry.author_name,
        &entry.action_name,
        &objects,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
    use serde_json::json;
    use std::time::Duration;

    fn entry(account_id: i64, author: &models::user::Model) -> AuditEntry {
        AuditEntry {
            account_id,
            author_id: author.id,
            author_name: author.name.clone(),
            action_name: "contact_created".into(),
            objects: json!({ "contact_name": author.name }),
        }
    }

    #[tokio::test]
    async fn worker_persists_dispatched_entries() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let (account, user) = test_support::seed_admin(&db).await?;

        let dispatcher = AuditDispatcher::spawn(db.clone());
        dispatcher.dispatch(entry(account.id, &user));

        // Persistence is asynchronous; poll briefly for the row.
        for _ in 0..100 {
            let rows = audit_log::Entity::find()
                .filter(audit_log::Column::AccountId.eq(account.id))
                .all(&db)
                .await?;
            if let Some(row) = rows.first() {
                assert_eq!(row.author_id, user.id);
                assert_eq!(row.author_name, user.name);
                assert_eq!(row.action_name, "contact_created");
                let objects: serde_json::Value = serde_json::from_str(&row.objects)?;
                assert_eq!(objects, json!({ "contact_name": user.name }));
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("audit entry was never persisted");
    }

    #[tokio::test]
    async fn capture_exposes_entries_without_persisting() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let (account, user) = test_support::seed_admin(&db).await?;

        let (dispatcher, mut rx) = AuditDispatcher::capture();
        dispatcher.dispatch(entry(account.id, &user));

        let received = rx.try_recv().expect("entry should be queued");
        assert_eq!(received.action_name, "contact_created");
        assert_eq!(audit_log::Entity::find().all(&db).await?.len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn dispatch_survives_a_closed_channel() {
        let (dispatcher, rx) = AuditDispatcher::capture();
        drop(rx);
        // Fire-and-forget: no panic, no error surfaced.
        dispatcher.dispatch(AuditEntry {
            account_id: 1,
            author_id: 1,
            author_name: "Regis".into(),
            action_name: "noop".into(),
            objects: json!({}),
        });
    }
}
