//! Create `audit_logs` table.
//!
//! Append-only; `author_id` deliberately carries no FK so the trail outlives
//! user deletion, with `author_name` denormalized for display.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLog::Table)
                    .if_not_exists()
                    .col(big_integer(AuditLog::Id).primary_key().auto_increment())
                    .col(big_integer(AuditLog::AccountId).not_null())
                    .col(big_integer(AuditLog::AuthorId).not_null())
                    .col(string_len(AuditLog::AuthorName, 255).not_null())
                    .col(string_len(AuditLog::ActionName, 255).not_null())
                    .col(text(AuditLog::Objects).not_null())
                    .col(timestamp_with_time_zone(AuditLog::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auditlog_account")
                            .from(AuditLog::Table, AuditLog::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AuditLog::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AuditLog {
    #[sea_orm(iden = "audit_logs")]
    Table,
    Id,
    AccountId,
    AuthorId,
    AuthorName,
    ActionName,
    Objects,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
}
