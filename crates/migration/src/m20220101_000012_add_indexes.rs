use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Users: index on account_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_account")
                    .table(User::Table)
                    .col(User::AccountId)
                    .to_owned(),
            )
            .await?;

        // VaultUser: one permission row per (vault, user)
        manager
            .create_index(
                Index::create()
                    .name("uniq_vaultuser_vault_user")
                    .table(VaultUser::Table)
                    .col(VaultUser::VaultId)
                    .col(VaultUser::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Contacts: index on vault_id
        manager
            .create_index(
                Index::create()
                    .name("idx_contact_vault")
                    .table(Contact::Table)
                    .col(Contact::VaultId)
                    .to_owned(),
            )
            .await?;

        // Addresses: index on contact_id
        manager
            .create_index(
                Index::create()
                    .name("idx_address_contact")
                    .table(Address::Table)
                    .col(Address::ContactId)
                    .to_owned(),
            )
            .await?;

        // AuditLog: index on account_id and created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_auditlog_account")
                    .table(AuditLog::Table)
                    .col(AuditLog::AccountId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_auditlog_created")
                    .table(AuditLog::Table)
                    .col(AuditLog::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_user_account").table(User::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_vaultuser_vault_user").table(VaultUser::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contact_vault").table(Contact::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_address_contact").table(Address::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_auditlog_account").table(AuditLog::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_auditlog_created").table(AuditLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    AccountId,
}

#[derive(DeriveIden)]
enum VaultUser {
    #[sea_orm(iden = "vault_users")]
    Table,
    VaultId,
    UserId,
}

#[derive(DeriveIden)]
enum Contact {
    #[sea_orm(iden = "contacts")]
    Table,
    VaultId,
}

#[derive(DeriveIden)]
enum Address {
    #[sea_orm(iden = "addresses")]
    Table,
    ContactId,
}

#[derive(DeriveIden)]
enum AuditLog {
    #[sea_orm(iden = "audit_logs")]
    Table,
    AccountId,
    CreatedAt,
}
