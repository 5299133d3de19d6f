//! Create `vault_users` table: per-user permission level inside a vault.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VaultUser::Table)
                    .if_not_exists()
                    .col(big_integer(VaultUser::Id).primary_key().auto_increment())
                    .col(big_integer(VaultUser::VaultId).not_null())
                    .col(big_integer(VaultUser::UserId).not_null())
                    .col(integer(VaultUser::Permission).not_null())
                    .col(timestamp_with_time_zone(VaultUser::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vaultuser_vault")
                            .from(VaultUser::Table, VaultUser::VaultId)
                            .to(Vault::Table, Vault::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vaultuser_user")
                            .from(VaultUser::Table, VaultUser::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(VaultUser::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum VaultUser {
    #[sea_orm(iden = "vault_users")]
    Table,
    Id,
    VaultId,
    UserId,
    Permission,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Vault {
    #[sea_orm(iden = "vaults")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
}
