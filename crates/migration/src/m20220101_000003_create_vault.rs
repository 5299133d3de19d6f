//! Create `vaults` table with FK to `accounts`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vault::Table)
                    .if_not_exists()
                    .col(big_integer(Vault::Id).primary_key().auto_increment())
                    .col(big_integer(Vault::AccountId).not_null())
                    .col(string_len(Vault::Name, 255).not_null())
                    .col(timestamp_with_time_zone(Vault::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vault_account")
                            .from(Vault::Table, Vault::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vault::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vault {
    #[sea_orm(iden = "vaults")]
    Table,
    Id,
    AccountId,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
}
