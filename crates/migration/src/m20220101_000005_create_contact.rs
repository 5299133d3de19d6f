//! Create `contacts` table with FK to `vaults`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(big_integer(Contact::Id).primary_key().auto_increment())
                    .col(big_integer(Contact::VaultId).not_null())
                    .col(string_len(Contact::FirstName, 255).not_null())
                    .col(string_len_null(Contact::LastName, 255))
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Contact::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contact_vault")
                            .from(Contact::Table, Contact::VaultId)
                            .to(Vault::Table, Vault::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact {
    #[sea_orm(iden = "contacts")]
    Table,
    Id,
    VaultId,
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vault {
    #[sea_orm(iden = "vaults")]
    Table,
    Id,
}
