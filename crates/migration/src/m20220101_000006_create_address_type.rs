//! Create `address_types` table: account-scoped reference data.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AddressType::Table)
                    .if_not_exists()
                    .col(big_integer(AddressType::Id).primary_key().auto_increment())
                    .col(big_integer(AddressType::AccountId).not_null())
                    .col(string_len(AddressType::Name, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresstype_account")
                            .from(AddressType::Table, AddressType::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(AddressType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum AddressType {
    #[sea_orm(iden = "address_types")]
    Table,
    Id,
    AccountId,
    Name,
}

#[derive(DeriveIden)]
enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
}
