//! Create `addresses` table with FKs to `contacts` and `address_types`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Address::Table)
                    .if_not_exists()
                    .col(big_integer(Address::Id).primary_key().auto_increment())
                    .col(big_integer(Address::ContactId).not_null())
                    .col(big_integer(Address::AddressTypeId).not_null())
                    .col(string_len_null(Address::Street, 255))
                    .col(string_len_null(Address::City, 255))
                    .col(string_len_null(Address::Province, 255))
                    .col(string_len_null(Address::PostalCode, 255))
                    .col(string_len_null(Address::Country, 3))
                    .col(double_null(Address::Latitude))
                    .col(double_null(Address::Longitude))
                    .col(timestamp_with_time_zone(Address::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Address::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_contact")
                            .from(Address::Table, Address::ContactId)
                            .to(Contact::Table, Contact::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_address_addresstype")
                            .from(Address::Table, Address::AddressTypeId)
                            .to(AddressType::Table, AddressType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Address::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Address {
    #[sea_orm(iden = "addresses")]
    Table,
    Id,
    ContactId,
    AddressTypeId,
    Street,
    City,
    Province,
    PostalCode,
    Country,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Contact {
    #[sea_orm(iden = "contacts")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AddressType {
    #[sea_orm(iden = "address_types")]
    Table,
    Id,
}
