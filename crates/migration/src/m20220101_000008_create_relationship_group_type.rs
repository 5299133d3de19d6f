//! Create `relationship_group_types` table: account-scoped taxonomy roots.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RelationshipGroupType::Table)
                    .if_not_exists()
                    .col(big_integer(RelationshipGroupType::Id).primary_key().auto_increment())
                    .col(big_integer(RelationshipGroupType::AccountId).not_null())
                    .col(string_len(RelationshipGroupType::Name, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relgrouptype_account")
                            .from(RelationshipGroupType::Table, RelationshipGroupType::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RelationshipGroupType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RelationshipGroupType {
    #[sea_orm(iden = "relationship_group_types")]
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
