//! Create `relationship_types` table with FK to `relationship_group_types`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RelationshipType::Table)
                    .if_not_exists()
                    .col(big_integer(RelationshipType::Id).primary_key().auto_increment())
                    .col(big_integer(RelationshipType::RelationshipGroupTypeId).not_null())
                    .col(string_len(RelationshipType::Name, 255).not_null())
                    .col(string_len_null(RelationshipType::NameReverseRelationship, 255))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reltype_relgrouptype")
                            .from(RelationshipType::Table, RelationshipType::RelationshipGroupTypeId)
                            .to(RelationshipGroupType::Table, RelationshipGroupType::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(RelationshipType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum RelationshipType {
    #[sea_orm(iden = "relationship_types")]
    Table,
    Id,
    RelationshipGroupTypeId,
    Name,
    NameReverseRelationship,
}

#[derive(DeriveIden)]
enum RelationshipGroupType {
    #[sea_orm(iden = "relationship_group_types")]
    Table,
    Id,
}
