//! Create `pronouns` table: account-scoped reference data.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pronoun::Table)
                    .if_not_exists()
                    .col(big_integer(Pronoun::Id).primary_key().auto_increment())
                    .col(big_integer(Pronoun::AccountId).not_null())
                    .col(string_len(Pronoun::Name, 255).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pronoun_account")
                            .from(Pronoun::Table, Pronoun::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pronoun::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pronoun {
    #[sea_orm(iden = "pronouns")]
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
