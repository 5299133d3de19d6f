//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20220101_000001_create_account;
mod m20220101_000002_create_user;
mod m20220101_000003_create_vault;
mod m20220101_000004_create_vault_user;
mod m20220101_000005_create_contact;
mod m20220101_000006_create_address_type;
mod m20220101_000007_create_address;
mod m20220101_000008_create_relationship_group_type;
mod m20220101_000009_create_relationship_type;
mod m20220101_000010_create_pronoun;
mod m20220101_000011_create_audit_log;
mod m20220101_000012_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_create_account::Migration),
            Box::new(m20220101_000002_create_user::Migration),
            Box::new(m20220101_000003_create_vault::Migration),
            Box::new(m20220101_000004_create_vault_user::Migration),
            Box::new(m20220101_000005_create_contact::Migration),
            Box::new(m20220101_000006_create_address_type::Migration),
            Box::new(m20220101_000007_create_address::Migration),
            Box::new(m20220101_000008_create_relationship_group_type::Migration),
            Box::new(m20220101_000009_create_relationship_type::Migration),
            Box::new(m20220101_000010_create_pronoun::Migration),
            Box::new(m20220101_000011_create_audit_log::Migration),
            // Indexes should always be applied last
            Box::new(m20220101_000012_add_indexes::Migration),
        ]
    }
}
