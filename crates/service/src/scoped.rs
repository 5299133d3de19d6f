//! Parent-scoped entity lookups. Every cross-entity fetch names its parent
//! explicitly; a row that exists under a different parent is simply not
//! found, so tenant isolation holds at the data-access boundary.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use models::{
    address, address_type, contact, pronoun, relationship_group_type, relationship_type, user,
    vault, vault_user,
};

use crate::errors::ServiceError;

pub async fn user_in_account(
    db: &DatabaseConnection,
    account_id: i64,
    user_id: i64,
) -> Result<user::Model, ServiceError> {
    user::Entity::find_by_id(user_id)
        .filter(user::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("user"))
}

pub async fn vault_in_account(
    db: &DatabaseConnection,
    account_id: i64,
    vault_id: i64,
) -> Result<vault::Model, ServiceError> {
    vault::Entity::find_by_id(vault_id)
        .filter(vault::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vault"))
}

pub async fn contact_in_vault(
    db: &DatabaseConnection,
    vault_id: i64,
    contact_id: i64,
) -> Result<contact::Model, ServiceError> {
    contact::Entity::find_by_id(contact_id)
        .filter(contact::Column::VaultId.eq(vault_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("contact"))
}

pub async fn address_type_in_account(
    db: &DatabaseConnection,
    account_id: i64,
    address_type_id: i64,
) -> Result<address_type::Model, ServiceError> {
    address_type::Entity::find_by_id(address_type_id)
        .filter(address_type::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("address type"))
}

pub async fn address_for_contact(
    db: &DatabaseConnection,
    contact_id: i64,
    address_id: i64,
) -> Result<address::Model, ServiceError> {
    address::Entity::find_by_id(address_id)
        .filter(address::Column::ContactId.eq(contact_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("address"))
}

pub async fn relationship_group_type_in_account(
    db: &DatabaseConnection,
    account_id: i64,
    group_type_id: i64,
) -> Result<relationship_group_type::Model, ServiceError> {
    relationship_group_type::Entity::find_by_id(group_type_id)
        .filter(relationship_group_type::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("relationship group type"))
}

pub async fn relationship_type_in_group(
    db: &DatabaseConnection,
    group_type_id: i64,
    relationship_type_id: i64,
) -> Result<relationship_type::Model, ServiceError> {
    relationship_type::Entity::find_by_id(relationship_type_id)
        .filter(relationship_type::Column::RelationshipGroupTypeId.eq(group_type_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("relationship type"))
}

pub async fn pronoun_in_account(
    db: &DatabaseConnection,
    account_id: i64,
    pronoun_id: i64,
) -> Result<pronoun::Model, ServiceError> {
    pronoun::Entity::find_by_id(pronoun_id)
        .filter(pronoun::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("pronoun"))
}

/// The author's permission row in a vault, if any.
pub async fn vault_permission(
    db: &DatabaseConnection,
    vault_id: i64,
    user_id: i64,
) -> Result<Option<i32>, ServiceError> {
    Ok(vault_user::Entity::find()
        .filter(vault_user::Column::VaultId.eq(vault_id))
        .filter(vault_user::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .map(|row| row.permission))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[tokio::test]
    async fn scoped_fetch_rejects_foreign_parents() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let (account, _user) = test_support::seed_admin(&db).await?;
        let other = models::account::create(&db).await?;

        let group = models::relationship_group_type::create(&db, account.id, "Family").await?;

        // Right parent resolves, wrong parent is NotFound.
        assert!(relationship_group_type_in_account(&db, account.id, group.id).await.is_ok());
        let err = relationship_group_type_in_account(&db, other.id, group.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn vault_permission_is_optional() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let (account, user) = test_support::seed_admin(&db).await?;
        let vault = models::vault::create(&db, account.id, "Family").await?;

        assert_eq!(vault_permission(&db, vault.id, user.id).await?, None);

        models::vault_user::grant(&db, vault.id, user.id, models::vault_user::PERMISSION_VIEW).await?;
        assert_eq!(
            vault_permission(&db, vault.id, user.id).await?,
            Some(models::vault_user::PERMISSION_VIEW)
        );
        Ok(())
    }
}
