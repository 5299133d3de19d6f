//! Manage an account's address types (home, work, and so on).

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use tracing::info;

use models::address_type;

use crate::audit::AuditEntry;
use crate::errors::ServiceError;
use crate::payload::Payload;
use crate::permission::{AUTHOR_MUST_BE_ACCOUNT_ADMINISTRATOR, AUTHOR_MUST_BELONG_TO_ACCOUNT};
use crate::pipeline::{guard, Service, ServiceContext};
use crate::scoped;
use crate::validate::Constraint::*;
use crate::validate::{FieldRules, Store};

const PERMISSIONS: &[&str] = &[AUTHOR_MUST_BELONG_TO_ACCOUNT, AUTHOR_MUST_BE_ACCOUNT_ADMINISTRATOR];

fn base_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("account_id", &[Required, Integer, Exists(Store::Accounts)]),
        FieldRules::new("author_id", &[Required, Integer, Exists(Store::Users)]),
    ]
}

pub struct CreateAddressType;

#[async_trait]
impl Service for CreateAddressType {
    type Output = address_type::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("name", &[Required, Text, MaxLength(255)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<address_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;

        let created = address_type::create(&ctx.db, author.account_id, payload.text("name")?).await?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "address_type_created",
            json!({ "name": created.name }),
        ));
        info!(address_type_id = created.id, account_id = author.account_id, "address type created");
        Ok(created)
    }
}

pub struct UpdateAddressType;

#[async_trait]
impl Service for UpdateAddressType {
    type Output = address_type::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("address_type_id", &[Required, Integer, Exists(Store::AddressTypes)]));
        rules.push(FieldRules::new("name", &[Required, Text, MaxLength(255)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<address_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let kind = scoped::address_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("address_type_id")?,
        )
        .await?;

        let mut am: address_type::ActiveModel = kind.into();
        am.name = Set(payload.text("name")?.to_string());
        let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "address_type_updated",
            json!({ "name": updated.name }),
        ));
        info!(address_type_id = updated.id, account_id = author.account_id, "address type updated");
        Ok(updated)
    }
}

pub struct DestroyAddressType;

#[async_trait]
impl Service for DestroyAddressType {
    type Output = ();

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("address_type_id", &[Required, Integer, Exists(Store::AddressTypes)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(&self, ctx: &ServiceContext, payload: &Payload) -> Result<(), ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let kind = scoped::address_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("address_type_id")?,
        )
        .await?;

        let objects = json!({ "name": kind.name });

        address_type::Entity::delete_by_id(kind.id)
            .exec(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(&author, "address_type_destroyed", objects));
        info!(address_type_id = kind.id, account_id = author.account_id, "address type destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use serde_json::json;

    #[tokio::test]
    async fn it_manages_address_types() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;

        let created = CreateAddressType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "name": "Home",
                }))?,
            )
            .await?;
        assert_eq!(created.account_id, account.id);
        assert_eq!(test_support::expect_single_audit(&mut rx).action_name, "address_type_created");

        let updated = UpdateAddressType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "address_type_id": created.id,
                    "name": "Work",
                }))?,
            )
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Work");
        assert_eq!(test_support::expect_single_audit(&mut rx).action_name, "address_type_updated");

        DestroyAddressType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "address_type_id": created.id,
                }))?,
            )
            .await?;
        assert!(address_type::Entity::find_by_id(created.id).one(&ctx.db).await?.is_none());

        let entry = test_support::expect_single_audit(&mut rx);
        assert_eq!(entry.action_name, "address_type_destroyed");
        assert_eq!(entry.objects, json!({ "name": "Work" }));
        Ok(())
    }

    #[tokio::test]
    async fn it_fails_for_a_type_from_another_account() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;
        let (other, _) = test_support::seed_admin(&ctx.db).await?;
        let foreign = models::address_type::create(&ctx.db, other.id, "Home").await?;

        let err = UpdateAddressType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "address_type_id": foreign.id,
                    "name": "Chalet",
                }))?,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        test_support::expect_no_audit(&mut rx);
        Ok(())
    }

    #[tokio::test]
    async fn it_fails_on_a_missing_name() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;

        let err = CreateAddressType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                }))?,
            )
            .await
            .unwrap_err();
        match err {
            ServiceError::Validation(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "name");
            }
            other => panic!("expected validation error, got {other}"),
        }
        test_support::expect_no_audit(&mut rx);
        Ok(())
    }
}
