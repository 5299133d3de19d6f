//! Manage an account's relationship group types, the roots of its
//! relationship taxonomy. Destroying a group cascades to its types.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use tracing::info;

use models::relationship_group_type;

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

pub struct CreateRelationshipGroupType;

#[async_trait]
impl Service for CreateRelationshipGroupType {
    type Output = relationship_group_type::Model;

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
    ) -> Result<relationship_group_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;

        let created =
            relationship_group_type::create(&ctx.db, author.account_id, payload.text("name")?).await?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "relationship_group_type_created",
            json!({ "name": created.name }),
        ));
        info!(relationship_group_type_id = created.id, account_id = author.account_id, "relationship group type created");
        Ok(created)
    }
}

pub struct UpdateRelationshipGroupType;

#[async_trait]
impl Service for UpdateRelationshipGroupType {
    type Output = relationship_group_type::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new(
            "relationship_group_type_id",
            &[Required, Integer, Exists(Store::RelationshipGroupTypes)],
        ));
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
    ) -> Result<relationship_group_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let group = scoped::relationship_group_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("relationship_group_type_id")?,
        )
        .await?;

        let mut am: relationship_group_type::ActiveModel = group.into();
        am.name = Set(payload.text("name")?.to_string());
        let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "relationship_group_type_updated",
            json!({ "name": updated.name }),
        ));
        info!(relationship_group_type_id = updated.id, account_id = author.account_id, "relationship group type updated");
        Ok(updated)
    }
}

pub struct DestroyRelationshipGroupType;

#[async_trait]
impl Service for DestroyRelationshipGroupType {
    type Output = ();

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new(
            "relationship_group_type_id",
            &[Required, Integer, Exists(Store::RelationshipGroupTypes)],
        ));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(&self, ctx: &ServiceContext, payload: &Payload) -> Result<(), ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let group = scoped::relationship_group_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("relationship_group_type_id")?,
        )
        .await?;

        let objects = json!({ "name": group.name });

        relationship_group_type::Entity::delete_by_id(group.id)
            .exec(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "relationship_group_type_destroyed",
            objects,
        ));
        info!(relationship_group_type_id = group.id, account_id = author.account_id, "relationship group type destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use serde_json::json;

    #[tokio::test]
    async fn it_creates_updates_and_destroys_a_group_type() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;

        let created = CreateRelationshipGroupType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "name": "Family",
                }))?,
            )
            .await?;
        assert_eq!(created.name, "Family");
        assert_eq!(
            test_support::expect_single_audit(&mut rx).action_name,
            "relationship_group_type_created"
        );

        let updated = UpdateRelationshipGroupType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "relationship_group_type_id": created.id,
                    "name": "Love",
                }))?,
            )
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Love");
        assert_eq!(
            test_support::expect_single_audit(&mut rx).action_name,
            "relationship_group_type_updated"
        );

        DestroyRelationshipGroupType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "relationship_group_type_id": created.id,
                }))?,
            )
            .await?;
        assert!(relationship_group_type::Entity::find_by_id(created.id).one(&ctx.db).await?.is_none());

        let entry = test_support::expect_single_audit(&mut rx);
        assert_eq!(entry.action_name, "relationship_group_type_destroyed");
        assert_eq!(entry.objects, json!({ "name": "Love" }));
        Ok(())
    }

    #[tokio::test]
    async fn it_fails_for_a_group_from_another_account() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;
        let (other, _) = test_support::seed_admin(&ctx.db).await?;
        let foreign = models::relationship_group_type::create(&ctx.db, other.id, "Family").await?;

        let err = DestroyRelationshipGroupType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "relationship_group_type_id": foreign.id,
                }))?,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(relationship_group_type::Entity::find_by_id(foreign.id).one(&ctx.db).await?.is_some());
        test_support::expect_no_audit(&mut rx);
        Ok(())
    }

    #[tokio::test]
    async fn it_fails_if_author_is_not_an_administrator() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, _) = test_support::seed_admin(&ctx.db).await?;
        let member = test_support::seed_member(&ctx.db, account.id, "Monica").await?;

        let err = CreateRelationshipGroupType
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": member.id,
                    "name": "Family",
                }))?,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Permission(_)));
        test_support::expect_no_audit(&mut rx);
        Ok(())
    }
}
