//! Manage an account's pronouns reference data.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use tracing::info;

use models::pronoun;

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

pub struct CreatePronoun;

#[async_trait]
impl Service for CreatePronoun {
    type Output = pronoun::Model;

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
    ) -> Result<pronoun::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;

        let created = pronoun::create(&ctx.db, author.account_id, payload.text("name")?).await?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "pronoun_created",
            json!({ "name": created.name }),
        ));
        info!(pronoun_id = created.id, account_id = author.account_id, "pronoun created");
        Ok(created)
    }
}

pub struct UpdatePronoun;

#[async_trait]
impl Service for UpdatePronoun {
    type Output = pronoun::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("pronoun_id", &[Required, Integer, Exists(Store::Pronouns)]));
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
    ) -> Result<pronoun::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let row = scoped::pronoun_in_account(&ctx.db, author.account_id, payload.id("pronoun_id")?).await?;

        let mut am: pronoun::ActiveModel = row.into();
        am.name = Set(payload.text("name")?.to_string());
        let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "pronoun_updated",
            json!({ "name": updated.name }),
        ));
        info!(pronoun_id = updated.id, account_id = author.account_id, "pronoun updated");
        Ok(updated)
    }
}

pub struct DestroyPronoun;

#[async_trait]
impl Service for DestroyPronoun {
    type Output = ();

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("pronoun_id", &[Required, Integer, Exists(Store::Pronouns)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(&self, ctx: &ServiceContext, payload: &Payload) -> Result<(), ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let row = scoped::pronoun_in_account(&ctx.db, author.account_id, payload.id("pronoun_id")?).await?;

        let objects = json!({ "name": row.name });

        pronoun::Entity::delete_by_id(row.id)
            .exec(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(&author, "pronoun_destroyed", objects));
        info!(pronoun_id = row.id, account_id = author.account_id, "pronoun destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;
    use serde_json::json;

    #[tokio::test]
    async fn it_manages_pronouns() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;

        let created = CreatePronoun
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "name": "she/her",
                }))?,
            )
            .await?;
        assert_eq!(created.name, "she/her");
        assert_eq!(test_support::expect_single_audit(&mut rx).action_name, "pronoun_created");

        let updated = UpdatePronoun
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "pronoun_id": created.id,
                    "name": "they/them",
                }))?,
            )
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "they/them");
        assert_eq!(test_support::expect_single_audit(&mut rx).action_name, "pronoun_updated");

        DestroyPronoun
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "pronoun_id": created.id,
                }))?,
            )
            .await?;
        assert!(pronoun::Entity::find_by_id(created.id).one(&ctx.db).await?.is_none());

        let entry = test_support::expect_single_audit(&mut rx);
        assert_eq!(entry.action_name, "pronoun_destroyed");
        assert_eq!(entry.objects, json!({ "name": "they/them" }));
        Ok(())
    }

    #[tokio::test]
    async fn it_fails_for_a_pronoun_from_another_account() -> Result<(), anyhow::Error> {
        let (ctx, mut rx) = test_support::get_context().await?;
        let (account, regis) = test_support::seed_admin(&ctx.db).await?;
        let (other, _) = test_support::seed_admin(&ctx.db).await?;
        let foreign = models::pronoun::create(&ctx.db, other.id, "he/him").await?;

        let err = DestroyPronoun
            .execute(
                &ctx,
                &Payload::from_value(json!({
                    "account_id": account.id,
                    "author_id": regis.id,
                    "pronoun_id": foreign.id,
                }))?,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(pronoun::Entity::find_by_id(foreign.id).one(&ctx.db).await?.is_some());
        test_support::expect_no_audit(&mut rx);
        Ok(())
    }
}
