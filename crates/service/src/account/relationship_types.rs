//! Manage the relationship types under an account's taxonomy groups.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde_json::json;
use tracing::info;

use models::relationship_type;

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
        FieldRules::new(
            "relationship_group_type_id",
            &[Required, Integer, Exists(Store::RelationshipGroupTypes)],
        ),
    ]
}

pub struct CreateRelationshipType;

#[async_trait]
impl Service for CreateRelationshipType {
    type Output = relationship_type::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("name", &[Required, Text, MaxLength(255)]));
        rules.push(FieldRules::new("name_reverse_relationship", &[Nullable, Text, MaxLength(255)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<relationship_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let group = scoped::relationship_group_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("relationship_group_type_id")?,
        )
        .await?;

        let created = relationship_type::create(
            &ctx.db,
            group.id,
            payload.text("name")?,
            payload.opt_text("name_reverse_relationship"),
        )
        .await?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "relationship_type_created",
            json!({ "name": created.name, "group_type_name": group.name }),
        ));
        info!(relationship_type_id = created.id, account_id = author.account_id, "relationship type created");
        Ok(created)
    }
}

pub struct UpdateRelationshipType;

#[async_trait]
impl Service for UpdateRelationshipType {
    type Output = relationship_type::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new(
            "relationship_type_id",
            &[Required, Integer, Exists(Store::RelationshipTypes)],
        ));
        rules.push(FieldRules::new("name", &[Required, Text, MaxLength(255)]));
        rules.push(FieldRules::new("name_reverse_relationship", &[Nullable, Text, MaxLength(255)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<relationship_type::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let group = scoped::relationship_group_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("relationship_group_type_id")?,
        )
        .await?;
        let kind = scoped::relationship_type_in_group(
            &ctx.db,
            group.id,
            payload.id("relationship_type_id")?,
        )
        .await?;

        let mut am: relationship_type::ActiveModel = kind.into();
        am.name = Set(payload.text("name")?.to_string());
        am.name_reverse_relationship =
            Set(payload.opt_text("name_reverse_relationship").map(str::to_string));
        let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "relationship_type_updated",
            json!({ "name": updated.name, "group_type_name": group.name }),
        ));
        info!(relationship_type_id = updated.id, account_id = author.account_id, "relationship type updated");
        Ok(updated)
    }
}

pub struct DestroyRelationshipType;

#[async_trait]
impl Service for DestroyRelationshipType {
    type Output = ();

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new(
            "relationship_type_id",
            &[Required, Integer, Exists(Store::RelationshipTypes)],
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
        let kind = scoped::relationship_type_in_group(
            &ctx.db,
            group.id,
            payload.id("relationship_type_id")?,
        )
        .await?;

        // Snapshot before the row goes away; the audit payload needs it.
        let objects = json!({ "name": kind.name, "group_type_name": group.name });

        relationship_type::Entity::delete_by_id(kind.id)
            .exec(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(&author, "relationship_type_destroyed", objects));
        info!(relationship_type_id = kind.id, account_id = author.account_id, "relationship type destroyed");
        Ok(())
    }
}
