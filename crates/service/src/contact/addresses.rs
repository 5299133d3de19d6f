//! Manage a contact's postal addresses. The contact is fetched scoped to the
//! vault, the vault to the account, the address type to the account, and the
//! address to the contact.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, NotSet, Set};
use serde_json::json;
use tracing::info;

use models::address;

use crate::audit::AuditEntry;
use crate::errors::ServiceError;
use crate::payload::Payload;
use crate::permission::{AUTHOR_MUST_BELONG_TO_ACCOUNT, AUTHOR_MUST_HAVE_VAULT_EDIT_ACCESS};
use crate::pipeline::{guard, Service, ServiceContext};
use crate::scoped;
use crate::validate::Constraint::*;
use crate::validate::{FieldRules, Store};

const PERMISSIONS: &[&str] = &[AUTHOR_MUST_BELONG_TO_ACCOUNT, AUTHOR_MUST_HAVE_VAULT_EDIT_ACCESS];

fn base_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("account_id", &[Required, Integer, Exists(Store::Accounts)]),
        FieldRules::new("vault_id", &[Required, Integer, Exists(Store::Vaults)]),
        FieldRules::new("author_id", &[Required, Integer, Exists(Store::Users)]),
        FieldRules::new("contact_id", &[Required, Integer, Exists(Store::Contacts)]),
    ]
}

fn field_rules() -> Vec<FieldRules> {
    vec![
        FieldRules::new("street", &[Nullable, Text, MaxLength(255)]),
        FieldRules::new("city", &[Nullable, Text, MaxLength(255)]),
        FieldRules::new("province", &[Nullable, Text, MaxLength(255)]),
        FieldRules::new("postal_code", &[Nullable, Text, MaxLength(255)]),
        FieldRules::new("country", &[Nullable, Text, MaxLength(3)]),
        FieldRules::new("latitude", &[Nullable, Numeric]),
        FieldRules::new("longitude", &[Nullable, Numeric]),
    ]
}

fn apply_fields(am: &mut address::ActiveModel, payload: &Payload) {
    am.street = Set(payload.opt_text("street").map(str::to_string));
    am.city = Set(payload.opt_text("city").map(str::to_string));
    am.province = Set(payload.opt_text("province").map(str::to_string));
    am.postal_code = Set(payload.opt_text("postal_code").map(str::to_string));
    am.country = Set(payload.opt_text("country").map(str::to_string));
    am.latitude = Set(payload.opt_f64("latitude"));
    am.longitude = Set(payload.opt_f64("longitude"));
}

pub struct CreateContactAddress;

#[async_trait]
impl Service for CreateContactAddress {
    type Output = address::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("address_type_id", &[Required, Integer, Exists(Store::AddressTypes)]));
        rules.extend(field_rules());
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<address::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let contact =
            scoped::contact_in_vault(&ctx.db, payload.id("vault_id")?, payload.id("contact_id")?).await?;
        let kind = scoped::address_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("address_type_id")?,
        )
        .await?;

        let now = Utc::now().into();
        let mut am = address::ActiveModel {
            id: NotSet,
            contact_id: Set(contact.id),
            address_type_id: Set(kind.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_fields(&mut am, payload);
        let created = am.insert(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "contact_address_created",
            json!({ "contact_name": contact.name(), "address_type_name": kind.name }),
        ));
        info!(address_id = created.id, contact_id = contact.id, "contact address created");
        Ok(created)
    }
}

pub struct UpdateContactAddress;

#[async_trait]
impl Service for UpdateContactAddress {
    type Output = address::Model;

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("address_type_id", &[Required, Integer, Exists(Store::AddressTypes)]));
        rules.push(FieldRules::new("address_id", &[Required, Integer, Exists(Store::Addresses)]));
        rules.extend(field_rules());
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(
        &self,
        ctx: &ServiceContext,
        payload: &Payload,
    ) -> Result<address::Model, ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let contact =
            scoped::contact_in_vault(&ctx.db, payload.id("vault_id")?, payload.id("contact_id")?).await?;
        let kind = scoped::address_type_in_account(
            &ctx.db,
            author.account_id,
            payload.id("address_type_id")?,
        )
        .await?;
        let found = scoped::address_for_contact(&ctx.db, contact.id, payload.id("address_id")?).await?;

        let mut am: address::ActiveModel = found.into();
        am.address_type_id = Set(kind.id);
        am.updated_at = Set(Utc::now().into());
        apply_fields(&mut am, payload);
        let updated = am.update(&ctx.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(
            &author,
            "contact_address_updated",
            json!({ "contact_name": contact.name(), "address_type_name": kind.name }),
        ));
        info!(address_id = updated.id, contact_id = contact.id, "contact address updated");
        Ok(updated)
    }
}

pub struct DestroyContactAddress;

#[async_trait]
impl Service for DestroyContactAddress {
    type Output = ();

    fn rules(&self) -> Vec<FieldRules> {
        let mut rules = base_rules();
        rules.push(FieldRules::new("address_id", &[Required, Integer, Exists(Store::Addresses)]));
        rules
    }

    fn permissions(&self) -> &'static [&'static str] {
        PERMISSIONS
    }

    async fn execute(&self, ctx: &ServiceContext, payload: &Payload) -> Result<(), ServiceError> {
        let author = guard(ctx, payload, &self.rules(), self.permissions()).await?;
        let contact =
            scoped::contact_in_vault(&ctx.db, payload.id("vault_id")?, payload.id("contact_id")?).await?;
        let found = scoped::address_for_contact(&ctx.db, contact.id, payload.id("address_id")?).await?;
        let kind =
            scoped::address_type_in_account(&ctx.db, author.account_id, found.address_type_id).await?;

        let objects = json!({ "contact_name": contact.name(), "address_type_name": kind.name });

        address::Entity::delete_by_id(found.id)
            .exec(&ctx.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        ctx.audit.dispatch(AuditEntry::for_author(&author, "contact_address_destroyed", objects));
        info!(address_id = found.id, contact_id = contact.id, "contact address destroyed");
        Ok(())
    }
}
