//! Declarative payload validation: each service lists `FieldRules`, and one
//! engine evaluates them, collecting every violation before failing.

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use models::{
    account, address, address_type, contact, pronoun, relationship_group_type, relationship_type,
    user, vault,
};

use crate::errors::{FieldViolation, ServiceError};
use crate::payload::Payload;

/// Table a foreign id must resolve in. Deliberately unscoped: tenant
/// isolation is enforced by the scoped accessors that run afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Accounts,
    Users,
    Vaults,
    Contacts,
    AddressTypes,
    Addresses,
    RelationshipGroupTypes,
    RelationshipTypes,
    Pronouns,
}

impl Store {
    pub fn table_name(&self) -> &'static str {
        match self {
            Store::Accounts => "accounts",
            Store::Users => "users",
            Store::Vaults => "vaults",
            Store::Contacts => "contacts",
            Store::AddressTypes => "address_types",
            Store::Addresses => "addresses",
            Store::RelationshipGroupTypes => "relationship_group_types",
            Store::RelationshipTypes => "relationship_types",
            Store::Pronouns => "pronouns",
        }
    }

    async fn has_row(&self, db: &DatabaseConnection, id: i64) -> Result<bool, ServiceError> {
        let count = match self {
            Store::Accounts => account::Entity::find_by_id(id).count(db).await,
            Store::Users => user::Entity::find_by_id(id).count(db).await,
            Store::Vaults => vault::Entity::find_by_id(id).count(db).await,
            Store::Contacts => contact::Entity::find_by_id(id).count(db).await,
            Store::AddressTypes => address_type::Entity::find_by_id(id).count(db).await,
            Store::Addresses => address::Entity::find_by_id(id).count(db).await,
            Store::RelationshipGroupTypes => {
                relationship_group_type::Entity::find_by_id(id).count(db).await
            }
            Store::RelationshipTypes => relationship_type::Entity::find_by_id(id).count(db).await,
            Store::Pronouns => pronoun::Entity::find_by_id(id).count(db).await,
        }
        .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(count > 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Required,
    /// Absent or null is fine; remaining constraints apply when present.
    Nullable,
    Integer,
    Numeric,
    Text,
    MaxLength(usize),
    Exists(Store),
}

/// The constraints declared for one payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    pub constraints: &'static [Constraint],
}

impl FieldRules {
    pub const fn new(field: &'static str, constraints: &'static [Constraint]) -> Self {
        Self { field, constraints }
    }
}

/// Evaluate every rule against the payload. Returns `Ok(())` or a
/// `Validation` error listing all violated fields.
pub async fn validate(
    db: &DatabaseConnection,
    payload: &Payload,
    rules: &[FieldRules],
) -> Result<(), ServiceError> {
    let mut violations = Vec::new();

    for rule in rules {
        let value = payload.get(rule.field).filter(|v| !v.is_null());
        let Some(value) = value else {
            if rule.constraints.contains(&Constraint::Required) {
                violations.push(FieldViolation::new(rule.field, "is required"));
            }
            continue;
        };

        for constraint in rule.constraints {
            match constraint {
                Constraint::Required | Constraint::Nullable => {}
                Constraint::Integer => {
                    if value.as_i64().is_none() {
                        violations.push(FieldViolation::new(rule.field, "must be an integer"));
                    }
                }
                Constraint::Numeric => {
                    if !value.is_number() {
                        violations.push(FieldViolation::new(rule.field, "must be a number"));
                    }
                }
                Constraint::Text => {
                    if !value.is_string() {
                        violations.push(FieldViolation::new(rule.field, "must be a string"));
                    }
                }
                Constraint::MaxLength(max) => {
                    if value.as_str().is_some_and(|s| s.chars().count() > *max) {
                        violations.push(FieldViolation::new(
                            rule.field,
                            format!("must be at most {max} characters"),
                        ));
                    }
                }
                Constraint::Exists(store) => {
                    // Non-integer values are reported by the Integer constraint.
                    if let Some(id) = value.as_i64() {
                        if !store.has_row(db, id).await? {
                            violations.push(FieldViolation::new(
                                rule.field,
                                format!("references a missing row in {}", store.table_name()),
                            ));
                        }
                    }
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::Constraint::*;
    use super::*;
    use crate::test_support;
    use serde_json::json;

    fn rules() -> Vec<FieldRules> {
        vec![
            FieldRules::new("account_id", &[Required, Integer, Exists(Store::Accounts)]),
            FieldRules::new("name", &[Required, Text, MaxLength(10)]),
            FieldRules::new("note", &[Nullable, Text]),
        ]
    }

    #[tokio::test]
    async fn collects_every_violation() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let payload = Payload::from_value(json!({ "name": 42 }))?;

        let err = validate(&db, &payload, &rules()).await.unwrap_err();
        match err {
            ServiceError::Validation(violations) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field.as_str()).collect();
                assert_eq!(fields, vec!["account_id", "name"]);
            }
            other => panic!("expected validation error, got {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn exists_check_hits_the_store() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let account = models::account::create(&db).await?;

        let ok = Payload::from_value(json!({ "account_id": account.id, "name": "short" }))?;
        validate(&db, &ok, &rules()).await?;

        let missing = Payload::from_value(json!({ "account_id": account.id + 99, "name": "short" }))?;
        let err = validate(&db, &missing, &rules()).await.unwrap_err();
        assert!(err.to_string().contains("missing row in accounts"));
        Ok(())
    }

    #[tokio::test]
    async fn nullable_fields_may_be_absent_or_null() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let account = models::account::create(&db).await?;

        let payload = Payload::from_value(json!({
            "account_id": account.id,
            "name": "ok",
            "note": null,
        }))?;
        validate(&db, &payload, &rules()).await?;

        let bad = Payload::from_value(json!({
            "account_id": account.id,
            "name": "ok",
            "note": 7,
        }))?;
        assert!(validate(&db, &bad, &rules()).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn max_length_counts_characters() -> Result<(), anyhow::Error> {
        let db = test_support::get_db().await?;
        let account = models::account::create(&db).await?;

        let payload = Payload::from_value(json!({
            "account_id": account.id,
            "name": "well over ten characters",
        }))?;
        let err = validate(&db, &payload, &rules()).await.unwrap_err();
        assert!(err.to_string().contains("at most 10 characters"));
        Ok(())
    }
}
