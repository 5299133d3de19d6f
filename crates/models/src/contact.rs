use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::vault;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub vault_id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Display name used in audit payloads.
    pub fn name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vault,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vault => Entity::belongs_to(vault::Entity)
                .from(Column::VaultId)
                .to(vault::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    vault_id: i64,
    first_name: &str,
    last_name: Option<&str>,
) -> Result<Model, errors::ModelError> {
    if first_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("first_name required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        vault_id: Set(vault_id),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.map(str::to_string)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn name_joins_first_and_last() {
        let now = Utc::now().into();
        let c = Model {
            id: 1,
            vault_id: 1,
            first_name: "Ross".into(),
            last_name: Some("Geller".into()),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(c.name(), "Ross Geller");

        let solo = Model { last_name: None, ..c };
        assert_eq!(solo.name(), "Ross");
    }
}
