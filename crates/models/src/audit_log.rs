use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::account;
use crate::errors;

/// Append-only trace of account activity. Rows are created by the audit
/// worker and never updated or deleted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub author_id: i64,
    pub author_name: String,
    pub action_name: String,
    /// JSON snapshot of what changed, specific to the action.
    pub objects: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Account,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Account => Entity::belongs_to(account::Entity)
                .from(Column::AccountId)
                .to(account::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    account_id: i64,
    author_id: i64,
    author_name: &str,
    action_name: &str,
    objects: &str,
) -> Result<Model, errors::ModelError> {
    if action_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("action_name required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        account_id: Set(account_id),
        author_id: Set(author_id),
        author_name: Set(author_name.to_string()),
        action_name: Set(action_name.to_string()),
        objects: Set(objects.to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
