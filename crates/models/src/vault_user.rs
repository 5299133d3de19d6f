use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{user, vault};

/// Permission levels in a vault; lower values grant more.
pub const PERMISSION_MANAGE: i32 = 100;
pub const PERMISSION_EDIT: i32 = 200;
pub const PERMISSION_VIEW: i32 = 300;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vault_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub vault_id: i64,
    pub user_id: i64,
    pub permission: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vault,
    User,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vault => Entity::belongs_to(vault::Entity)
                .from(Column::VaultId)
                .to(vault::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_permission(permission: i32) -> Result<(), errors::ModelError> {
    match permission {
        PERMISSION_MANAGE | PERMISSION_EDIT | PERMISSION_VIEW => Ok(()),
        other => Err(errors::ModelError::Validation(format!("unknown vault permission {other}"))),
    }
}

pub async fn grant(
    db: &DatabaseConnection,
    vault_id: i64,
    user_id: i64,
    permission: i32,
) -> Result<Model, errors::ModelError> {
    validate_permission(permission)?;
    let am = ActiveModel {
        id: NotSet,
        vault_id: Set(vault_id),
        user_id: Set(user_id),
        permission: Set(permission),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
