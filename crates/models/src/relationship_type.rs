use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::relationship_group_type;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationship_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub relationship_group_type_id: i64,
    pub name: String,
    pub name_reverse_relationship: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    GroupType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::GroupType => Entity::belongs_to(relationship_group_type::Entity)
                .from(Column::RelationshipGroupTypeId)
                .to(relationship_group_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    relationship_group_type_id: i64,
    name: &str,
    name_reverse_relationship: Option<&str>,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    let am = ActiveModel {
        id: NotSet,
        relationship_group_type_id: Set(relationship_group_type_id),
        name: Set(name.to_string()),
        name_reverse_relationship: Set(name_reverse_relationship.map(str::to_string)),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
