use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{address_type, contact};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub contact_id: i64,
    pub address_type_id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Contact,
    AddressType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Contact => Entity::belongs_to(contact::Entity)
                .from(Column::ContactId)
                .to(contact::Column::Id)
                .into(),
            Relation::AddressType => Entity::belongs_to(address_type::Entity)
                .from(Column::AddressTypeId)
                .to(address_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
