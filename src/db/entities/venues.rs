use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::db::genres::Genres;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub website: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub genres: Genres,
    pub seeking_talent: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub seeking_description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::shows::Entity")]
    Shows,
}

impl Related<super::shows::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shows.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
