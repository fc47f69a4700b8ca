use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One of the 17 Sustainable Development Goals. Seeded by migration and
/// treated as read-only reference data by the engine.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sdgs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub number: i32,
    pub name: String,
    pub description: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::project_sdgs::Entity")]
    ProjectSdgs,
}

impl Related<super::project_sdgs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectSdgs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
