use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

/// Many-to-many join between projects and SDGs. (project_id, sdg_id) is
/// unique; rows cascade with either parent.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project_sdgs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: i32,
    pub sdg_id: i32,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Projects,
    #[sea_orm(
        belongs_to = "super::sdgs::Entity",
        from = "Column::SdgId",
        to = "super::sdgs::Column::Id"
    )]
    Sdgs,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::sdgs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sdgs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(project_id: i32, sdg_id: i32) -> Self {
        Self {
            id: ActiveValue::NotSet,
            project_id: Set(project_id),
            sdg_id: Set(sdg_id),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
