use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    pub team_id: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Teams,
    #[sea_orm(has_many = "super::project_sdgs::Entity")]
    ProjectSdgs,
    #[sea_orm(has_many = "super::project_media::Entity")]
    ProjectMedia,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::project_sdgs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectSdgs.def()
    }
}

impl Related<super::project_media::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProjectMedia.def()
    }
}

impl Related<super::feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ActiveValue::NotSet,
            title: ActiveValue::NotSet,
            description: ActiveValue::NotSet,
            thumbnail_url: ActiveValue::NotSet,
            repository_url: ActiveValue::NotSet,
            demo_url: ActiveValue::NotSet,
            team_id: ActiveValue::NotSet,
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    pub fn set_updated_at(mut self) -> Self {
        self.updated_at = Set(chrono::Utc::now());
        self
    }
}
