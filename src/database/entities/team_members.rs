use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};

/// Membership row linking a user to a team. (team_id, user_id) is unique;
/// the `role` label ("leader"/"member") is informational only and grants no
/// extra permissions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub team_id: i32,
    pub user_id: i32,
    pub role: String,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id"
    )]
    Teams,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub const ROLE_LEADER: &str = "leader";
pub const ROLE_MEMBER: &str = "member";

impl ActiveModel {
    pub fn new(team_id: i32, user_id: i32, role: &str) -> Self {
        Self {
            id: ActiveValue::NotSet,
            team_id: Set(team_id),
            user_id: Set(user_id),
            role: Set(role.to_string()),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
