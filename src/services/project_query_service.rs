use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;

use crate::database::entities::{
    project_media, project_sdgs, projects, sdgs, team_members, teams, users,
};
use crate::errors::{CoreError, CoreResult};
use crate::services::feedback_service::{FeedbackEntry, FeedbackService};
use crate::services::Actor;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDetail {
    pub user_id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Membership label ("leader"/"member"), not the account role.
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<TeamMemberDetail>,
}

/// Full read model for a single project: scalars, derived average rating,
/// SDG links, media, the owning team with its roster, and the feedback
/// visible to the requesting actor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub average_rating: Option<f64>,
    pub sdgs: Vec<sdgs::Model>,
    /// Flat list of attachment URLs in upload order; the stored media kind
    /// stays in the `project_media` rows.
    pub media_urls: Vec<String>,
    pub team: TeamDetail,
    pub feedback: Vec<FeedbackEntry>,
}

/// Listing row: the project plus its derived rating and associations, with
/// the team flattened to name and description.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub average_rating: Option<f64>,
    pub sdgs: Vec<sdgs::Model>,
    pub media_urls: Vec<String>,
    pub team_name: Option<String>,
    pub team_description: Option<String>,
}

/// Read-side assembly of projects. Average ratings are computed on every
/// call from the feedback rows, never stored.
#[derive(Clone)]
pub struct ProjectQueryService {
    db: DatabaseConnection,
    feedback_service: FeedbackService,
}

impl ProjectQueryService {
    pub fn new(db: DatabaseConnection) -> Self {
        let feedback_service = FeedbackService::new(db.clone());
        Self {
            db,
            feedback_service,
        }
    }

    /// Assemble the full detail for one project. A missing project is
    /// `NotFound` regardless of who asks; visibility filtering applies only
    /// to the feedback section.
    pub async fn get_project(&self, actor: &Actor, project_id: i32) -> CoreResult<ProjectDetail> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        let team = teams::Entity::find_by_id(project.team_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "team",
                id: project.team_id,
            })?;

        let members = team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team.id))
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .filter_map(|(m, u)| {
                u.map(|u| TeamMemberDetail {
                    user_id: u.id,
                    username: u.username,
                    first_name: u.first_name,
                    last_name: u.last_name,
                    role: m.role,
                })
            })
            .collect();

        let sdg_list = self.sdgs_for(project.id).await?;
        let media_urls = self.media_urls_for(project.id).await?;
        let average_rating = self.feedback_service.average_rating(project.id).await?;
        let feedback = self
            .feedback_service
            .visible_feedback(actor, project.id)
            .await?;

        Ok(ProjectDetail {
            id: project.id,
            title: project.title,
            description: project.description,
            thumbnail_url: project.thumbnail_url,
            repository_url: project.repository_url,
            demo_url: project.demo_url,
            created_at: project.created_at,
            updated_at: project.updated_at,
            average_rating,
            sdgs: sdg_list,
            media_urls,
            team: TeamDetail {
                id: team.id,
                name: team.name,
                description: team.description,
                members,
            },
            feedback,
        })
    }

    /// All projects, newest first.
    pub async fn list_projects(&self) -> CoreResult<Vec<ProjectSummary>> {
        let rows = projects::Entity::find()
            .find_also_related(teams::Entity)
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.summarize(rows).await
    }

    /// Projects owned by any team the user belongs to, newest first.
    pub async fn list_member_projects(&self, user_id: i32) -> CoreResult<Vec<ProjectSummary>> {
        let team_ids: Vec<i32> = team_members::Entity::find()
            .filter(team_members::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.team_id)
            .collect();

        if team_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = projects::Entity::find()
            .filter(projects::Column::TeamId.is_in(team_ids))
            .find_also_related(teams::Entity)
            .order_by_desc(projects::Column::CreatedAt)
            .all(&self.db)
            .await?;

        self.summarize(rows).await
    }

    async fn summarize(
        &self,
        rows: Vec<(projects::Model, Option<teams::Model>)>,
    ) -> CoreResult<Vec<ProjectSummary>> {
        let mut summaries = Vec::with_capacity(rows.len());

        for (project, team) in rows {
            let sdg_list = self.sdgs_for(project.id).await?;
            let media_urls = self.media_urls_for(project.id).await?;
            let average_rating = self.feedback_service.average_rating(project.id).await?;
            let (team_name, team_description) = match team {
                Some(t) => (Some(t.name), t.description),
                None => (None, None),
            };

            summaries.push(ProjectSummary {
                id: project.id,
                title: project.title,
                description: project.description,
                thumbnail_url: project.thumbnail_url,
                repository_url: project.repository_url,
                demo_url: project.demo_url,
                created_at: project.created_at,
                updated_at: project.updated_at,
                average_rating,
                sdgs: sdg_list,
                media_urls,
                team_name,
                team_description,
            });
        }

        Ok(summaries)
    }

    /// Linked SDGs in goal order.
    async fn sdgs_for(&self, project_id: i32) -> CoreResult<Vec<sdgs::Model>> {
        let sdg_ids: Vec<i32> = project_sdgs::Entity::find()
            .filter(project_sdgs::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|link| link.sdg_id)
            .collect();

        if sdg_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(sdgs::Entity::find()
            .filter(sdgs::Column::Id.is_in(sdg_ids))
            .order_by_asc(sdgs::Column::Number)
            .all(&self.db)
            .await?)
    }

    async fn media_urls_for(&self, project_id: i32) -> CoreResult<Vec<String>> {
        Ok(project_media::Entity::find()
            .filter(project_media::Column::ProjectId.eq(project_id))
            .order_by_asc(project_media::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.media_url)
            .collect())
    }
}
