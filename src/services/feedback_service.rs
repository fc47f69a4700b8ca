use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::entities::users::UserRole;
use crate::database::entities::{feedback, projects, team_members, users};
use crate::errors::{map_db_err, CoreError, CoreResult};
use crate::services::{Actor, AuthorizationService, ProjectAction, ValidationService};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub content: String,
    pub rating: i32,
    #[serde(default)]
    pub is_private: bool,
}

/// Author attribution carried alongside a feedback row.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackAuthor {
    pub id: i32,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: i32,
    pub project_id: i32,
    pub content: String,
    pub rating: i32,
    pub is_private: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub author: Option<FeedbackAuthor>,
}

impl FeedbackEntry {
    fn from_row(row: feedback::Model, author: Option<users::Model>) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            content: row.content,
            rating: row.rating,
            is_private: row.is_private,
            created_at: row.created_at,
            author: author.map(|u| FeedbackAuthor {
                id: u.id,
                username: u.username,
                first_name: u.first_name,
                last_name: u.last_name,
                role: u.role,
            }),
        }
    }
}

/// Cross-project feedback row carrying project attribution, for the
/// dashboard listings that cut across a user's projects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWithProject {
    pub id: i32,
    pub content: String,
    pub rating: i32,
    pub is_private: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Reviewer username. Omitted in the authored listing, where the caller
    /// is the author.
    pub author_name: Option<String>,
    pub project_id: i32,
    pub project_title: String,
    pub project_thumbnail_url: String,
}

/// Feedback is append-only: rows are created and read, never edited.
/// Ratings feed the derived project average; private rows count toward the
/// average even for callers who cannot see them.
#[derive(Clone)]
pub struct FeedbackService {
    db: DatabaseConnection,
    auth_service: AuthorizationService,
}

impl FeedbackService {
    pub fn new(db: DatabaseConnection) -> Self {
        let auth_service = AuthorizationService::new(db.clone());
        Self { db, auth_service }
    }

    /// Attach a feedback row to a project. Reviewer roles only.
    pub async fn create_feedback(
        &self,
        actor: &Actor,
        project_id: i32,
        new: NewFeedback,
    ) -> CoreResult<FeedbackEntry> {
        self.auth_service
            .require_role(actor, ProjectAction::CreateFeedback)?;

        let content = ValidationService::validate_feedback_content(&new.content)?;
        let rating = ValidationService::validate_rating(new.rating)?;

        projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        let row =
            feedback::ActiveModel::new(project_id, actor.user_id, content, rating, new.is_private)
                .insert(&self.db)
                .await
                .map_err(|e| map_db_err("create feedback", e))?;

        info!(
            feedback_id = row.id,
            project_id,
            user_id = actor.user_id,
            private = row.is_private,
            "feedback created"
        );

        let author = users::Entity::find_by_id(actor.user_id).one(&self.db).await?;

        Ok(FeedbackEntry::from_row(row, author))
    }

    /// Feedback on a project filtered to what the actor may see: reviewers
    /// get every row, everyone else gets public rows plus their own.
    /// Newest first.
    pub async fn visible_feedback(
        &self,
        actor: &Actor,
        project_id: i32,
    ) -> CoreResult<Vec<FeedbackEntry>> {
        let mut query = feedback::Entity::find()
            .filter(feedback::Column::ProjectId.eq(project_id));

        if !AuthorizationService::can_view_private_feedback(actor) {
            query = query.filter(
                Condition::any()
                    .add(feedback::Column::IsPrivate.eq(false))
                    .add(feedback::Column::UserId.eq(actor.user_id)),
            );
        }

        let rows = query
            .find_also_related(users::Entity)
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(row, author)| FeedbackEntry::from_row(row, author))
            .collect())
    }

    /// Public faculty feedback across every project of the user's teams,
    /// newest first. Backs the member dashboard, so it is scoped by
    /// membership like `list_member_projects`, not by role.
    pub async fn feedback_received_by_member(
        &self,
        user_id: i32,
    ) -> CoreResult<Vec<FeedbackWithProject>> {
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

        let project_map: HashMap<i32, (String, String)> = projects::Entity::find()
            .filter(projects::Column::TeamId.is_in(team_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id, (p.title, p.thumbnail_url)))
            .collect();

        if project_map.is_empty() {
            return Ok(Vec::new());
        }

        let rows = feedback::Entity::find()
            .filter(feedback::Column::ProjectId.is_in(project_map.keys().copied().collect::<Vec<_>>()))
            .filter(feedback::Column::IsPrivate.eq(false))
            .find_also_related(users::Entity)
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, author)| {
                // Only feedback written by faculty reaches the member view
                let author = author.filter(|u| u.role == UserRole::Faculty.as_str())?;
                let (title, thumbnail_url) = project_map.get(&row.project_id)?.clone();
                Some(FeedbackWithProject {
                    id: row.id,
                    content: row.content,
                    rating: row.rating,
                    is_private: row.is_private,
                    created_at: row.created_at,
                    author_name: Some(author.username),
                    project_id: row.project_id,
                    project_title: title,
                    project_thumbnail_url: thumbnail_url,
                })
            })
            .collect())
    }

    /// Every feedback row the reviewer has written, private included, with
    /// project attribution. Newest first.
    pub async fn feedback_authored_by(
        &self,
        actor: &Actor,
    ) -> CoreResult<Vec<FeedbackWithProject>> {
        self.auth_service
            .require_role(actor, ProjectAction::CreateFeedback)?;

        let rows = feedback::Entity::find()
            .filter(feedback::Column::UserId.eq(actor.user_id))
            .find_also_related(projects::Entity)
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(row, project)| {
                let project = project?;
                Some(FeedbackWithProject {
                    id: row.id,
                    content: row.content,
                    rating: row.rating,
                    is_private: row.is_private,
                    created_at: row.created_at,
                    author_name: None,
                    project_id: project.id,
                    project_title: project.title,
                    project_thumbnail_url: project.thumbnail_url,
                })
            })
            .collect())
    }

    /// Mean of all ratings on the project, private included. `None` when no
    /// feedback exists; the average is always derived, never stored.
    pub async fn average_rating(&self, project_id: i32) -> CoreResult<Option<f64>> {
        let rows = feedback::Entity::find()
            .filter(feedback::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let sum: i64 = rows.iter().map(|r| r.rating as i64).sum();
        Ok(Some(sum as f64 / rows.len() as f64))
    }
}
