use std::collections::HashSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

use crate::database::entities::{
    project_media, project_sdgs, projects, sdgs, team_members, teams,
};
use crate::errors::{map_db_err, CoreError, CoreResult};
use crate::services::media_detection::detect_media_type;
use crate::services::project_query_service::{ProjectDetail, ProjectQueryService};
use crate::services::{Actor, AuthorizationService, ProjectAction, ValidationService};

/// Student composite payload: the team is created alongside the project and
/// the submitting student becomes its leader.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSubmission {
    pub team_name: String,
    pub team_description: Option<String>,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub sdg_ids: Vec<i32>,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Reviewer path: create a project against a team that already exists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub team_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub sdg_ids: Vec<i32>,
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Partial update. Omitted fields keep their stored values; a supplied SDG
/// or media list replaces the stored set wholesale, even when empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub repository_url: Option<String>,
    pub demo_url: Option<String>,
    pub sdg_ids: Option<Vec<i32>>,
    pub media_urls: Option<Vec<String>>,
}

/// Write coordinator for projects. Every mutation authorizes first, then
/// validates, then applies all writes inside a single transaction.
#[derive(Clone)]
pub struct ProjectService {
    db: DatabaseConnection,
    auth_service: AuthorizationService,
}

impl ProjectService {
    pub fn new(db: DatabaseConnection) -> Self {
        let auth_service = AuthorizationService::new(db.clone());
        Self { db, auth_service }
    }

    /// Student submission: team, leader membership, project, SDG links and
    /// media rows are created atomically. If any step fails (including an
    /// unknown SDG id) nothing is persisted.
    pub async fn submit_project(
        &self,
        actor: &Actor,
        submission: ProjectSubmission,
    ) -> CoreResult<ProjectDetail> {
        self.auth_service
            .require_role(actor, ProjectAction::SubmitProject)?;

        let team_name = ValidationService::validate_team_name(&submission.team_name)?;
        let title = ValidationService::validate_title(&submission.title)?;
        let description = ValidationService::validate_description(&submission.description)?;
        let thumbnail_url =
            ValidationService::validate_url_field("thumbnailUrl", &submission.thumbnail_url)?;
        for url in &submission.media_urls {
            ValidationService::validate_url_field("mediaUrl", url)?;
        }

        let txn = self.db.begin().await?;

        let team = teams::ActiveModel::new(team_name, submission.team_description.clone())
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("create team", e))?;

        team_members::ActiveModel::new(team.id, actor.user_id, team_members::ROLE_LEADER)
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("add team leader", e))?;

        let mut project = projects::ActiveModel::new();
        project.title = Set(title);
        project.description = Set(description);
        project.thumbnail_url = Set(thumbnail_url);
        project.repository_url =
            Set(ValidationService::normalize_optional_url(submission.repository_url.clone()));
        project.demo_url =
            Set(ValidationService::normalize_optional_url(submission.demo_url.clone()));
        project.team_id = Set(team.id);

        let project = project
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("create project", e))?;

        Self::insert_sdg_links(&txn, project.id, &submission.sdg_ids).await?;
        Self::insert_media(&txn, project.id, &submission.media_urls).await?;

        txn.commit().await?;

        info!(
            project_id = project.id,
            team_id = team.id,
            user_id = actor.user_id,
            "project submitted"
        );

        ProjectQueryService::new(self.db.clone())
            .get_project(actor, project.id)
            .await
    }

    /// Reviewer path: create a project for an existing team.
    pub async fn create_project(&self, actor: &Actor, new: NewProject) -> CoreResult<ProjectDetail> {
        self.auth_service
            .require_role(actor, ProjectAction::CreateProject)?;

        teams::Entity::find_by_id(new.team_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "team",
                id: new.team_id,
            })?;

        let title = ValidationService::validate_title(&new.title)?;
        let description = ValidationService::validate_description(&new.description)?;
        let thumbnail_url = ValidationService::validate_url_field("thumbnailUrl", &new.thumbnail_url)?;
        for url in &new.media_urls {
            ValidationService::validate_url_field("mediaUrl", url)?;
        }

        let txn = self.db.begin().await?;

        let mut project = projects::ActiveModel::new();
        project.title = Set(title);
        project.description = Set(description);
        project.thumbnail_url = Set(thumbnail_url);
        project.repository_url =
            Set(ValidationService::normalize_optional_url(new.repository_url.clone()));
        project.demo_url = Set(ValidationService::normalize_optional_url(new.demo_url.clone()));
        project.team_id = Set(new.team_id);

        let project = project
            .insert(&txn)
            .await
            .map_err(|e| map_db_err("create project", e))?;

        Self::insert_sdg_links(&txn, project.id, &new.sdg_ids).await?;
        Self::insert_media(&txn, project.id, &new.media_urls).await?;

        txn.commit().await?;

        info!(project_id = project.id, team_id = new.team_id, "project created");

        ProjectQueryService::new(self.db.clone())
            .get_project(actor, project.id)
            .await
    }

    /// Partial update. Supplied scalars replace stored values, omitted ones
    /// are untouched; a supplied association list is replaced wholesale.
    pub async fn update_project(
        &self,
        actor: &Actor,
        project_id: i32,
        update: ProjectUpdate,
    ) -> CoreResult<ProjectDetail> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        self.auth_service
            .require(actor, ProjectAction::UpdateProject, project.team_id)
            .await?;

        // Validate everything before opening the transaction.
        let title = update
            .title
            .as_deref()
            .map(ValidationService::validate_title)
            .transpose()?;
        let description = update
            .description
            .as_deref()
            .map(ValidationService::validate_description)
            .transpose()?;
        let thumbnail_url = update
            .thumbnail_url
            .as_deref()
            .map(|u| ValidationService::validate_url_field("thumbnailUrl", u))
            .transpose()?;
        if let Some(urls) = &update.media_urls {
            for url in urls {
                ValidationService::validate_url_field("mediaUrl", url)?;
            }
        }

        let txn = self.db.begin().await?;

        let mut active: projects::ActiveModel = project.into();
        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        if let Some(thumbnail_url) = thumbnail_url {
            active.thumbnail_url = Set(thumbnail_url);
        }
        if update.repository_url.is_some() {
            active.repository_url =
                Set(ValidationService::normalize_optional_url(update.repository_url.clone()));
        }
        if update.demo_url.is_some() {
            active.demo_url =
                Set(ValidationService::normalize_optional_url(update.demo_url.clone()));
        }
        let active = active.set_updated_at();

        let project = active
            .update(&txn)
            .await
            .map_err(|e| map_db_err("update project", e))?;

        if let Some(sdg_ids) = &update.sdg_ids {
            project_sdgs::Entity::delete_many()
                .filter(project_sdgs::Column::ProjectId.eq(project.id))
                .exec(&txn)
                .await?;
            Self::insert_sdg_links(&txn, project.id, sdg_ids).await?;
        }

        if let Some(media_urls) = &update.media_urls {
            project_media::Entity::delete_many()
                .filter(project_media::Column::ProjectId.eq(project.id))
                .exec(&txn)
                .await?;
            Self::insert_media(&txn, project.id, media_urls).await?;
        }

        txn.commit().await?;

        info!(project_id = project.id, user_id = actor.user_id, "project updated");

        ProjectQueryService::new(self.db.clone())
            .get_project(actor, project.id)
            .await
    }

    /// Delete a project. SDG links, media and feedback go with it via
    /// cascade; the owning team and its memberships survive.
    pub async fn delete_project(&self, actor: &Actor, project_id: i32) -> CoreResult<()> {
        let project = projects::Entity::find_by_id(project_id)
            .one(&self.db)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "project",
                id: project_id,
            })?;

        self.auth_service
            .require(actor, ProjectAction::DeleteProject, project.team_id)
            .await?;

        let result = projects::Entity::delete_by_id(project_id)
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound {
                entity: "project",
                id: project_id,
            });
        }

        info!(project_id, user_id = actor.user_id, "project deleted");

        Ok(())
    }

    /// Link the project to each referenced SDG. Ids are deduplicated
    /// (first occurrence wins) and each must name a seeded SDG row; an
    /// unknown id fails the whole transaction.
    async fn insert_sdg_links(
        txn: &DatabaseTransaction,
        project_id: i32,
        sdg_ids: &[i32],
    ) -> CoreResult<()> {
        let mut seen = HashSet::new();

        for &sdg_id in sdg_ids {
            if !seen.insert(sdg_id) {
                continue;
            }

            sdgs::Entity::find_by_id(sdg_id)
                .one(txn)
                .await?
                .ok_or_else(|| {
                    CoreError::validation(format!("Unknown SDG id: {}", sdg_id))
                })?;

            project_sdgs::ActiveModel::new(project_id, sdg_id)
                .insert(txn)
                .await
                .map_err(|e| map_db_err("link SDG", e))?;
        }

        Ok(())
    }

    async fn insert_media(
        txn: &DatabaseTransaction,
        project_id: i32,
        media_urls: &[String],
    ) -> CoreResult<()> {
        for url in media_urls {
            let url = url.trim().to_string();
            let media_type = detect_media_type(&url);
            project_media::ActiveModel::new(project_id, url, media_type)
                .insert(txn)
                .await
                .map_err(|e| map_db_err("attach media", e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_payload_deserializes_from_camel_case() {
        let payload = serde_json::json!({
            "teamName": "Solar Pods",
            "title": "Solar Pods",
            "description": "Solar-powered study pods",
            "thumbnailUrl": "https://cdn.example.edu/thumb.png",
            "repositoryUrl": "https://github.com/solar-pods/firmware",
            "sdgIds": [4, 7, 10],
            "mediaUrls": ["https://cdn.example.edu/deck.jpg"]
        });

        let submission: ProjectSubmission = serde_json::from_value(payload).unwrap();
        assert_eq!(submission.team_name, "Solar Pods");
        assert_eq!(submission.team_description, None);
        assert_eq!(submission.sdg_ids, vec![4, 7, 10]);
        assert_eq!(submission.media_urls.len(), 1);
        assert_eq!(submission.demo_url, None);
    }

    #[test]
    fn test_update_payload_defaults_to_all_omitted() {
        let update: ProjectUpdate = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(update.title.is_none());
        assert!(update.sdg_ids.is_none());
        assert!(update.media_urls.is_none());

        let update: ProjectUpdate =
            serde_json::from_value(serde_json::json!({ "sdgIds": [] })).unwrap();
        assert_eq!(update.sdg_ids, Some(vec![]));
    }
}
