use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::database::entities::users::UserRole;
use crate::database::entities::{feedback, team_members};
use crate::errors::{CoreError, CoreResult};

/// Pre-verified identity pair handed in by the transport layer. The engine
/// trusts it completely; token validation happens upstream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i32,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

/// Actions the resolver rules on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProjectAction {
    /// Student composite path: creates its own team alongside the project.
    SubmitProject,
    /// General path: create a project against a pre-existing team.
    CreateProject,
    UpdateProject,
    DeleteProject,
    CreateFeedback,
    ReadPublicFeedback,
    ReadPrivateFeedback,
}

impl ProjectAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectAction::SubmitProject => "submit project",
            ProjectAction::CreateProject => "create project",
            ProjectAction::UpdateProject => "update project",
            ProjectAction::DeleteProject => "delete project",
            ProjectAction::CreateFeedback => "create feedback",
            ProjectAction::ReadPublicFeedback => "read public feedback",
            ProjectAction::ReadPrivateFeedback => "read private feedback",
        }
    }
}

/// Outcome of the role-level decision table. `RequireTeamMembership` defers
/// to a per-request roster lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    RequireTeamMembership,
}

/// The policy table. Arms are ordered so the first match wins:
/// admin beats everything, faculty beats membership checks, membership
/// covers mutation by any remaining role.
pub fn decide(role: UserRole, action: ProjectAction) -> Decision {
    use Decision::*;
    use ProjectAction::*;
    use UserRole::*;

    match (role, action) {
        (Admin, _) => Allow,
        // Faculty never uses the student submission path but may do
        // everything else, including reading private feedback.
        (Faculty, SubmitProject) => Deny,
        (Faculty, _) => Allow,
        // Mutating an existing project requires a seat on its team;
        // "leader" and "member" are equivalent for this check.
        (_, UpdateProject) | (_, DeleteProject) => RequireTeamMembership,
        (Student, SubmitProject) => Allow,
        (_, ReadPublicFeedback) => Allow,
        // Students may not submit feedback, only receive it; viewers may
        // not create anything.
        _ => Deny,
    }
}

/// Authorization resolver. Membership is looked up per request and never
/// cached: team rosters change between calls.
#[derive(Clone)]
pub struct AuthorizationService {
    db: DatabaseConnection,
}

impl AuthorizationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Rule on an action that carries no team context (creation paths,
    /// feedback submission). Membership can never satisfy these.
    pub fn require_role(&self, actor: &Actor, action: ProjectAction) -> CoreResult<()> {
        match decide(actor.role, action) {
            Decision::Allow => Ok(()),
            _ => Err(self.denied(actor, action)),
        }
    }

    /// Rule on an action against a project owned by `team_id`.
    pub async fn require(
        &self,
        actor: &Actor,
        action: ProjectAction,
        team_id: i32,
    ) -> CoreResult<()> {
        match decide(actor.role, action) {
            Decision::Allow => Ok(()),
            Decision::Deny => Err(self.denied(actor, action)),
            Decision::RequireTeamMembership => {
                if self.is_team_member(actor.user_id, team_id).await? {
                    Ok(())
                } else {
                    Err(self.denied(actor, action))
                }
            }
        }
    }

    pub async fn is_team_member(&self, user_id: i32, team_id: i32) -> CoreResult<bool> {
        let membership = team_members::Entity::find()
            .filter(team_members::Column::TeamId.eq(team_id))
            .filter(team_members::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;

        Ok(membership.is_some())
    }

    /// Whether the actor sees private feedback rows wholesale.
    pub fn can_view_private_feedback(actor: &Actor) -> bool {
        actor.role.is_reviewer()
    }

    /// Row-level readability: public rows are visible to any authenticated
    /// actor; private rows only to reviewers and the row's own author.
    pub fn can_read_feedback(actor: &Actor, row: &feedback::Model) -> bool {
        !row.is_private || actor.role.is_reviewer() || row.user_id == actor.user_id
    }

    fn denied(&self, actor: &Actor, action: ProjectAction) -> CoreError {
        tracing::debug!(
            user_id = actor.user_id,
            role = actor.role.as_str(),
            action = action.as_str(),
            "authorization denied"
        );
        CoreError::forbidden(format!(
            "Role '{}' may not {}",
            actor.role.as_str(),
            action.as_str()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_allows_everything() {
        for action in [
            ProjectAction::SubmitProject,
            ProjectAction::CreateProject,
            ProjectAction::UpdateProject,
            ProjectAction::DeleteProject,
            ProjectAction::CreateFeedback,
            ProjectAction::ReadPublicFeedback,
            ProjectAction::ReadPrivateFeedback,
        ] {
            assert_eq!(decide(UserRole::Admin, action), Decision::Allow);
        }
    }

    #[test]
    fn test_faculty_decisions() {
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::SubmitProject),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::CreateProject),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::UpdateProject),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::DeleteProject),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::CreateFeedback),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Faculty, ProjectAction::ReadPrivateFeedback),
            Decision::Allow
        );
    }

    #[test]
    fn test_student_decisions() {
        assert_eq!(
            decide(UserRole::Student, ProjectAction::SubmitProject),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Student, ProjectAction::CreateProject),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Student, ProjectAction::UpdateProject),
            Decision::RequireTeamMembership
        );
        assert_eq!(
            decide(UserRole::Student, ProjectAction::DeleteProject),
            Decision::RequireTeamMembership
        );
        // Students may not submit feedback, only receive it
        assert_eq!(
            decide(UserRole::Student, ProjectAction::CreateFeedback),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Student, ProjectAction::ReadPublicFeedback),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Student, ProjectAction::ReadPrivateFeedback),
            Decision::Deny
        );
    }

    #[test]
    fn test_viewer_decisions() {
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::SubmitProject),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::CreateProject),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::UpdateProject),
            Decision::RequireTeamMembership
        );
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::CreateFeedback),
            Decision::Deny
        );
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::ReadPublicFeedback),
            Decision::Allow
        );
        assert_eq!(
            decide(UserRole::Viewer, ProjectAction::ReadPrivateFeedback),
            Decision::Deny
        );
    }

    #[test]
    fn test_private_feedback_readable_by_author() {
        let row = feedback::Model {
            id: 1,
            project_id: 1,
            user_id: 9,
            content: "private note".to_string(),
            rating: 4,
            is_private: true,
            created_at: chrono::Utc::now(),
        };

        let author = Actor::new(9, UserRole::Faculty);
        let other_viewer = Actor::new(3, UserRole::Viewer);
        let admin = Actor::new(1, UserRole::Admin);

        assert!(AuthorizationService::can_read_feedback(&author, &row));
        assert!(AuthorizationService::can_read_feedback(&admin, &row));
        assert!(!AuthorizationService::can_read_feedback(&other_viewer, &row));
    }

    #[tokio::test]
    async fn test_membership_resolved_per_request() {
        use crate::database::entities::teams;
        use crate::database::test_utils::setup_test_db;
        use sea_orm::{ActiveModelTrait, Set};

        let db = setup_test_db().await;

        let mut user = crate::database::entities::users::ActiveModel::new();
        user.username = Set("amara".to_string());
        user.email = Set("amara@example.edu".to_string());
        user.password_hash = Set("hashed".to_string());
        user.role = Set(UserRole::Student.as_str().to_string());
        let user = user.insert(&db).await.unwrap();

        let team = teams::ActiveModel::new("Solar Pods".to_string(), None)
            .insert(&db)
            .await
            .unwrap();

        let auth = AuthorizationService::new(db.clone());
        let actor = Actor::new(user.id, UserRole::Student);

        assert!(!auth.is_team_member(user.id, team.id).await.unwrap());
        assert!(auth
            .require(&actor, ProjectAction::UpdateProject, team.id)
            .await
            .is_err());

        team_members::ActiveModel::new(team.id, user.id, team_members::ROLE_MEMBER)
            .insert(&db)
            .await
            .unwrap();

        // No caching: the same service instance sees the new roster row
        assert!(auth.is_team_member(user.id, team.id).await.unwrap());
        assert!(auth
            .require(&actor, ProjectAction::UpdateProject, team.id)
            .await
            .is_ok());
    }

    #[test]
    fn test_public_feedback_readable_by_all() {
        let row = feedback::Model {
            id: 2,
            project_id: 1,
            user_id: 9,
            content: "nice work".to_string(),
            rating: 5,
            is_private: false,
            created_at: chrono::Utc::now(),
        };

        for role in [
            UserRole::Viewer,
            UserRole::Student,
            UserRole::Faculty,
            UserRole::Admin,
        ] {
            let actor = Actor::new(100, role);
            assert!(AuthorizationService::can_read_feedback(&actor, &row));
        }
    }
}
