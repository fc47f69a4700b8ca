pub mod authorization;
pub mod feedback_service;
pub mod media_detection;
pub mod project_query_service;
pub mod project_service;
pub mod validation;

pub use authorization::{decide, Actor, AuthorizationService, Decision, ProjectAction};
pub use feedback_service::{
    FeedbackAuthor, FeedbackEntry, FeedbackService, FeedbackWithProject, NewFeedback,
};
pub use media_detection::detect_media_type;
pub use project_query_service::{
    ProjectDetail, ProjectQueryService, ProjectSummary, TeamDetail, TeamMemberDetail,
};
pub use project_service::{NewProject, ProjectService, ProjectSubmission, ProjectUpdate};
pub use validation::ValidationService;
