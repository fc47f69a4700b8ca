pub mod feedback;
pub mod project_media;
pub mod project_sdgs;
pub mod projects;
pub mod sdgs;
pub mod team_members;
pub mod teams;
pub mod users;
