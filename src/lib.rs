//! Data and authorization engine for a student-project showcase.
//!
//! Projects are owned by teams, tagged with UN Sustainable Development
//! Goals, carry media attachments, and collect rated feedback from
//! reviewers. The crate exposes three service seams: a write coordinator
//! ([`services::ProjectService`]), a feedback pipeline
//! ([`services::FeedbackService`]) and a read-side assembler
//! ([`services::ProjectQueryService`]), all gated by a role-based
//! authorization resolver. Identity verification and file storage live
//! outside this crate; callers hand in a pre-verified [`services::Actor`].

pub mod database;
pub mod errors;
pub mod services;
