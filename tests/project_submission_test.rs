use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use sea_orm_migration::MigratorTrait;

use sdg_showcase::database::entities::users::UserRole;
use sdg_showcase::database::entities::{
    feedback, project_media, project_sdgs, projects, sdgs, team_members, teams, users,
};
use sdg_showcase::database::migrations::Migrator;
use sdg_showcase::errors::CoreError;
use sdg_showcase::services::{Actor, NewProject, ProjectService, ProjectSubmission};

/// Create an in-memory SQLite database for testing
async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    role: UserRole,
) -> Result<users::Model, DbErr> {
    let mut user = users::ActiveModel::new();
    user.username = Set(username.to_string());
    user.email = Set(format!("{}@example.edu", username));
    user.password_hash = Set("hashed".to_string());
    user.role = Set(role.as_str().to_string());
    user.insert(db).await
}

/// Resolve a seeded SDG row by its goal number.
async fn sdg_id_by_number(db: &DatabaseConnection, number: i32) -> i32 {
    sdgs::Entity::find()
        .filter(sdgs::Column::Number.eq(number))
        .one(db)
        .await
        .unwrap()
        .expect("seeded SDG")
        .id
}

fn solar_pods(sdg_ids: Vec<i32>) -> ProjectSubmission {
    ProjectSubmission {
        team_name: "Solar Pods".to_string(),
        team_description: Some("Off-grid charging stations".to_string()),
        title: "Solar Pods".to_string(),
        description: "Solar-powered study pods for campus commons".to_string(),
        thumbnail_url: "https://cdn.example.edu/solar-pods/thumb.png".to_string(),
        repository_url: Some("https://github.com/solar-pods/firmware".to_string()),
        demo_url: None,
        sdg_ids,
        media_urls: vec![
            "https://cdn.example.edu/solar-pods/deck.jpg".to_string(),
            "https://cdn.example.edu/solar-pods/walkthrough.mp4".to_string(),
        ],
    }
}

#[tokio::test]
async fn test_student_submission_happy_path() {
    let db = setup_test_db().await.unwrap();
    let student = create_user(&db, "amara", UserRole::Student).await.unwrap();
    let actor = Actor::new(student.id, UserRole::Student);

    let sdg_ids = vec![
        sdg_id_by_number(&db, 4).await,
        sdg_id_by_number(&db, 7).await,
        sdg_id_by_number(&db, 10).await,
    ];

    let service = ProjectService::new(db.clone());
    let detail = service
        .submit_project(&actor, solar_pods(sdg_ids))
        .await
        .unwrap();

    assert_eq!(detail.title, "Solar Pods");
    assert_eq!(detail.average_rating, None);
    assert_eq!(detail.team.name, "Solar Pods");

    // Submitting student is the team leader
    assert_eq!(detail.team.members.len(), 1);
    assert_eq!(detail.team.members[0].user_id, student.id);
    assert_eq!(detail.team.members[0].role, team_members::ROLE_LEADER);

    // SDG links come back in goal order
    let numbers: Vec<i32> = detail.sdgs.iter().map(|s| s.number).collect();
    assert_eq!(numbers, vec![4, 7, 10]);

    // The read shape flattens attachments to their URLs in upload order
    assert_eq!(
        detail.media_urls,
        vec![
            "https://cdn.example.edu/solar-pods/deck.jpg".to_string(),
            "https://cdn.example.edu/solar-pods/walkthrough.mp4".to_string(),
        ]
    );

    // Suffix-based media classification on the stored rows
    let media = project_media::Entity::find()
        .filter(project_media::Column::ProjectId.eq(detail.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0].media_type, "image");
    assert_eq!(media[1].media_type, "video");
}

#[tokio::test]
async fn test_duplicate_sdg_ids_collapse_to_one_link() {
    let db = setup_test_db().await.unwrap();
    let student = create_user(&db, "bo", UserRole::Student).await.unwrap();
    let actor = Actor::new(student.id, UserRole::Student);

    let sdg = sdg_id_by_number(&db, 6).await;

    let service = ProjectService::new(db.clone());
    let detail = service
        .submit_project(&actor, solar_pods(vec![sdg, sdg]))
        .await
        .unwrap();

    assert_eq!(detail.sdgs.len(), 1);

    let link_count = project_sdgs::Entity::find()
        .filter(project_sdgs::Column::ProjectId.eq(detail.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(link_count, 1);
}

#[tokio::test]
async fn test_unknown_sdg_rejects_and_persists_nothing() {
    let db = setup_test_db().await.unwrap();
    let student = create_user(&db, "chen", UserRole::Student).await.unwrap();
    let actor = Actor::new(student.id, UserRole::Student);

    let good = sdg_id_by_number(&db, 4).await;

    let service = ProjectService::new(db.clone());
    let err = service
        .submit_project(&actor, solar_pods(vec![good, 9999]))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));

    // The team and project inserts preceded the bad SDG id; the rollback
    // must erase them along with everything else.
    assert_eq!(teams::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(team_members::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(projects::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(project_sdgs::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(project_media::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_students_cannot_use_submission_path() {
    let db = setup_test_db().await.unwrap();
    let faculty = create_user(&db, "prof", UserRole::Faculty).await.unwrap();
    let viewer = create_user(&db, "guest", UserRole::Viewer).await.unwrap();

    let service = ProjectService::new(db.clone());

    for (user, role) in [(&faculty, UserRole::Faculty), (&viewer, UserRole::Viewer)] {
        let actor = Actor::new(user.id, role);
        let err = service
            .submit_project(&actor, solar_pods(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
    }

    assert_eq!(projects::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_faculty_creates_project_for_existing_team() {
    let db = setup_test_db().await.unwrap();
    let faculty = create_user(&db, "prof", UserRole::Faculty).await.unwrap();
    let actor = Actor::new(faculty.id, UserRole::Faculty);

    let team = teams::ActiveModel::new("EduTech".to_string(), None)
        .insert(&db)
        .await
        .unwrap();

    let sdg = sdg_id_by_number(&db, 4).await;
    let service = ProjectService::new(db.clone());

    let detail = service
        .create_project(
            &actor,
            NewProject {
                team_id: team.id,
                title: "Literacy Bot".to_string(),
                description: "A reading tutor".to_string(),
                thumbnail_url: "https://cdn.example.edu/bot.png".to_string(),
                repository_url: None,
                demo_url: None,
                sdg_ids: vec![sdg],
                media_urls: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(detail.team.id, team.id);
    assert_eq!(detail.sdgs[0].number, 4);

    // The general path never grows the roster
    assert_eq!(team_members::Entity::find().count(&db).await.unwrap(), 0);

    // A missing team is NotFound, and students are denied outright
    let err = service
        .create_project(
            &actor,
            NewProject {
                team_id: 404,
                title: "Orphan".to_string(),
                description: "No team".to_string(),
                thumbnail_url: "https://cdn.example.edu/x.png".to_string(),
                repository_url: None,
                demo_url: None,
                sdg_ids: vec![],
                media_urls: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "team", .. }));

    let student = create_user(&db, "amara", UserRole::Student).await.unwrap();
    let err = service
        .create_project(
            &Actor::new(student.id, UserRole::Student),
            NewProject {
                team_id: team.id,
                title: "Denied".to_string(),
                description: "Students use the submission path".to_string(),
                thumbnail_url: "https://cdn.example.edu/x.png".to_string(),
                repository_url: None,
                demo_url: None,
                sdg_ids: vec![],
                media_urls: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Forbidden(_)));
}

#[tokio::test]
async fn test_blank_optional_urls_stored_as_null() {
    let db = setup_test_db().await.unwrap();
    let student = create_user(&db, "dara", UserRole::Student).await.unwrap();
    let actor = Actor::new(student.id, UserRole::Student);

    let mut submission = solar_pods(vec![]);
    submission.repository_url = Some("   ".to_string());
    submission.media_urls.clear();

    let service = ProjectService::new(db.clone());
    let detail = service.submit_project(&actor, submission).await.unwrap();

    assert_eq!(detail.repository_url, None);
    assert_eq!(detail.demo_url, None);
}

#[tokio::test]
async fn test_seventeen_sdgs_are_seeded() {
    let db = setup_test_db().await.unwrap();

    let count = sdgs::Entity::find().count(&db).await.unwrap();
    assert_eq!(count, 17);

    let quality_education = sdgs::Entity::find()
        .filter(sdgs::Column::Number.eq(4))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(quality_education.name, "Quality Education");
}

#[tokio::test]
async fn test_feedback_table_starts_empty() {
    let db = setup_test_db().await.unwrap();
    assert_eq!(feedback::Entity::find().count(&db).await.unwrap(), 0);
}
