use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string())
                    .col(ColumnDef::new(Users::LastName).string())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create teams table
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(ColumnDef::new(Teams::Description).string())
                    .col(ColumnDef::new(Teams::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Teams::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // Create team_members table
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMembers::TeamId).integer().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).integer().not_null())
                    .col(ColumnDef::new(TeamMembers::Role).string().not_null())
                    .col(ColumnDef::new(TeamMembers::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_team_id")
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_user_id")
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_team_members_team_user")
                            .table(TeamMembers::Table)
                            .col(TeamMembers::TeamId)
                            .col(TeamMembers::UserId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create sdgs table
        manager
            .create_table(
                Table::create()
                    .table(Sdgs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sdgs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sdgs::Number).integer().not_null().unique_key())
                    .col(ColumnDef::new(Sdgs::Name).string().not_null())
                    .col(ColumnDef::new(Sdgs::Description).string().not_null())
                    .col(ColumnDef::new(Sdgs::Color).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Create projects table
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Title).string().not_null())
                    .col(ColumnDef::new(Projects::Description).text().not_null())
                    .col(ColumnDef::new(Projects::ThumbnailUrl).string().not_null())
                    .col(ColumnDef::new(Projects::RepositoryUrl).string())
                    .col(ColumnDef::new(Projects::DemoUrl).string())
                    .col(ColumnDef::new(Projects::TeamId).integer().not_null())
                    .col(ColumnDef::new(Projects::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_projects_team_id")
                            .from(Projects::Table, Projects::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create project_sdgs table
        manager
            .create_table(
                Table::create()
                    .table(ProjectSdgs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectSdgs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectSdgs::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectSdgs::SdgId).integer().not_null())
                    .col(ColumnDef::new(ProjectSdgs::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_sdgs_project_id")
                            .from(ProjectSdgs::Table, ProjectSdgs::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_sdgs_sdg_id")
                            .from(ProjectSdgs::Table, ProjectSdgs::SdgId)
                            .to(Sdgs::Table, Sdgs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .name("idx_project_sdgs_project_sdg")
                            .table(ProjectSdgs::Table)
                            .col(ProjectSdgs::ProjectId)
                            .col(ProjectSdgs::SdgId)
                            .unique(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create project_media table
        manager
            .create_table(
                Table::create()
                    .table(ProjectMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectMedia::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectMedia::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectMedia::MediaUrl).string().not_null())
                    .col(ColumnDef::new(ProjectMedia::MediaType).string().not_null())
                    .col(ColumnDef::new(ProjectMedia::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_media_project_id")
                            .from(ProjectMedia::Table, ProjectMedia::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create feedback table. Feedback cascades with its project so a
        // deleted project leaves no orphaned rows.
        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Feedback::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Feedback::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Feedback::UserId).integer().not_null())
                    .col(ColumnDef::new(Feedback::Content).text().not_null())
                    .col(ColumnDef::new(Feedback::Rating).integer().not_null())
                    .col(
                        ColumnDef::new(Feedback::IsPrivate)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Feedback::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_project_id")
                            .from(Feedback::Table, Feedback::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_user_id")
                            .from(Feedback::Table, Feedback::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectMedia::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectSdgs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sdgs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    FirstName,
    LastName,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TeamMembers {
    Table,
    Id,
    TeamId,
    UserId,
    Role,
    CreatedAt,
}

#[derive(Iden)]
enum Sdgs {
    Table,
    Id,
    Number,
    Name,
    Description,
    Color,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
    Title,
    Description,
    ThumbnailUrl,
    RepositoryUrl,
    DemoUrl,
    TeamId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ProjectSdgs {
    Table,
    Id,
    ProjectId,
    SdgId,
    CreatedAt,
}

#[derive(Iden)]
enum ProjectMedia {
    Table,
    Id,
    ProjectId,
    MediaUrl,
    MediaType,
    CreatedAt,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    ProjectId,
    UserId,
    Content,
    Rating,
    IsPrivate,
    CreatedAt,
}
