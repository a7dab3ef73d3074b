use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create courses table
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Owner).string().not_null())
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::CourseCode).string())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Outline).text())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assignments table
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text())
                    .col(ColumnDef::new(Assignments::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Assignments::LockDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Assignments::UnlockDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Assignments::PointsPossible).double())
                    .col(ColumnDef::new(Assignments::SubmissionType).string())
                    .col(
                        ColumnDef::new(Assignments::IsGraded)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignments-course_id")
                            .from(Assignments::Table, Assignments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create quizzes table
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quizzes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Quizzes::CourseId).uuid().not_null())
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Description).text())
                    .col(ColumnDef::new(Quizzes::DueDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Quizzes::LockDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Quizzes::UnlockDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Quizzes::PointsPossible).double())
                    .col(ColumnDef::new(Quizzes::QuestionCount).integer())
                    .col(ColumnDef::new(Quizzes::TimeLimit).integer())
                    .col(ColumnDef::new(Quizzes::Attempts).integer())
                    .col(
                        ColumnDef::new(Quizzes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Quizzes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-quizzes-course_id")
                            .from(Quizzes::Table, Quizzes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create attachments table
        manager
            .create_table(
                Table::create()
                    .table(Attachments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attachments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attachments::Owner).string().not_null())
                    .col(ColumnDef::new(Attachments::CourseId).uuid())
                    .col(ColumnDef::new(Attachments::FileName).string().not_null())
                    .col(ColumnDef::new(Attachments::FileSize).big_integer())
                    .col(ColumnDef::new(Attachments::FileType).string())
                    .col(ColumnDef::new(Attachments::FilePath).text().not_null())
                    .col(ColumnDef::new(Attachments::FileData).blob())
                    .col(
                        ColumnDef::new(Attachments::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attachments-course_id")
                            .from(Attachments::Table, Attachments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order due to foreign key constraints
        manager
            .drop_table(Table::drop().table(Attachments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
pub(crate) enum Courses {
    Table,
    Id,
    Owner,
    Title,
    CourseCode,
    Description,
    Outline,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Assignments {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    DueDate,
    LockDate,
    UnlockDate,
    PointsPossible,
    SubmissionType,
    IsGraded,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Quizzes {
    Table,
    Id,
    CourseId,
    Title,
    Description,
    DueDate,
    LockDate,
    UnlockDate,
    PointsPossible,
    QuestionCount,
    TimeLimit,
    Attempts,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
pub(crate) enum Attachments {
    Table,
    Id,
    Owner,
    CourseId,
    FileName,
    FileSize,
    FileType,
    FilePath,
    FileData,
    UploadedAt,
}
