use crate::m20260125_create_all_tables::{Assignments, Attachments, Courses, Quizzes};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Every course query is scoped to its owner
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_owner")
                    .table(Courses::Table)
                    .col(Courses::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_assignments_course_id")
                    .table(Assignments::Table)
                    .col(Assignments::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quizzes_course_id")
                    .table(Quizzes::Table)
                    .col(Quizzes::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attachments_course_id")
                    .table(Attachments::Table)
                    .col(Attachments::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_attachments_course_id",
            "idx_quizzes_course_id",
            "idx_assignments_course_id",
            "idx_courses_owner",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
