use super::{non_empty, parse_timestamp};
use crate::entities::{assignment, attachment, course, quiz};
use canvas_parser::ArchiveFile;
use chrono::{DateTime, Utc};
use log::info;
use models::course_data::{CanvasAssignment, CanvasQuiz, CourseData};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

/// Fields of a course that are not derived from its contents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub course_code: Option<String>,
    pub description: Option<String>,
    pub outline: Option<String>,
}

/// A course with everything stored under it
pub type CourseDetails = (course::Model, Vec<assignment::Model>, Vec<quiz::Model>);

pub struct CourseService;

impl CourseService {
    /// Stores an imported export: the course, its assignments, quizzes and
    /// files, all in one transaction
    ///
    /// # Returns
    /// The id of the new course
    pub async fn save_import(
        db: &DatabaseConnection,
        owner: &str,
        new_course: NewCourse,
        data: &CourseData,
        files: &[ArchiveFile],
    ) -> Result<Uuid, DbErr> {
        let now = Utc::now();
        let course_id = Uuid::new_v4();

        let assignments: Vec<_> = data
            .assignments
            .iter()
            .map(|a| Self::assignment_to_active_model(course_id, a, now))
            .collect();
        let quizzes: Vec<_> = data
            .quizzes
            .iter()
            .map(|q| Self::quiz_to_active_model(course_id, q, now))
            .collect();
        let attachments: Vec<_> = files
            .iter()
            .map(|f| Self::file_to_active_model(owner, course_id, f, now))
            .collect();

        let txn = db.begin().await?;

        course::Entity::insert(Self::course_to_active_model(
            course_id, owner, new_course, now,
        ))
        .exec(&txn)
        .await?;

        // Bulk inserts of zero rows are rejected
        if !assignments.is_empty() {
            assignment::Entity::insert_many(assignments)
                .exec(&txn)
                .await?;
        }
        if !quizzes.is_empty() {
            quiz::Entity::insert_many(quizzes).exec(&txn).await?;
        }
        if !attachments.is_empty() {
            attachment::Entity::insert_many(attachments)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        info!(
            "Saved course {course_id} with {} assignments, {} quizzes and {} files",
            data.assignments.len(),
            data.quizzes.len(),
            files.len()
        );

        Ok(course_id)
    }

    /// Creates an empty course
    pub async fn create_course(
        db: &DatabaseConnection,
        owner: &str,
        new_course: NewCourse,
    ) -> Result<course::Model, DbErr> {
        Self::course_to_active_model(Uuid::new_v4(), owner, new_course, Utc::now())
            .insert(db)
            .await
    }

    /// Lists the courses of a user, newest first
    pub async fn list_courses(
        db: &DatabaseConnection,
        owner: &str,
    ) -> Result<Vec<course::Model>, DbErr> {
        course::Entity::find()
            .filter(course::Column::Owner.eq(owner))
            .order_by_desc(course::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Finds a course if it belongs to `owner`
    pub async fn find_owned(
        db: &DatabaseConnection,
        owner: &str,
        id: Uuid,
    ) -> Result<Option<course::Model>, DbErr> {
        course::Entity::find_by_id(id)
            .filter(course::Column::Owner.eq(owner))
            .one(db)
            .await
    }

    /// Gets a course with its assignments and quizzes
    pub async fn get_course(
        db: &DatabaseConnection,
        owner: &str,
        id: Uuid,
    ) -> Result<Option<CourseDetails>, DbErr> {
        let Some(course) = Self::find_owned(db, owner, id).await? else {
            return Ok(None);
        };

        let (assignments, quizzes) = futures::try_join!(
            assignment::Entity::find()
                .filter(assignment::Column::CourseId.eq(id))
                .order_by_asc(assignment::Column::DueDate)
                .all(db),
            quiz::Entity::find()
                .filter(quiz::Column::CourseId.eq(id))
                .order_by_asc(quiz::Column::DueDate)
                .all(db),
        )?;

        Ok(Some((course, assignments, quizzes)))
    }

    /// Deletes a course and, through cascading, everything under it
    ///
    /// # Returns
    /// `false` if the course does not exist or belongs to someone else
    pub async fn delete_course(
        db: &DatabaseConnection,
        owner: &str,
        id: Uuid,
    ) -> Result<bool, DbErr> {
        let result = course::Entity::delete_many()
            .filter(course::Column::Id.eq(id))
            .filter(course::Column::Owner.eq(owner))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    fn course_to_active_model(
        id: Uuid,
        owner: &str,
        new_course: NewCourse,
        now: DateTime<Utc>,
    ) -> course::ActiveModel {
        course::ActiveModel {
            id: Set(id),
            owner: Set(owner.to_string()),
            title: Set(new_course.title),
            course_code: Set(new_course.course_code),
            description: Set(new_course.description),
            outline: Set(new_course.outline),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn assignment_to_active_model(
        course_id: Uuid,
        assignment: &CanvasAssignment,
        now: DateTime<Utc>,
    ) -> assignment::ActiveModel {
        assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(assignment.title.clone()),
            description: Set(non_empty(&assignment.content)),
            due_date: Set(parse_timestamp(assignment.due_at.as_deref())),
            lock_date: Set(parse_timestamp(assignment.lock_at.as_deref())),
            unlock_date: Set(parse_timestamp(assignment.unlock_at.as_deref())),
            points_possible: Set(assignment.points_possible),
            submission_type: Set(assignment.submission_types.clone()),
            is_graded: Set(assignment.graded.unwrap_or(false)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn quiz_to_active_model(
        course_id: Uuid,
        quiz: &CanvasQuiz,
        now: DateTime<Utc>,
    ) -> quiz::ActiveModel {
        quiz::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(quiz.title.clone()),
            description: Set(non_empty(&quiz.content)),
            due_date: Set(parse_timestamp(quiz.due_at.as_deref())),
            lock_date: Set(parse_timestamp(quiz.lock_at.as_deref())),
            unlock_date: Set(parse_timestamp(quiz.unlock_at.as_deref())),
            points_possible: Set(quiz.points_possible),
            question_count: Set(quiz.question_count.and_then(|n| i32::try_from(n).ok())),
            time_limit: Set(quiz.time_limit.and_then(|n| i32::try_from(n).ok())),
            attempts: Set(quiz.attempts),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    fn file_to_active_model(
        owner: &str,
        course_id: Uuid,
        file: &ArchiveFile,
        now: DateTime<Utc>,
    ) -> attachment::ActiveModel {
        attachment::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner: Set(owner.to_string()),
            course_id: Set(Some(course_id)),
            file_name: Set(file.name.clone()),
            file_size: Set(i64::try_from(file.size).ok()),
            file_type: Set(Some(file.extension.clone())),
            file_path: Set(file.path.clone()),
            file_data: Set(Some(file.data.clone())),
            uploaded_at: Set(now),
        }
    }
}
