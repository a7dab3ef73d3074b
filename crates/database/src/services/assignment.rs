use crate::entities::{assignment, course};
use chrono::{DateTime, Utc};
use log::info;
use models::assignment::ParsedAssignment;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

pub struct AssignmentService;

impl AssignmentService {
    /// Stores assignments recovered from pasted text under a course
    ///
    /// # Returns
    /// The stored rows, in the order they were given
    pub async fn save_parsed(
        db: &DatabaseConnection,
        course_id: Uuid,
        parsed: Vec<ParsedAssignment>,
    ) -> Result<Vec<assignment::Model>, DbErr> {
        let now = Utc::now();
        let txn = db.begin().await?;

        let mut saved = Vec::with_capacity(parsed.len());
        for assignment in parsed {
            saved.push(
                Self::parsed_to_active_model(course_id, assignment, now)
                    .insert(&txn)
                    .await?,
            );
        }

        txn.commit().await?;
        info!("Saved {} parsed assignments to course {course_id}", saved.len());

        Ok(saved)
    }

    /// Lists the assignments of a course, earliest due first
    pub async fn list_for_course(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Vec<assignment::Model>, DbErr> {
        assignment::Entity::find()
            .filter(assignment::Column::CourseId.eq(course_id))
            .order_by_asc(assignment::Column::DueDate)
            .order_by_asc(assignment::Column::CreatedAt)
            .all(db)
            .await
    }

    /// Deletes an assignment if its course belongs to `owner`
    ///
    /// # Returns
    /// `false` if the assignment does not exist or belongs to someone else
    pub async fn delete_assignment(
        db: &DatabaseConnection,
        owner: &str,
        id: Uuid,
    ) -> Result<bool, DbErr> {
        let assignment = assignment::Entity::find_by_id(id)
            .inner_join(course::Entity)
            .filter(course::Column::Owner.eq(owner))
            .one(db)
            .await?;

        match assignment {
            Some(assignment) => {
                assignment.delete(db).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn parsed_to_active_model(
        course_id: Uuid,
        parsed: ParsedAssignment,
        now: DateTime<Utc>,
    ) -> assignment::ActiveModel {
        assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            title: Set(parsed.title),
            description: Set(None),
            due_date: Set(parsed.due_date),
            lock_date: Set(None),
            unlock_date: Set(None),
            points_possible: Set(parsed.points.map(f64::from)),
            submission_type: Set(None),
            is_graded: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}
