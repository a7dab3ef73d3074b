use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A file stored from an uploaded export
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attachments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner: String,
    pub course_id: Option<Uuid>,
    pub file_name: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    /// Path of the file inside the export
    pub file_path: String,
    #[serde(skip)]
    pub file_data: Option<Vec<u8>>,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id",
        on_delete = "Cascade"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
