pub mod assignment;
pub mod course_data;
