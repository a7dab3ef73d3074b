pub mod assignment;
pub mod course;
