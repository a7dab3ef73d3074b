pub mod assignment;
pub mod attachment;
pub mod course;
pub mod quiz;
