pub mod assignment;
pub mod course;
pub mod health;
