//! sea-orm entities for the Campus API database.

pub mod courses;
pub mod enrollments;
pub mod keys;
pub mod users;
