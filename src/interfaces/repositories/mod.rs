pub mod application;
pub mod blog;
pub mod mentorship;
pub mod message;
pub mod project;
pub mod sqlx_repo;
pub mod user;
