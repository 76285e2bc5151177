pub mod cv;
pub mod sqlx_repo;
