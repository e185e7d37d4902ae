//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument. Queries use numbered
//! `?N` placeholders so a parameter can be referenced more than once.

pub mod account_repo;
pub mod movie_repo;
pub mod task_repo;

pub use account_repo::AccountRepo;
pub use movie_repo::MovieRepo;
pub use task_repo::TaskRepo;
