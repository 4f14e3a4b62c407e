pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{InMemoryCommonsRepository, InMemoryUserCommonsRepository};
pub use postgres::{PgCommonsRepository, PgUserCommonsRepository};
pub use repository::{CommonsRepository, RepositoryError, UserCommonsRepository};
