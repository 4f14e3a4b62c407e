pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{app, app_with_middleware};
pub use state::AppState;
