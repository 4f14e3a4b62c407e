//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::database::{
    CommonsRepository, InMemoryCommonsRepository, InMemoryUserCommonsRepository,
    UserCommonsRepository,
};

/// Repositories and key material shared across requests.
///
/// Repositories are trait objects so the same router runs against
/// PostgreSQL in production and in-memory stores in tests.
#[derive(Clone)]
pub struct AppState {
    pub commons: Arc<dyn CommonsRepository>,
    pub user_commons: Arc<dyn UserCommonsRepository>,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(
        commons: Arc<dyn CommonsRepository>,
        user_commons: Arc<dyn UserCommonsRepository>,
        jwt: JwtKeys,
    ) -> Self {
        Self {
            commons,
            user_commons,
            jwt: Arc::new(jwt),
        }
    }

    /// State backed by fresh in-memory repositories
    pub fn in_memory(jwt: JwtKeys) -> Self {
        Self::new(
            Arc::new(InMemoryCommonsRepository::new()),
            Arc::new(InMemoryUserCommonsRepository::new()),
            jwt,
        )
    }
}
