#![allow(dead_code)]

pub mod server;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use commons_api::auth::{JwtKeys, Role};
use commons_api::database::models::{Commons, UserCommons};
use commons_api::database::{
    CommonsRepository, InMemoryCommonsRepository, InMemoryUserCommonsRepository, RepositoryError,
    UserCommonsRepository,
};
use commons_api::config::AppConfig;
use commons_api::AppState;
use serde::Serialize;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

/// Ordered log of repository calls, e.g. `find_by_id(1)`
#[derive(Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split('(').next() == Some(name))
            .count()
    }
}

/// In-memory commons store that records every call made through the trait.
///
/// An `unavailable` store records calls but fails each one the way a lost
/// database connection would.
#[derive(Default)]
pub struct RecordingCommons {
    inner: InMemoryCommonsRepository,
    pub calls: CallLog,
    pub saved: Mutex<Vec<Commons>>,
    unavailable: bool,
}

impl RecordingCommons {
    pub fn seeded(records: Vec<Commons>) -> Self {
        Self {
            inner: InMemoryCommonsRepository::with_records(records),
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    pub fn saved(&self) -> Vec<Commons> {
        self.saved.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            return Err(RepositoryError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CommonsRepository for RecordingCommons {
    async fn find_all(&self) -> Result<Vec<Commons>, RepositoryError> {
        self.calls.record("find_all");
        self.check_available()?;
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Commons>, RepositoryError> {
        self.calls.record(format!("find_by_id({})", id));
        self.check_available()?;
        self.inner.find_by_id(id).await
    }

    async fn save(&self, commons: Commons) -> Result<Commons, RepositoryError> {
        self.calls.record("save");
        self.check_available()?;
        self.saved.lock().unwrap().push(commons.clone());
        self.inner.save(commons).await
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        self.calls.record(format!("delete_by_id({})", id));
        self.check_available()?;
        self.inner.delete_by_id(id).await
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.calls.record("ping");
        self.check_available()
    }
}

/// In-memory membership store that records every call made through the trait
#[derive(Default)]
pub struct RecordingUserCommons {
    inner: InMemoryUserCommonsRepository,
    pub calls: CallLog,
    pub saved: Mutex<Vec<UserCommons>>,
}

impl RecordingUserCommons {
    pub fn saved(&self) -> Vec<UserCommons> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserCommonsRepository for RecordingUserCommons {
    async fn find_by_commons_id_and_user_id(
        &self,
        commons_id: i64,
        user_id: i64,
    ) -> Result<Option<UserCommons>, RepositoryError> {
        self.calls
            .record(format!("find_by_commons_id_and_user_id({}, {})", commons_id, user_id));
        self.inner.find_by_commons_id_and_user_id(commons_id, user_id).await
    }

    async fn save(&self, user_commons: UserCommons) -> Result<UserCommons, RepositoryError> {
        self.calls.record("save");
        self.saved.lock().unwrap().push(user_commons.clone());
        self.inner.save(user_commons).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }
}

/// Router over recording repositories plus tokens for each role
pub struct TestApp {
    router: Router,
    keys: JwtKeys,
    pub commons: Arc<RecordingCommons>,
    pub user_commons: Arc<RecordingUserCommons>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_commons(Vec::new())
    }

    pub fn with_commons(records: Vec<Commons>) -> Self {
        Self::build(RecordingCommons::seeded(records), commons_api::app)
    }

    /// App whose commons storage fails every call
    pub fn with_unavailable_storage() -> Self {
        Self::build(RecordingCommons::unavailable(), commons_api::app)
    }

    /// App wrapped in the configured transport layers (body limit, CORS, tracing)
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(RecordingCommons::default(), move |state| {
            commons_api::app_with_middleware(state, &config)
        })
    }

    fn build(commons: RecordingCommons, router: impl FnOnce(AppState) -> Router) -> Self {
        let keys = JwtKeys::new(SECRET, 1).expect("keys");
        let commons = Arc::new(commons);
        let user_commons = Arc::new(RecordingUserCommons::default());
        let state = AppState::new(commons.clone(), user_commons.clone(), keys.clone());

        Self {
            router: router(state),
            keys,
            commons,
            user_commons,
        }
    }

    pub fn admin_token(&self) -> String {
        self.keys.issue(1, Some("admin@example.com".into()), vec![Role::User, Role::Admin]).unwrap()
    }

    pub fn user_token(&self) -> String {
        self.keys.issue(2, Some("user@example.com".into()), vec![Role::User]).unwrap()
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

        TestResponse { status, headers, body }
    }

    pub async fn send_json<T: Serialize>(&self, method: Method, uri: &str, token: &str, payload: &T) -> TestResponse {
        let body = serde_json::to_string(payload).unwrap();
        self.send(method, uri, Some(token), Some(body)).await
    }
}
