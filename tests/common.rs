use invix_backend::{
    api::router::create_router,
    config::Config,
    infra::repositories::{
        sqlite_activity_repo::SqliteActivityLogRepo,
        sqlite_event_repo::SqliteEventRepo,
        sqlite_guest_repo::SqliteGuestRepo,
    },
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_public_key: include_str!("../tests/keys/test_public.pem").to_string(),
            business_hours_start: 9,
            business_hours_end: 17,
        };

        let state = Arc::new(AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(pool.clone())),
            guest_repo: Arc::new(SqliteGuestRepo::new(pool.clone())),
            activity_repo: Arc::new(SqliteActivityLogRepo::new(pool.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Mints an access token the way the auth collaborator would. The service
    /// itself never issues tokens, so tests sign their own with the test key.
    pub fn mint_access_token(&self, actor_id: &str) -> String {
        let claims = json!({
            "sub": actor_id,
            "role": "organizer",
            "aud": "invix-frontend",
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        });

        let key = EncodingKey::from_ed_pem(include_str!("../tests/keys/test_private.pem").as_bytes())
            .expect("Invalid test signing key");

        encode(&Header::new(Algorithm::EdDSA), &claims, &key).expect("Failed to mint test token")
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("access_token={}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Creates an event owned by the token's actor and returns its JSON body.
    pub async fn create_event(&self, token: &str, name: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/v1/events",
                Some(token),
                Some(json!({
                    "name": name,
                    "date": "2026-09-01",
                    "time": "18:00",
                    "location": "Berlin",
                    "expected_guests": 50
                })),
            )
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        parse_body(response).await
    }

    pub async fn add_guest(&self, token: &str, event_id: &str, name: &str, tags: &str) -> Value {
        let response = self
            .request(
                "POST",
                &format!("/api/v1/events/{}/guests", event_id),
                Some(token),
                Some(json!({ "name": name, "tags": tags })),
            )
            .await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        parse_body(response).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
