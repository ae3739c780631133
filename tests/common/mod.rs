// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ativvo::config::Config;
use ativvo::models::User;
use ativvo::services::{Session, SessionStore};
use ativvo::AppState;
use serde_json::json;
use tempfile::TempDir;
use wiremock::MockServer;

/// Token seeded by [`TestApp::login`].
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "test-token";

/// App wired to a mock API and a throwaway session file.
#[allow(dead_code)]
pub struct TestApp {
    pub server: MockServer,
    pub state: AppState,
    pub config: Config,
    _dir: TempDir,
}

impl TestApp {
    /// Store a session as if the user had logged in.
    #[allow(dead_code)]
    pub fn login(&self) {
        self.session()
            .save(&Session {
                token: TEST_TOKEN.to_string(),
                user: test_user(),
            })
            .expect("Failed to seed session");
    }

    pub fn session(&self) -> &SessionStore {
        &self.state.session
    }
}

/// Create a test app pointed at a fresh mock server (logged out).
pub async fn test_app() -> TestApp {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        api_url: server.uri(),
        session_path: dir.path().join("session.json"),
        ..Config::test_default()
    };
    let state = AppState::new(config.clone()).expect("Failed to build app state");

    TestApp {
        server,
        state,
        config,
        _dir: dir,
    }
}

#[allow(dead_code)]
pub fn user_json() -> serde_json::Value {
    json!({
        "id": "u1",
        "email": "ana@example.com",
        "name": "Ana",
        "gender": "female",
        "height": 165.0,
        "weight": 60.0,
        "weekly_workouts": 4,
        "cardio_time": 90,
        "goal": "cutting",
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

#[allow(dead_code)]
pub fn test_user() -> User {
    serde_json::from_value(user_json()).expect("valid user")
}

#[allow(dead_code)]
pub fn food_json(id: &str, name: &str, calories: f64, serving_size: f64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "calories": calories,
        "protein": 5.0,
        "carbs": 20.0,
        "fat": 2.0,
        "serving_size": serving_size
    })
}
