// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use ativvo::config::Config;
use ativvo::error::AppError;
use ativvo::services::{ApiClient, EventService, RetryPolicy};
use common::test_app;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn list_error(template: ResponseTemplate) -> AppError {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(template)
        .mount(&app.server)
        .await;

    app.state.events.list().await.unwrap_err()
}

#[tokio::test]
async fn test_error_field_wins() {
    let err = list_error(
        ResponseTemplate::new(400).set_body_json(json!({"error": "Invalid date"})),
    )
    .await;
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Invalid date");
}

#[tokio::test]
async fn test_json_without_error_field_is_shown_as_json() {
    let err = list_error(
        ResponseTemplate::new(422).set_body_json(json!({"detail": "bad"})),
    )
    .await;
    assert_eq!(err.to_string(), r#"{"detail":"bad"}"#);
}

#[tokio::test]
async fn test_plain_text_body() {
    let err = list_error(ResponseTemplate::new(502).set_body_string("upstream timeout")).await;
    assert_eq!(err.to_string(), "upstream timeout");
}

#[tokio::test]
async fn test_empty_body_uses_status_text() {
    let err = list_error(ResponseTemplate::new(503)).await;
    assert_eq!(err.to_string(), "Service Unavailable");
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let app = test_app().await;
    app.login();

    // Nothing listens on port 1.
    let config = Config {
        api_url: "http://127.0.0.1:1".to_string(),
        ..app.config.clone()
    };
    let api = ApiClient::new(&config).unwrap();
    let events = EventService::new(api, app.session().clone(), RetryPolicy::from_config(&config));

    let err = events.list().await.unwrap_err();
    assert!(matches!(err, AppError::Network(_)));
}

#[test]
fn test_unauthorized_helpers() {
    assert!(AppError::Unauthorized.is_unauthorized());
    let api = AppError::Api {
        status: 401,
        message: "Invalid token".to_string(),
    };
    assert!(api.is_unauthorized());
    assert!(!AppError::Validation("x".to_string()).is_unauthorized());
}
