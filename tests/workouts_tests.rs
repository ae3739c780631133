// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use ativvo::error::AppError;
use ativvo::planner::week::REST_DAY_NAME;
use common::test_app;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn week_json() -> serde_json::Value {
    json!({
        "week_start": "2024-01-14",
        "workouts": [
            {
                "id": "w-mon",
                "day_of_week": 1,
                "name": "Peito",
                "exercises": "[\"Supino 4x10\",\"Crucifixo 3x12\"]",
                "is_rest": false,
                "completed": true,
                "week_start": "2024-01-14"
            },
            {
                "id": "w-sun",
                "day_of_week": 0,
                "name": "Descanso",
                "exercises": [],
                "is_rest": true,
                "completed": false,
                "week_start": "2024-01-14"
            }
        ]
    })
}

#[tokio::test]
async fn test_load_draft_fills_week() {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(week_json()))
        .mount(&app.server)
        .await;

    let draft = app.state.workouts.load_draft().await;
    assert_eq!(draft.week_start, "2024-01-14");
    assert_eq!(draft.days().len(), 7);

    let monday = draft.day(1).unwrap();
    assert_eq!(monday.exercises, vec!["Supino 4x10", "Crucifixo 3x12"]);
    assert!(monday.completed);
    assert!(monday.can_toggle_complete());
    assert!(!draft.day(0).unwrap().can_toggle_complete());
    assert!(draft.day(3).unwrap().id.is_none());
}

#[tokio::test]
async fn test_load_draft_failure_gives_empty_week() {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let draft = app.state.workouts.load_draft().await;
    assert!(draft.days().iter().all(|d| d.id.is_none() && d.name.is_empty()));
}

#[tokio::test]
async fn test_update_week_never_saves_over_a_failed_load() {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app
        .state
        .workouts
        .update_week(|draft| draft.set_rest(5, true))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(app.state.workouts.load_week().await.is_err());
}

#[tokio::test]
async fn test_update_week_edits_the_loaded_week() {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(week_json()))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/workouts/weekly"))
        .and(body_json(json!([
            {"day_of_week": 0, "name": REST_DAY_NAME, "exercises": [], "is_rest": true},
            {"day_of_week": 1, "name": "Costas", "exercises": ["Remada 4x10"], "is_rest": false}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "saved"})))
        .expect(1)
        .mount(&app.server)
        .await;

    app.state
        .workouts
        .update_week(|draft| {
            draft.set_name(1, "Costas")?;
            draft.clear_exercises(1)?;
            let index = draft.add_exercise(1)?;
            draft.update_exercise(1, index, "Remada 4x10")
        })
        .await
        .unwrap();

    // A failing edit sends nothing; the POST above stays at one call.
    let err = app
        .state
        .workouts
        .update_week(|draft| draft.set_name(9, "Nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_save_sends_only_complete_days() {
    let app = test_app().await;
    app.login();

    Mock::given(method("GET"))
        .and(path("/workouts/weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(week_json()))
        .mount(&app.server)
        .await;

    let mut draft = app.state.workouts.load_draft().await;
    // Wednesday has a name but no exercises, so it is not sent.
    draft.set_name(3, "Pernas").unwrap();
    // Friday becomes a rest day.
    draft.set_rest(5, true).unwrap();

    Mock::given(method("POST"))
        .and(path("/workouts/weekly"))
        .and(body_json(json!([
            {"day_of_week": 0, "name": REST_DAY_NAME, "exercises": [], "is_rest": true},
            {
                "day_of_week": 1,
                "name": "Peito",
                "exercises": ["Supino 4x10", "Crucifixo 3x12"],
                "is_rest": false
            },
            {"day_of_week": 5, "name": REST_DAY_NAME, "exercises": [], "is_rest": true}
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "saved"})))
        .expect(1)
        .mount(&app.server)
        .await;

    let saved = app.state.workouts.save_draft(&draft).await.unwrap();
    assert_eq!(saved.day(1).unwrap().id.as_deref(), Some("w-mon"));
}

#[tokio::test]
async fn test_toggle_complete() {
    let app = test_app().await;
    app.login();

    Mock::given(method("PATCH"))
        .and(path("/workouts/weekly/w-mon/toggle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"completed": false})))
        .expect(1)
        .mount(&app.server)
        .await;

    assert!(!app.state.workouts.toggle_complete("w-mon").await.unwrap());

    let err = app.state.workouts.toggle_complete("").await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_save_requires_login() {
    let app = test_app().await;

    let err = app.state.workouts.save_weekly(&[]).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}
