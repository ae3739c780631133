// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use ativvo::error::AppError;
use ativvo::models::{Food, Goal};
use ativvo::planner::{BodyProfile, MacroSelection, MacroSplit, MealPlanDraft};
use common::{food_json, test_app, TestApp};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn plan_json() -> serde_json::Value {
    json!({
        "id": "p1",
        "user_id": "u1",
        "age": 25,
        "gender": "male",
        "height": 175.0,
        "weight": 70.0,
        "activity_level": "moderately_active",
        "tmb": 1673.75,
        "tdee": 2594.31,
        "goal": "cutting",
        "target_calories": 2094.31,
        "protein_percent": 40.0,
        "carbs_percent": 30.0,
        "fat_percent": 30.0,
        "protein_grams": 209.4,
        "carbs_grams": 157.1,
        "fat_grams": 69.8,
        "is_active": true
    })
}

fn meal_json(id: &str, name: &str, order: u32) -> serde_json::Value {
    json!({"id": id, "diet_plan_id": "p1", "name": name, "time": "", "order": order})
}

fn food(id: &str, calories: f64, serving_size: f64) -> Food {
    serde_json::from_value(food_json(id, id, calories, serving_size)).unwrap()
}

fn cutting_input() -> ativvo::models::DietPlanInput {
    BodyProfile::default()
        .plan_input(&MacroSelection::new(Goal::Cutting))
        .unwrap()
}

fn two_meal_draft() -> MealPlanDraft {
    let mut draft = MealPlanDraft::new();
    let breakfast = draft.add_meal("Café da manhã", Some("07:00")).unwrap();
    draft.add_food(breakfast, food("oat", 150.0, 100.0), 200.0).unwrap();
    draft.add_food(breakfast, food("egg", 70.0, 50.0), 100.0).unwrap();
    let lunch = draft.add_meal("Almoço", None).unwrap();
    draft.add_food(lunch, food("rice", 128.0, 100.0), 150.0).unwrap();
    draft
}

async fn mount_plan_and_meals(app: &TestApp) {
    Mock::given(method("POST"))
        .and(path("/diet/plans"))
        .and(body_partial_json(json!({
            "goal": "cutting",
            "activity_level": "moderately_active",
            "protein_percent": 40,
            "carbs_percent": 30,
            "fat_percent": 30
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(plan_json()))
        .expect(1)
        .mount(&app.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/diet/plans/p1/meals"))
        .and(body_json(json!({"name": "Café da manhã", "time": "07:00", "order": 1})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(meal_json("m1", "Café da manhã", 1)),
        )
        .expect(1)
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn test_calculate_sends_plan_input() {
    let app = test_app().await;
    app.login();

    Mock::given(method("POST"))
        .and(path("/diet/calculate"))
        .and(body_json(json!({
            "age": 25,
            "gender": "male",
            "height": 175.0,
            "weight": 70.0,
            "activity_level": "moderately_active",
            "goal": "cutting",
            "protein_percent": 40,
            "carbs_percent": 30,
            "fat_percent": 30
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tmb": 1673.75, "tdee": 2594.31, "target_calories": 2094.31,
            "protein_grams": 209.4, "carbs_grams": 157.1, "fat_grams": 69.8
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let calc = app.state.diet.calculate(&cutting_input()).await.unwrap();
    assert_eq!(calc.target_calories, 2094.31);
}

#[tokio::test]
async fn test_macros_must_total_100_before_any_request() {
    let app = test_app().await;
    app.login();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let mut input = cutting_input();
    input.fat_percent = 25;
    let err = app.state.diet.calculate(&input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let selection = MacroSelection::custom(Goal::Bulking, MacroSplit::new(30, 30, 30));
    assert!(BodyProfile::default().plan_input(&selection).is_err());
}

#[tokio::test]
async fn test_oversized_percent_is_rejected_before_any_request() {
    let app = test_app().await;
    app.login();

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.server)
        .await;

    let mut input = cutting_input();
    input.protein_percent = u32::MAX;
    input.carbs_percent = 1;
    input.fat_percent = 100;
    let err = app.state.diet.calculate(&input).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    let err = app
        .state
        .diet
        .save_plan(&input, &two_meal_draft())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_save_plan_creates_all_tiers() {
    let app = test_app().await;
    app.login();
    mount_plan_and_meals(&app).await;

    Mock::given(method("POST"))
        .and(path("/diet/plans/p1/meals"))
        .and(body_json(json!({"name": "Almoço", "order": 2})))
        .respond_with(ResponseTemplate::new(201).set_body_json(meal_json("m2", "Almoço", 2)))
        .expect(1)
        .mount(&app.server)
        .await;

    let meal_food = |id: &str, meal: &str, food: &str, qty: f64| {
        json!({"id": id, "meal_id": meal, "food_id": food, "quantity": qty})
    };
    Mock::given(method("POST"))
        .and(path("/diet/meals/m1/foods"))
        .respond_with(ResponseTemplate::new(201).set_body_json(meal_food("mf", "m1", "oat", 200.0)))
        .expect(2)
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/diet/meals/m2/foods"))
        .and(body_json(json!({"food_id": "rice", "quantity": 150.0})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(meal_food("mf3", "m2", "rice", 150.0)),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let saved = app
        .state
        .diet
        .save_plan(&cutting_input(), &two_meal_draft())
        .await
        .unwrap();
    assert_eq!(saved.plan.id, "p1");
    assert_eq!(saved.meals.len(), 2);
    assert_eq!(saved.foods_created, 3);
}

#[tokio::test]
async fn test_save_plan_reports_partial_failure() {
    let app = test_app().await;
    app.login();
    mount_plan_and_meals(&app).await;

    Mock::given(method("POST"))
        .and(path("/diet/plans/p1/meals"))
        .and(body_partial_json(json!({"name": "Almoço"})))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/diet/meals/m1/foods"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&app.server)
        .await;

    let err = app
        .state
        .diet
        .save_plan(&cutting_input(), &two_meal_draft())
        .await
        .unwrap_err();

    match err {
        AppError::PartialSave {
            plan_id,
            meals_created,
            foods_created,
            cause,
        } => {
            assert_eq!(plan_id, "p1");
            assert_eq!(meals_created, 1);
            assert_eq!(foods_created, 0);
            assert_eq!(cause.to_string(), "db down");
        }
        other => panic!("expected PartialSave, got {:?}", other),
    }
}

#[tokio::test]
async fn test_save_plan_needs_a_meal() {
    let app = test_app().await;
    app.login();

    let err = app
        .state
        .diet
        .save_plan(&cutting_input(), &MealPlanDraft::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_meal_editing_endpoints() {
    let app = test_app().await;
    app.login();

    Mock::given(method("DELETE"))
        .and(path("/diet/meal-foods/mf1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Food removed"})))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/diet/meals/m1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Meal deleted"})))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/diet/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([plan_json()])))
        .expect(1)
        .mount(&app.server)
        .await;

    let removed = app.state.diet.remove_meal_food("mf1").await.unwrap();
    assert_eq!(removed.message, "Food removed");
    app.state.diet.delete_meal("m1").await.unwrap();
    let plans = app.state.diet.plans().await.unwrap();
    assert!(plans[0].is_active);
}
