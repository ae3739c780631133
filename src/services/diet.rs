// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plans: calculation, persistence and meal editing.
//!
//! Saving a wizard result takes three sequential tiers of requests:
//! 1. Create the plan
//! 2. Create each meal under it, in order
//! 3. Attach each food to its meal
//!
//! The API offers no transaction and no plan delete, so a failure after
//! step 1 is reported as [`AppError::PartialSave`] and the created records
//! are left in place.

use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{
    DietCalculation, DietPlan, DietPlanInput, Meal, MealFood, MessageResponse, NewMeal,
    NewMealFood,
};
use crate::planner::MealPlanDraft;
use crate::services::api::{path_segment, ApiClient};
use crate::services::retry::RetryPolicy;
use crate::services::session::SessionStore;

/// Record of a completed multi-step save.
#[derive(Debug, Clone)]
pub struct SavedPlan {
    pub plan: DietPlan,
    pub meals: Vec<Meal>,
    pub foods_created: usize,
}

/// Diet calls.
#[derive(Clone)]
pub struct DietService {
    api: ApiClient,
    session: SessionStore,
    retry: RetryPolicy,
}

impl DietService {
    pub fn new(api: ApiClient, session: SessionStore, retry: RetryPolicy) -> Self {
        Self {
            api,
            session,
            retry,
        }
    }

    /// Ask the server for TMB/TDEE and macro targets.
    pub async fn calculate(&self, input: &DietPlanInput) -> Result<DietCalculation> {
        validate_input(input)?;
        let token = self.session.token()?;
        self.api
            .post_json("/diet/calculate", Some(&token), input)
            .await
    }

    /// Create a plan. The server makes it the active one.
    pub async fn create_plan(&self, input: &DietPlanInput) -> Result<DietPlan> {
        validate_input(input)?;
        let token = self.session.token()?;
        let plan: DietPlan = self.api.post_json("/diet/plans", Some(&token), input).await?;
        tracing::info!(plan_id = %plan.id, goal = %plan.goal, "Diet plan created");
        Ok(plan)
    }

    /// The active plan, or `None` when there is none or it cannot be fetched.
    pub async fn active_plan(&self) -> Option<DietPlan> {
        let Some(token) = self.session.token_opt() else {
            return None;
        };

        let api = &self.api;
        let token = token.as_str();
        self.retry
            .run_or("active_diet_plan", None, move || async move {
                match api
                    .get_json::<DietPlan>("/diet/plans/active", Some(token))
                    .await
                {
                    Ok(plan) => Ok(Some(plan)),
                    Err(e) if e.is_not_found() => Ok(None),
                    Err(e) => Err(e),
                }
            })
            .await
    }

    /// All plans of the user, newest first as returned by the API.
    pub async fn plans(&self) -> Result<Vec<DietPlan>> {
        let token = self.session.token()?;
        self.api.get_json("/diet/plans", Some(&token)).await
    }

    pub async fn create_meal(&self, plan_id: &str, meal: &NewMeal) -> Result<Meal> {
        if meal.name.trim().is_empty() {
            return Err(AppError::Validation("Meal name must not be empty".to_string()));
        }
        let token = self.session.token()?;
        let path = format!("/diet/plans/{}/meals", path_segment(plan_id));
        self.api.post_json(&path, Some(&token), meal).await
    }

    pub async fn add_food(&self, meal_id: &str, food: &NewMealFood) -> Result<MealFood> {
        if !(food.quantity > 0.0) {
            return Err(AppError::Validation(format!(
                "Quantity must be positive (got {})",
                food.quantity
            )));
        }
        let token = self.session.token()?;
        let path = format!("/diet/meals/{}/foods", path_segment(meal_id));
        self.api.post_json(&path, Some(&token), food).await
    }

    pub async fn remove_meal_food(&self, meal_food_id: &str) -> Result<MessageResponse> {
        let token = self.session.token()?;
        let path = format!("/diet/meal-foods/{}", path_segment(meal_food_id));
        self.api.delete_json(&path, Some(&token)).await
    }

    pub async fn delete_meal(&self, meal_id: &str) -> Result<MessageResponse> {
        let token = self.session.token()?;
        let path = format!("/diet/meals/{}", path_segment(meal_id));
        self.api.delete_json(&path, Some(&token)).await
    }

    /// Persist a wizard result: the plan, then its meals, then their foods.
    pub async fn save_plan(&self, input: &DietPlanInput, draft: &MealPlanDraft) -> Result<SavedPlan> {
        if draft.is_empty() {
            return Err(AppError::Validation("Add at least one meal".to_string()));
        }
        // Fail before anything is created when logged out.
        self.session.token()?;

        let plan = self.create_plan(input).await?;

        let mut meals = Vec::with_capacity(draft.meals().len());
        for draft_meal in draft.meals() {
            let new_meal = NewMeal {
                name: draft_meal.name.clone(),
                time: draft_meal.time.clone(),
                order: draft_meal.order,
            };
            match self.create_meal(&plan.id, &new_meal).await {
                Ok(meal) => meals.push(meal),
                Err(e) => return Err(partial_save(&plan, meals.len(), 0, e)),
            }
        }

        let mut foods_created = 0;
        for (draft_meal, meal) in draft.meals().iter().zip(&meals) {
            for draft_food in &draft_meal.foods {
                let new_food = NewMealFood {
                    food_id: draft_food.food.id.clone(),
                    quantity: draft_food.quantity,
                };
                match self.add_food(&meal.id, &new_food).await {
                    Ok(_) => foods_created += 1,
                    Err(e) => return Err(partial_save(&plan, meals.len(), foods_created, e)),
                }
            }
        }

        tracing::info!(
            plan_id = %plan.id,
            meals = meals.len(),
            foods = foods_created,
            "Diet plan saved"
        );
        Ok(SavedPlan {
            plan,
            meals,
            foods_created,
        })
    }
}

fn validate_input(input: &DietPlanInput) -> Result<()> {
    input.validate()?;
    let total = u64::from(input.protein_percent)
        + u64::from(input.carbs_percent)
        + u64::from(input.fat_percent);
    if total != 100 {
        return Err(AppError::Validation(format!(
            "Macro percentages must add up to 100% (currently {}%)",
            total
        )));
    }
    Ok(())
}

fn partial_save(plan: &DietPlan, meals_created: usize, foods_created: usize, cause: AppError) -> AppError {
    tracing::error!(
        plan_id = %plan.id,
        meals_created,
        foods_created,
        error = %cause,
        "Diet plan save stopped partway, plan left incomplete"
    );
    AppError::PartialSave {
        plan_id: plan.id.clone(),
        meals_created,
        foods_created,
        cause: Box::new(cause),
    }
}
