// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plans, meals and the calculation request/response.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;
use crate::models::Food;

/// Physical activity level, as accepted by `/diet/calculate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown activity level: {}", s)))
    }
}

/// Diet goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Cutting,
    Maintenance,
    Bulking,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Cutting => "cutting",
            Goal::Maintenance => "maintenance",
            Goal::Bulking => "bulking",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cutting" => Ok(Goal::Cutting),
            "maintenance" => Ok(Goal::Maintenance),
            "bulking" => Ok(Goal::Bulking),
            other => Err(AppError::Validation(format!("Unknown goal: {}", other))),
        }
    }
}

/// Body of `POST /diet/calculate` and `POST /diet/plans`.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DietPlanInput {
    #[validate(range(min = 10, max = 120, message = "age must be between 10 and 120"))]
    pub age: u32,
    pub gender: String,
    /// cm
    #[validate(range(min = 50.0, max = 300.0, message = "height must be between 50 and 300 cm"))]
    pub height: f64,
    /// kg
    #[validate(range(min = 20.0, max = 500.0, message = "weight must be between 20 and 500 kg"))]
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    #[validate(range(max = 100, message = "protein must be at most 100%"))]
    pub protein_percent: u32,
    #[validate(range(max = 100, message = "carbs must be at most 100%"))]
    pub carbs_percent: u32,
    #[validate(range(max = 100, message = "fat must be at most 100%"))]
    pub fat_percent: u32,
}

/// Server-computed energy and macro targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DietCalculation {
    pub tmb: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
}

/// A persisted diet plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlan {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub activity_level: String,
    pub tmb: f64,
    pub tdee: f64,
    pub goal: String,
    pub target_calories: f64,
    pub protein_percent: f64,
    pub carbs_percent: f64,
    pub fat_percent: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A meal inside a persisted plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub diet_plan_id: String,
    pub name: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub meal_foods: Vec<MealFood>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Join of a meal and a food with a quantity in grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealFood {
    pub id: String,
    pub meal_id: String,
    pub food_id: String,
    #[serde(default)]
    pub food: Option<Food>,
    pub quantity: f64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Body of `POST /diet/plans/{id}/meals`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeal {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub order: u32,
}

/// Body of `POST /diet/meals/{id}/foods`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMealFood {
    pub food_id: String,
    pub quantity: f64,
}
