// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food records, TACO reference foods and nutrition arithmetic.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use validator::Validate;

/// Calories and macronutrients, in kcal and grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Nutrition {
    /// Scale every value by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
        }
    }
}

impl Add for Nutrition {
    type Output = Nutrition;

    fn add(self, rhs: Nutrition) -> Nutrition {
        Nutrition {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fat: self.fat + rhs.fat,
        }
    }
}

impl AddAssign for Nutrition {
    fn add_assign(&mut self, rhs: Nutrition) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Nutrition>>(iter: I) -> Self {
        iter.fold(Nutrition::default(), Add::add)
    }
}

/// A food from the user's database; macro values are per `serving_size` grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: String,
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// Reference serving in grams
    pub serving_size: f64,
    #[serde(default)]
    pub created_by_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Food {
    /// Per-serving values.
    pub fn per_serving(&self) -> Nutrition {
        Nutrition {
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
        }
    }

    /// Nutrition for `quantity` grams: per-serving × quantity / serving_size.
    pub fn nutrition_for(&self, quantity: f64) -> Nutrition {
        let multiplier = quantity / self.serving_size;
        self.per_serving().scaled(multiplier)
    }
}

/// Body of `POST /foods`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewFood {
    #[validate(length(min = 1, max = 200, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "calories must not be negative"))]
    pub calories: f64,
    #[validate(range(min = 0.0, message = "protein must not be negative"))]
    pub protein: f64,
    #[validate(range(min = 0.0, message = "carbs must not be negative"))]
    pub carbs: f64,
    #[validate(range(min = 0.0, message = "fat must not be negative"))]
    pub fat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0, message = "serving_size must be positive"))]
    pub serving_size: Option<f64>,
}

/// Response of `GET /foods`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodPage {
    #[serde(default)]
    pub foods: Vec<Food>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// A food from the TACO reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TacoFood {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    pub serving_size: f64,
    pub taco_id: u64,
    #[serde(default)]
    pub source: String,
}

/// Response of `GET /foods/taco/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct TacoSearchResult {
    #[serde(default)]
    pub foods: Vec<TacoFood>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub source: String,
}

impl TacoSearchResult {
    /// Result returned for a blank query without asking the API.
    pub fn empty() -> Self {
        Self {
            foods: Vec::new(),
            total: 0,
            source: "TACO".to_string(),
        }
    }
}

/// Response of `POST /foods/taco/import`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ImportedFood {
    pub food: Food,
}
