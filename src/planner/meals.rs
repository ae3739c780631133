// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Step 3 of the diet wizard: meals assembled locally before saving.
//!
//! Totals are recomputed from the lists on every call and never rounded;
//! rounding is left to whoever displays them.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{DietCalculation, Food, Nutrition};

/// Default quantity offered when adding a food, in grams.
pub const DEFAULT_QUANTITY_GRAMS: f64 = 100.0;

/// Day totals above target × this factor are flagged.
pub const TARGET_TOLERANCE: f64 = 1.10;

/// A food with the quantity eaten.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftFood {
    pub food: Food,
    /// grams
    pub quantity: f64,
}

impl DraftFood {
    pub fn nutrition(&self) -> Nutrition {
        self.food.nutrition_for(self.quantity)
    }
}

/// A meal that has not been saved yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftMeal {
    pub name: String,
    pub time: Option<String>,
    /// Position in the plan (1-based)
    pub order: u32,
    pub foods: Vec<DraftFood>,
}

impl DraftMeal {
    pub fn totals(&self) -> Nutrition {
        self.foods.iter().map(DraftFood::nutrition).sum()
    }
}

/// Which day totals exceed their target by more than the tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TargetCheck {
    pub calories: bool,
    pub protein: bool,
    pub carbs: bool,
    pub fat: bool,
}

impl TargetCheck {
    pub fn any(&self) -> bool {
        self.calories || self.protein || self.carbs || self.fat
    }
}

/// The meals of a plan being assembled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealPlanDraft {
    meals: Vec<DraftMeal>,
}

impl MealPlanDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meals(&self) -> &[DraftMeal] {
        &self.meals
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Append a meal; returns its index.
    pub fn add_meal(&mut self, name: &str, time: Option<&str>) -> Result<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Meal name must not be empty".to_string()));
        }

        let order = self.meals.len() as u32 + 1;
        self.meals.push(DraftMeal {
            name: name.to_string(),
            time: time.map(str::trim).filter(|t| !t.is_empty()).map(String::from),
            order,
            foods: Vec::new(),
        });
        Ok(self.meals.len() - 1)
    }

    /// Remove a meal and everything in it; later meals move up.
    pub fn remove_meal(&mut self, meal_index: usize) -> Result<DraftMeal> {
        if meal_index >= self.meals.len() {
            return Err(no_such_meal(meal_index));
        }
        let removed = self.meals.remove(meal_index);
        for (i, meal) in self.meals.iter_mut().enumerate() {
            meal.order = i as u32 + 1;
        }
        Ok(removed)
    }

    /// Add `quantity` grams of `food` to a meal.
    pub fn add_food(&mut self, meal_index: usize, food: Food, quantity: f64) -> Result<()> {
        if !(quantity > 0.0) {
            return Err(AppError::Validation(format!(
                "Quantity must be positive (got {})",
                quantity
            )));
        }
        if !(food.serving_size > 0.0) {
            return Err(AppError::Validation(format!(
                "Food '{}' has no usable serving size",
                food.name
            )));
        }

        let meal = self
            .meals
            .get_mut(meal_index)
            .ok_or_else(|| no_such_meal(meal_index))?;
        meal.foods.push(DraftFood { food, quantity });
        Ok(())
    }

    pub fn remove_food(&mut self, meal_index: usize, food_index: usize) -> Result<DraftFood> {
        let meal = self
            .meals
            .get_mut(meal_index)
            .ok_or_else(|| no_such_meal(meal_index))?;
        if food_index >= meal.foods.len() {
            return Err(AppError::Validation(format!(
                "Meal '{}' has no food #{}",
                meal.name,
                food_index + 1
            )));
        }
        Ok(meal.foods.remove(food_index))
    }

    /// Sum of all meal totals.
    pub fn day_totals(&self) -> Nutrition {
        self.meals.iter().map(DraftMeal::totals).sum()
    }

    /// Flag day totals above 110% of the server targets. Never blocks saving.
    pub fn check_targets(&self, targets: &DietCalculation) -> TargetCheck {
        let totals = self.day_totals();
        let over = |value: f64, target: f64| value > target * TARGET_TOLERANCE;
        TargetCheck {
            calories: over(totals.calories, targets.target_calories),
            protein: over(totals.protein, targets.protein_grams),
            carbs: over(totals.carbs, targets.carbs_grams),
            fat: over(totals.fat, targets.fat_grams),
        }
    }
}

fn no_such_meal(index: usize) -> AppError {
    AppError::Validation(format!("No meal #{}", index + 1))
}
