// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the Ativvo API.

pub mod diet;
pub mod event;
pub mod food;
pub mod stats;
pub mod user;
pub mod workout;

pub use diet::{
    ActivityLevel, DietCalculation, DietPlan, DietPlanInput, Goal, Meal, MealFood, NewMeal,
    NewMealFood,
};
pub use event::{CreatedEvent, Event, MessageResponse, NewEvent};
pub use food::{Food, FoodPage, NewFood, Nutrition, TacoFood, TacoSearchResult};
pub use stats::{DashboardSummary, WeeklyStats};
pub use user::{AuthResponse, ProfileUpdate, User};
pub use workout::{ToggleResponse, WeeklyWorkout, WeeklyWorkouts, WorkoutInput};
