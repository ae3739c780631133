// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - typed access to the Ativvo API.

pub mod api;
pub mod auth;
pub mod diet;
pub mod events;
pub mod foods;
pub mod retry;
pub mod session;
pub mod workouts;

pub use api::ApiClient;
pub use auth::AuthService;
pub use diet::{DietService, SavedPlan};
pub use events::EventService;
pub use foods::FoodService;
pub use retry::RetryPolicy;
pub use session::{Session, SessionStore};
pub use workouts::WorkoutService;
