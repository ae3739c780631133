// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Ativvo: client for the Ativvo fitness-tracking API
//!
//! This crate wraps the remote REST API (accounts, weekly workouts,
//! reminders, foods and diet plans) and holds the client-side planning
//! state: the diet macro wizard, meal totals and the weekly workout draft.

pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod services;
pub mod time_utils;

use config::Config;
use error::Result;
use models::DashboardSummary;
use services::{
    ApiClient, AuthService, DietService, EventService, FoodService, RetryPolicy, SessionStore,
    WorkoutService,
};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub auth: AuthService,
    pub workouts: WorkoutService,
    pub events: EventService,
    pub foods: FoodService,
    pub diet: DietService,
}

impl AppState {
    /// Wire up every service against the configured API.
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let session = SessionStore::new(&config.session_path);
        let retry = RetryPolicy::from_config(&config);

        Ok(Self {
            auth: AuthService::new(api.clone(), session.clone()),
            workouts: WorkoutService::new(api.clone(), session.clone(), retry),
            events: EventService::new(api.clone(), session.clone(), retry),
            foods: FoodService::new(api.clone(), session.clone()),
            diet: DietService::new(api, session.clone(), retry),
            session,
            config,
        })
    }

    /// Stat cards: weekly stats from the API plus the cached profile.
    pub async fn dashboard(&self) -> Result<DashboardSummary> {
        let stats = self.workouts.weekly_stats().await;
        let user = self.auth.current_user()?;
        Ok(DashboardSummary::new(&stats, user.as_ref()))
    }
}
