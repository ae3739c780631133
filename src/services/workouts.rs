// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout plan: load, save, mark done, and the weekly stats.

use crate::error::{AppError, Result};
use crate::models::{ToggleResponse, WeeklyStats, WeeklyWorkouts, WorkoutInput};
use crate::planner::WeekDraft;
use crate::services::api::{path_segment, ApiClient};
use crate::services::retry::RetryPolicy;
use crate::services::session::SessionStore;

/// Workout plan calls.
#[derive(Clone)]
pub struct WorkoutService {
    api: ApiClient,
    session: SessionStore,
    retry: RetryPolicy,
}

impl WorkoutService {
    pub fn new(api: ApiClient, session: SessionStore, retry: RetryPolicy) -> Self {
        Self {
            api,
            session,
            retry,
        }
    }

    /// Current week's plan; the server decides which week that is.
    pub async fn get_weekly(&self) -> Result<WeeklyWorkouts> {
        let token = self.session.token()?;
        self.api.get_json("/workouts/weekly", Some(&token)).await
    }

    /// Plan as an editable draft, failing when the plan can't be read.
    pub async fn load_week(&self) -> Result<WeekDraft> {
        Ok(WeekDraft::from_response(self.get_weekly().await?))
    }

    /// Plan as an editable draft for display. Falls back to an empty week on
    /// failure, so never save what this returns.
    pub async fn load_draft(&self) -> WeekDraft {
        match self.get_weekly().await {
            Ok(response) => WeekDraft::from_response(response),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load weekly workouts, starting empty");
                WeekDraft::empty()
            }
        }
    }

    /// Replace the current week's plan.
    pub async fn save_weekly(&self, workouts: &[WorkoutInput]) -> Result<()> {
        let token = self.session.token()?;
        self.api
            .post_no_content("/workouts/weekly", Some(&token), workouts)
            .await?;
        tracing::info!(days = workouts.len(), "Weekly workouts saved");
        Ok(())
    }

    /// Save a draft and reload it so saved days get their server ids.
    pub async fn save_draft(&self, draft: &WeekDraft) -> Result<WeekDraft> {
        let payload = draft.to_save_payload();
        self.save_weekly(&payload).await?;
        Ok(WeekDraft::from_response(self.get_weekly().await?))
    }

    /// Load the week, apply `edit`, and save the result.
    ///
    /// Nothing is sent when the load or the edit fails; saving over an
    /// unreadable week would wipe the days that weren't shown.
    pub async fn update_week<F>(&self, edit: F) -> Result<WeekDraft>
    where
        F: FnOnce(&mut WeekDraft) -> Result<()>,
    {
        let mut draft = self.load_week().await?;
        edit(&mut draft)?;
        self.save_draft(&draft).await
    }

    /// Flip a workout's completed flag.
    pub async fn toggle_complete(&self, workout_id: &str) -> Result<bool> {
        if workout_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Save the week before marking workouts done".to_string(),
            ));
        }
        let token = self.session.token()?;
        let path = format!("/workouts/weekly/{}/toggle", path_segment(workout_id));
        let response: ToggleResponse = self.api.patch_json(&path, Some(&token)).await?;
        tracing::info!(workout_id, completed = response.completed, "Workout toggled");
        Ok(response.completed)
    }

    /// Weekly completion stats. Never fails; see [`WeeklyStats::default`].
    pub async fn weekly_stats(&self) -> WeeklyStats {
        let Some(token) = self.session.token_opt() else {
            tracing::warn!("No token found, skipping stats fetch");
            return WeeklyStats::default();
        };

        let api = &self.api;
        let token = token.as_str();
        self.retry
            .run_or("weekly_stats", WeeklyStats::default(), move || {
                api.get_json::<WeeklyStats>("/workouts/weekly/stats", Some(token))
            })
            .await
    }
}
