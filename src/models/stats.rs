// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout statistics and the dashboard cards derived from them.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Weekly cardio target in minutes.
pub const CARDIO_GOAL_MINUTES: f64 = 150.0;

/// Emoji shown when the API gives none.
pub const DEFAULT_STATS_EMOJI: &str = "💪";

/// Response of `GET /workouts/weekly/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Workouts completed this week
    #[serde(default)]
    pub completed: u32,
    /// Weekly workout goal
    #[serde(default)]
    pub goal: u32,
    #[serde(default = "default_emoji")]
    pub emoji: String,
}

fn default_emoji() -> String {
    DEFAULT_STATS_EMOJI.to_string()
}

impl Default for WeeklyStats {
    /// The fallback used when stats cannot be fetched.
    fn default() -> Self {
        Self {
            completed: 0,
            goal: 0,
            emoji: default_emoji(),
        }
    }
}

impl WeeklyStats {
    /// Completion percentage, capped at 100. Zero when there is no goal.
    pub fn progress_percent(&self) -> f64 {
        if self.goal == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.goal as f64 * 100.0).min(100.0)
    }

    /// Workouts still needed to reach the goal.
    pub fn remaining(&self) -> u32 {
        self.goal.saturating_sub(self.completed)
    }
}

/// Figures shown on the dashboard stat cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub workouts_completed: u32,
    pub workouts_goal: u32,
    pub workouts_remaining: u32,
    pub weekly_progress_percent: f64,
    pub emoji: String,
    pub cardio_minutes: u32,
    pub cardio_progress_percent: f64,
}

impl DashboardSummary {
    pub fn new(stats: &WeeklyStats, user: Option<&User>) -> Self {
        let cardio_minutes = user.and_then(|u| u.cardio_time).unwrap_or(0);
        let cardio_progress_percent =
            (cardio_minutes as f64 / CARDIO_GOAL_MINUTES * 100.0).min(100.0);

        Self {
            workouts_completed: stats.completed,
            workouts_goal: stats.goal,
            workouts_remaining: stats.remaining(),
            weekly_progress_percent: stats.progress_percent(),
            emoji: stats.emoji.clone(),
            cardio_minutes,
            cardio_progress_percent,
        }
    }
}
