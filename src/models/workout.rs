// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly workout plan records.

use serde::{Deserialize, Deserializer, Serialize};

/// One day of the user's weekly plan as stored by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyWorkout {
    pub id: String,
    /// 0 = Sunday ... 6 = Saturday
    pub day_of_week: u8,
    #[serde(default)]
    pub name: String,
    /// Ordered exercise descriptions (e.g. "Supino reto 4x12")
    #[serde(default, deserialize_with = "deserialize_exercises")]
    pub exercises: Vec<String>,
    #[serde(default)]
    pub is_rest: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub week_start: String,
}

/// Response of `GET /workouts/weekly`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyWorkouts {
    #[serde(default)]
    pub workouts: Vec<WeeklyWorkout>,
    #[serde(default)]
    pub week_start: String,
}

/// One element of the `POST /workouts/weekly` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutInput {
    pub day_of_week: u8,
    pub name: String,
    pub exercises: Vec<String>,
    pub is_rest: bool,
}

/// Response of `PATCH /workouts/weekly/{id}/toggle`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ToggleResponse {
    pub completed: bool,
}

/// Exercises arrive either as a JSON array or as a JSON-encoded string of one.
fn deserialize_exercises<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        serde_json::Value::String(raw) => serde_json::from_str(&raw).unwrap_or_default(),
        _ => Vec::new(),
    })
}
