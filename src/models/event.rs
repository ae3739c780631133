// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar events (reminders) shown on the dashboard.

use crate::time_utils::{format_date, format_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user-owned reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Date in `YYYY-MM-DD`
    pub event_date: String,
    /// Time in `HH:mm`
    pub event_time: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Body of `POST /events`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct NewEvent {
    #[validate(length(min = 1, max = 200, message = "title must not be empty"))]
    pub title: String,
    /// Optional on the form; sent as an empty string when absent
    pub description: String,
    pub event_date: String,
    pub event_time: String,
}

impl NewEvent {
    /// Build a reminder for the given day and time. The title is trimmed.
    pub fn new(title: &str, description: Option<&str>, date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.map(str::trim).unwrap_or_default().to_string(),
            event_date: format_date(date),
            event_time: format_time(time),
        }
    }
}

/// Response of `POST /events`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEvent {
    #[serde(default)]
    pub message: String,
    pub event: Event,
}

/// Generic `{ message }` acknowledgement returned by delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}
