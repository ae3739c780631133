// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reminders: list, per-day view, create and delete.

use std::time::Duration;

use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{CreatedEvent, Event, MessageResponse, NewEvent};
use crate::planner::{DayAgenda, DeleteProgress};
use crate::services::api::{path_segment, ApiClient};
use crate::services::retry::RetryPolicy;
use crate::services::session::SessionStore;

/// Interval between progress ticks while a delete is pending.
pub const DEFAULT_PROGRESS_TICK: Duration = Duration::from_millis(100);

/// Event calls.
#[derive(Clone)]
pub struct EventService {
    api: ApiClient,
    session: SessionStore,
    retry: RetryPolicy,
    progress_tick: Duration,
}

impl EventService {
    pub fn new(api: ApiClient, session: SessionStore, retry: RetryPolicy) -> Self {
        Self {
            api,
            session,
            retry,
            progress_tick: DEFAULT_PROGRESS_TICK,
        }
    }

    pub fn with_progress_tick(mut self, tick: Duration) -> Self {
        self.progress_tick = tick;
        self
    }

    /// Every event of the user.
    pub async fn list(&self) -> Result<Vec<Event>> {
        let token = self.session.token()?;
        self.api.get_json("/events", Some(&token)).await
    }

    /// Events on one day (`YYYY-MM-DD`). Empty on any failure.
    pub async fn by_date(&self, date: &str) -> Vec<Event> {
        let Some(token) = self.session.token_opt() else {
            tracing::warn!("No token found, skipping events fetch");
            return Vec::new();
        };
        let api = &self.api;
        let token = token.as_str();
        let query: &[(&str, String)] = &[("date", date.to_string())];

        self.retry
            .run_or("events_by_date", Vec::new(), move || {
                api.get_json_with_query::<Vec<Event>>("/events/by-date", Some(token), query)
            })
            .await
    }

    /// The day's events, ready for display and deletion.
    pub async fn agenda(&self, date: &str) -> DayAgenda {
        DayAgenda::new(date, self.by_date(date).await)
    }

    pub async fn create(&self, event: &NewEvent) -> Result<Event> {
        if event.title.trim().is_empty() {
            return Err(AppError::Validation("title must not be empty".to_string()));
        }
        event.validate()?;

        let token = self.session.token()?;
        let created: CreatedEvent = self.api.post_json("/events", Some(&token), event).await?;
        tracing::info!(
            event_id = %created.event.id,
            date = %created.event.event_date,
            "Event created"
        );
        Ok(created.event)
    }

    pub async fn delete(&self, event_id: &str) -> Result<MessageResponse> {
        let token = self.session.token()?;
        let path = format!("/events/{}", path_segment(event_id));
        let response = self.api.delete_json(&path, Some(&token)).await?;
        tracing::info!(event_id, "Event deleted");
        Ok(response)
    }

    /// Delete an event from `agenda`, reporting progress as it goes.
    ///
    /// `on_progress` sees 10, 20, ... up to 90 while the request is
    /// outstanding, then 100 once it succeeds, after which the event is
    /// removed from the agenda. On failure it sees 0 and the agenda is left
    /// untouched.
    pub async fn delete_with_progress<F>(
        &self,
        agenda: &mut DayAgenda,
        event_id: &str,
        mut on_progress: F,
    ) -> Result<()>
    where
        F: FnMut(u8),
    {
        let mut progress = DeleteProgress::default();
        let mut ticker = tokio::time::interval(self.progress_tick);
        // The first tick completes immediately.
        ticker.tick().await;

        let delete = self.delete(event_id);
        tokio::pin!(delete);

        let result = loop {
            tokio::select! {
                biased;
                result = &mut delete => break result,
                _ = ticker.tick() => on_progress(progress.advance()),
            }
        };

        match result {
            Ok(_) => {
                on_progress(progress.complete());
                agenda.remove(event_id);
                Ok(())
            }
            Err(e) => {
                progress.reset();
                on_progress(progress.value());
                tracing::error!(event_id, error = %e, "Failed to delete event");
                Err(e)
            }
        }
    }
}
