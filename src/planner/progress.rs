// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Delete-in-progress indicator and the per-day event list it updates.

use serde::Serialize;

use crate::models::Event;

/// Progress added per tick while a delete is pending.
pub const PROGRESS_STEP: u8 = 10;
/// Progress stops here until the server answers.
pub const PROGRESS_CEILING: u8 = 90;
/// Progress once the delete has succeeded.
pub const PROGRESS_DONE: u8 = 100;

/// Simulated progress of a pending delete, 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeleteProgress {
    value: u8,
}

impl DeleteProgress {
    pub fn value(&self) -> u8 {
        self.value
    }

    /// One tick: +10, never past 90 while the request is in flight.
    pub fn advance(&mut self) -> u8 {
        if self.value < PROGRESS_CEILING {
            self.value = (self.value + PROGRESS_STEP).min(PROGRESS_CEILING);
        }
        self.value
    }

    pub fn complete(&mut self) -> u8 {
        self.value = PROGRESS_DONE;
        self.value
    }

    /// Back to 0, used when the delete fails.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    pub fn is_complete(&self) -> bool {
        self.value == PROGRESS_DONE
    }
}

/// Events of a single selected day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAgenda {
    /// Day in `YYYY-MM-DD`
    pub date: String,
    events: Vec<Event>,
}

impl DayAgenda {
    pub fn new(date: impl Into<String>, events: Vec<Event>) -> Self {
        let mut events = events;
        events.sort_by(|a, b| a.event_time.cmp(&b.event_time));
        Self {
            date: date.into(),
            events,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.events.iter().any(|e| e.id == id)
    }

    /// Drop the event with the given id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        Some(self.events.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: &str, time: &str) -> Event {
        Event {
            id: id.to_string(),
            user_id: "u1".to_string(),
            title: format!("Evento {}", id),
            description: String::new(),
            event_date: "2024-01-15".to_string(),
            event_time: time.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_progress_caps_at_ninety_until_complete() {
        let mut progress = DeleteProgress::default();
        let ticks: Vec<u8> = (0..12).map(|_| progress.advance()).collect();
        assert_eq!(&ticks[..9], &[10, 20, 30, 40, 50, 60, 70, 80, 90]);
        assert!(ticks[9..].iter().all(|v| *v == 90));
        assert!(!progress.is_complete());

        assert_eq!(progress.complete(), 100);
        assert!(progress.is_complete());

        progress.reset();
        assert_eq!(progress.value(), 0);
    }

    #[test]
    fn test_agenda_sorted_and_remove() {
        let mut agenda = DayAgenda::new(
            "2024-01-15",
            vec![event("b", "18:00"), event("a", "07:30")],
        );
        assert_eq!(agenda.events()[0].id, "a");

        assert_eq!(agenda.remove("a").map(|e| e.id), Some("a".to_string()));
        assert!(!agenda.contains("a"));
        assert_eq!(agenda.len(), 1);
        assert!(agenda.remove("missing").is_none());
    }
}
