// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Editable draft of the current week's workout plan.

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{WeeklyWorkout, WeeklyWorkouts, WorkoutInput};

/// Name given to rest days.
pub const REST_DAY_NAME: &str = "Descanso";

/// Day names indexed by `day_of_week` (0 = Sunday).
pub const DAY_NAMES: [&str; 7] = [
    "Domingo", "Segunda", "Terça", "Quarta", "Quinta", "Sexta", "Sábado",
];

/// Display order: Monday first, Sunday last.
pub const DISPLAY_ORDER: [u8; 7] = [1, 2, 3, 4, 5, 6, 0];

/// One day of the draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySlot {
    /// Server id, present once the day has been saved
    pub id: Option<String>,
    pub day_of_week: u8,
    pub name: String,
    pub exercises: Vec<String>,
    pub is_rest: bool,
    pub completed: bool,
}

impl DaySlot {
    pub fn empty(day_of_week: u8) -> Self {
        Self {
            id: None,
            day_of_week,
            name: String::new(),
            exercises: Vec::new(),
            is_rest: false,
            completed: false,
        }
    }

    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[self.day_of_week as usize % 7]
    }

    /// Only saved training days can be marked done.
    pub fn can_toggle_complete(&self) -> bool {
        self.id.is_some() && !self.is_rest
    }

    /// Whether this day is sent on save.
    pub fn is_savable(&self) -> bool {
        self.is_rest || (!self.name.trim().is_empty() && !self.exercises.is_empty())
    }
}

impl From<WeeklyWorkout> for DaySlot {
    fn from(w: WeeklyWorkout) -> Self {
        Self {
            id: Some(w.id),
            day_of_week: w.day_of_week,
            name: w.name,
            exercises: w.exercises,
            is_rest: w.is_rest,
            completed: w.completed,
        }
    }
}

/// Seven day slots, indexed by `day_of_week`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDraft {
    pub week_start: String,
    days: Vec<DaySlot>,
}

impl Default for WeekDraft {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekDraft {
    /// A week with nothing planned.
    pub fn empty() -> Self {
        Self {
            week_start: String::new(),
            days: (0..7).map(DaySlot::empty).collect(),
        }
    }

    /// Build from the API response, filling missing days with empty slots.
    pub fn from_response(response: WeeklyWorkouts) -> Self {
        let mut draft = Self::empty();
        draft.week_start = response.week_start;
        for workout in response.workouts {
            match draft.days.get_mut(workout.day_of_week as usize) {
                Some(slot) => *slot = DaySlot::from(workout),
                None => tracing::warn!(
                    day_of_week = workout.day_of_week,
                    "Ignoring workout with invalid day"
                ),
            }
        }
        draft
    }

    pub fn day(&self, day_of_week: u8) -> Result<&DaySlot> {
        self.days
            .get(day_of_week as usize)
            .ok_or_else(|| invalid_day(day_of_week))
    }

    fn day_mut(&mut self, day_of_week: u8) -> Result<&mut DaySlot> {
        self.days
            .get_mut(day_of_week as usize)
            .ok_or_else(|| invalid_day(day_of_week))
    }

    /// Days indexed Sunday..Saturday.
    pub fn days(&self) -> &[DaySlot] {
        &self.days
    }

    /// Days Monday first.
    pub fn in_display_order(&self) -> impl Iterator<Item = &DaySlot> {
        DISPLAY_ORDER.iter().map(move |d| &self.days[*d as usize])
    }

    pub fn set_name(&mut self, day_of_week: u8, name: &str) -> Result<()> {
        self.day_mut(day_of_week)?.name = name.to_string();
        Ok(())
    }

    /// Append an empty exercise line; returns its index.
    pub fn add_exercise(&mut self, day_of_week: u8) -> Result<usize> {
        let day = self.day_mut(day_of_week)?;
        day.exercises.push(String::new());
        Ok(day.exercises.len() - 1)
    }

    pub fn update_exercise(&mut self, day_of_week: u8, index: usize, value: &str) -> Result<()> {
        let day = self.day_mut(day_of_week)?;
        let slot = day
            .exercises
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("No exercise #{}", index + 1)))?;
        *slot = value.to_string();
        Ok(())
    }

    pub fn remove_exercise(&mut self, day_of_week: u8, index: usize) -> Result<String> {
        let day = self.day_mut(day_of_week)?;
        if index >= day.exercises.len() {
            return Err(AppError::Validation(format!("No exercise #{}", index + 1)));
        }
        Ok(day.exercises.remove(index))
    }

    /// Drop every exercise of a day.
    pub fn clear_exercises(&mut self, day_of_week: u8) -> Result<()> {
        self.day_mut(day_of_week)?.exercises.clear();
        Ok(())
    }

    /// Mark a day as rest (or training).
    ///
    /// Turning rest on names the day "Descanso" and discards its exercises.
    /// Turning it off clears the name; discarded exercises do not come back.
    pub fn set_rest(&mut self, day_of_week: u8, is_rest: bool) -> Result<()> {
        let day = self.day_mut(day_of_week)?;
        if day.is_rest == is_rest {
            return Ok(());
        }
        day.is_rest = is_rest;
        if is_rest {
            day.name = REST_DAY_NAME.to_string();
            day.exercises.clear();
        } else {
            day.name.clear();
        }
        Ok(())
    }

    /// Body for `POST /workouts/weekly`: rest days plus named days with exercises.
    pub fn to_save_payload(&self) -> Vec<WorkoutInput> {
        self.days
            .iter()
            .filter(|d| d.is_savable())
            .map(|d| WorkoutInput {
                day_of_week: d.day_of_week,
                name: d.name.clone(),
                exercises: if d.is_rest {
                    Vec::new()
                } else {
                    d.exercises.clone()
                },
                is_rest: d.is_rest,
            })
            .collect()
    }
}

fn invalid_day(day_of_week: u8) -> AppError {
    AppError::Validation(format!(
        "day_of_week must be 0 (Sunday) to 6 (Saturday), got {}",
        day_of_week
    ))
}
