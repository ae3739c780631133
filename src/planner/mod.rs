// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side planning state: the diet wizard, the weekly workout draft
//! and the dashboard agenda.
//!
//! Nothing here talks to the network; the services module persists the
//! results.

pub mod macros;
pub mod meals;
pub mod progress;
pub mod week;

pub use macros::{BodyProfile, MacroField, MacroSelection, MacroSplit};
pub use meals::{DraftFood, DraftMeal, MealPlanDraft, TargetCheck};
pub use progress::{DayAgenda, DeleteProgress};
pub use week::{DaySlot, WeekDraft};
