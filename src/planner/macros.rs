// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Steps 1 and 2 of the diet wizard: body profile and macro split.
//!
//! The energy figures themselves (TMB, TDEE, gram targets) always come from
//! the API; this module only decides what gets sent.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::{ActivityLevel, DietPlanInput, Goal, User};

/// Macro split in percent of calories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
}

impl MacroSplit {
    pub const fn new(protein: u32, carbs: u32, fat: u32) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    /// Preset split for a goal.
    pub fn preset(goal: Goal) -> Self {
        match goal {
            Goal::Cutting => Self::new(40, 30, 30),
            Goal::Maintenance => Self::new(30, 40, 30),
            Goal::Bulking => Self::new(30, 50, 20),
        }
    }

    /// Sum of the three fields; wide enough that no input can wrap.
    pub fn total(&self) -> u64 {
        u64::from(self.protein) + u64::from(self.carbs) + u64::from(self.fat)
    }

    pub fn is_complete(&self) -> bool {
        self.total() == 100
    }

    fn with(self, field: MacroField, value: u32) -> Self {
        match field {
            MacroField::Protein => Self {
                protein: value,
                ..self
            },
            MacroField::Carbs => Self {
                carbs: value,
                ..self
            },
            MacroField::Fat => Self { fat: value, ..self },
        }
    }
}

/// One of the three macro inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroField {
    Protein,
    Carbs,
    Fat,
}

impl MacroField {
    /// Suggested input range for a customized split.
    pub fn suggested_range(&self) -> (u32, u32) {
        match self {
            MacroField::Protein => (10, 60),
            MacroField::Carbs => (10, 70),
            MacroField::Fat => (10, 50),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MacroField::Protein => "protein",
            MacroField::Carbs => "carbs",
            MacroField::Fat => "fat",
        }
    }
}

/// Goal plus either the goal's preset split or a customized one.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroSelection {
    goal: Goal,
    use_custom: bool,
    custom: MacroSplit,
}

impl Default for MacroSelection {
    fn default() -> Self {
        Self::new(Goal::Maintenance)
    }
}

impl MacroSelection {
    /// Preset macros for `goal`.
    pub fn new(goal: Goal) -> Self {
        Self {
            goal,
            use_custom: false,
            custom: MacroSplit::preset(goal),
        }
    }

    /// Customized macros, taken as given (the sum is checked on submit).
    pub fn custom(goal: Goal, split: MacroSplit) -> Self {
        Self {
            goal,
            use_custom: true,
            custom: split,
        }
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn is_custom(&self) -> bool {
        self.use_custom
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = goal;
    }

    /// Switch between preset and custom macros.
    ///
    /// Leaving custom mode resets the custom split to the goal's preset.
    pub fn toggle_custom(&mut self) {
        if self.use_custom {
            self.custom = MacroSplit::preset(self.goal);
        }
        self.use_custom = !self.use_custom;
    }

    /// Change one custom field. Edits that push the total above 100 are
    /// rejected and leave the split untouched.
    pub fn set_custom(&mut self, field: MacroField, value: u32) -> Result<()> {
        let candidate = self.custom.with(field, value);
        if candidate.total() > 100 {
            return Err(AppError::Validation(format!(
                "Macros would add up to {}% (max 100%)",
                candidate.total()
            )));
        }
        self.custom = candidate;
        Ok(())
    }

    /// The split that would be submitted.
    pub fn effective(&self) -> MacroSplit {
        if self.use_custom {
            self.custom
        } else {
            MacroSplit::preset(self.goal)
        }
    }

    /// Whether the plan may be submitted.
    pub fn can_submit(&self) -> bool {
        !self.use_custom || self.custom.is_complete()
    }

    /// Custom fields outside their suggested range. Advisory only.
    pub fn range_warnings(&self) -> Vec<String> {
        if !self.use_custom {
            return Vec::new();
        }
        [
            (MacroField::Protein, self.custom.protein),
            (MacroField::Carbs, self.custom.carbs),
            (MacroField::Fat, self.custom.fat),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            let (min, max) = field.suggested_range();
            (value < min || value > max).then(|| {
                format!("{} {}% is outside {}-{}%", field.label(), value, min, max)
            })
        })
        .collect()
    }

    /// The split to submit, or a validation error if custom macros don't add up.
    pub fn validated(&self) -> Result<MacroSplit> {
        if !self.can_submit() {
            return Err(AppError::Validation(format!(
                "Macros must add up to 100% (currently {}%)",
                self.custom.total()
            )));
        }
        Ok(self.effective())
    }
}

/// Step 1 biometric inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BodyProfile {
    #[validate(range(min = 10, max = 120, message = "age must be between 10 and 120"))]
    pub age: u32,
    pub gender: String,
    /// cm
    #[validate(range(min = 50.0, max = 300.0, message = "height must be between 50 and 300 cm"))]
    pub height: f64,
    /// kg
    #[validate(range(min = 20.0, max = 500.0, message = "weight must be between 20 and 500 kg"))]
    pub weight: f64,
    pub activity_level: ActivityLevel,
}

impl Default for BodyProfile {
    fn default() -> Self {
        Self {
            age: 25,
            gender: "male".to_string(),
            height: 175.0,
            weight: 70.0,
            activity_level: ActivityLevel::ModeratelyActive,
        }
    }
}

impl BodyProfile {
    /// Defaults pre-filled from the cached profile where it has values.
    pub fn from_user(user: &User) -> Self {
        let defaults = Self::default();
        Self {
            gender: user
                .gender
                .clone()
                .filter(|g| !g.is_empty())
                .unwrap_or(defaults.gender),
            height: user.height.filter(|h| *h > 0.0).unwrap_or(defaults.height),
            weight: user.weight.filter(|w| *w > 0.0).unwrap_or(defaults.weight),
            ..defaults
        }
    }

    /// Combine with the macro choice into the calculation/plan request.
    pub fn plan_input(&self, selection: &MacroSelection) -> Result<DietPlanInput> {
        self.validate()?;
        let split = selection.validated()?;
        Ok(DietPlanInput {
            age: self.age,
            gender: self.gender.clone(),
            height: self.height,
            weight: self.weight,
            activity_level: self.activity_level,
            goal: selection.goal(),
            protein_percent: split.protein,
            carbs_percent: split.carbs,
            fat_percent: split.fat,
        })
    }
}
