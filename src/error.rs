// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the API client, planners and CLI.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No session token is available; raised before any network call.
    #[error("No authentication token found")]
    Unauthorized,

    /// The API answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// A multi-step diet save stopped after the plan was already created.
    #[error(
        "Diet plan {plan_id} was only partially saved ({meals_created} meals, \
         {foods_created} foods created): {cause}"
    )]
    PartialSave {
        plan_id: String,
        meals_created: usize,
        foods_created: usize,
        cause: Box<AppError>,
    },

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status code of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for a missing local token or a 401 from the API.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized) || self.status() == Some(401)
    }

    /// True when the API reported that the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Result type alias used across the crate
pub type Result<T> = std::result::Result<T, AppError>;
