// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent user-facing messages.

use crate::models::WorkoutId;

/// Application error type.
///
/// None of these are fatal: the registry reports them through the
/// [`Notifier`](crate::views::Notifier) and carries on.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Reverse geocoding failed: {0}")]
    Geocode(String),

    #[error("Weather lookup failed: {0}")]
    Weather(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored workouts are corrupt: {0}")]
    Corrupt(String),

    #[error("Workout {0} was deleted before it was registered")]
    Cancelled(WorkoutId),
}

impl AppError {
    /// Message shown when numeric form input is rejected.
    pub const POSITIVE_NUMBERS: &'static str = "Inputs must be positive numbers";

    /// Text handed to the message collaborator for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error came from one of the enrichment lookups.
    pub fn is_enrichment_error(&self) -> bool {
        matches!(self, AppError::Geocode(_) | AppError::Weather(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Corrupt(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, AppError>;
