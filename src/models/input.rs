// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Raw form input for creating and editing workouts.

use crate::error::{AppError, Result};
use crate::models::Coords;

/// Variant-specific form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityInput {
    /// Steps per minute; must be a whole number.
    Running { cadence: f64 },
    /// Meters climbed.
    Cycling { elevation_gain: f64 },
}

/// Values submitted from the new-workout form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub coords: Coords,
    /// Kilometers
    pub distance: f64,
    /// Minutes
    pub duration: f64,
    pub activity: ActivityInput,
}

impl WorkoutInput {
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self {
            coords,
            distance,
            duration,
            activity: ActivityInput::Running { cadence },
        }
    }

    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self {
            coords,
            distance,
            duration,
            activity: ActivityInput::Cycling { elevation_gain },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.coords.is_finite() {
            return Err(AppError::Validation("Invalid map position".to_string()));
        }
        match self.activity {
            ActivityInput::Running { cadence } => {
                check_positive(&[self.distance, self.duration, cadence])?;
                check_whole(cadence)
            }
            ActivityInput::Cycling { elevation_gain } => {
                check_positive(&[self.distance, self.duration, elevation_gain])
            }
        }
    }
}

/// Values submitted from an inline edit. `metric` is the cadence of a run
/// or the elevation gain of a ride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutEdit {
    pub distance: f64,
    pub duration: f64,
    pub metric: f64,
}

impl WorkoutEdit {
    pub fn new(distance: f64, duration: f64, metric: f64) -> Self {
        Self {
            distance,
            duration,
            metric,
        }
    }

    pub fn validate(&self, running: bool) -> Result<()> {
        check_positive(&[self.distance, self.duration, self.metric])?;
        if running {
            check_whole(self.metric)?;
        }
        Ok(())
    }
}

fn check_positive(values: &[f64]) -> Result<()> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(AppError::Validation(AppError::POSITIVE_NUMBERS.to_string()))
    }
}

fn check_whole(cadence: f64) -> Result<()> {
    if cadence.fract() == 0.0 && cadence <= f64::from(u32::MAX) {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Cadence must be a whole number of steps per minute".to_string(),
        ))
    }
}
