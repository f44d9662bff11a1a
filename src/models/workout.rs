// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout record and its derived fields.

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::models::{ActivityInput, Coords, Weather, WorkoutEdit, WorkoutInput};
use crate::time_utils::format_month_day;

/// Opaque workout identity.
///
/// The last ten digits of the millisecond clock followed by six random
/// digits, so two workouts created in the same tick still differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis().rem_euclid(10_000_000_000);
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("{millis:010}{suffix:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Variant-specific data, discriminated by `type` in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        /// Steps per minute
        #[serde(deserialize_with = "whole_cadence")]
        cadence: u32,
        /// Minutes per kilometer (derived)
        #[serde(default, deserialize_with = "nullable_f64")]
        pace: f64,
    },
    Cycling {
        /// Meters
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Kilometers per hour (derived)
        #[serde(default, deserialize_with = "nullable_f64")]
        speed: f64,
    },
}

impl Activity {
    /// Lowercase name, as stored in the `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            Activity::Running { .. } => "running",
            Activity::Cycling { .. } => "cycling",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Activity::Running { .. } => "Running",
            Activity::Cycling { .. } => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Activity::Running { .. } => "🏃‍♂️",
            Activity::Cycling { .. } => "🚴‍♀️",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Activity::Running { .. })
    }

    /// Cadence of a run or elevation gain of a ride.
    pub fn metric(&self) -> f64 {
        match self {
            Activity::Running { cadence, .. } => f64::from(*cadence),
            Activity::Cycling { elevation_gain, .. } => *elevation_gain,
        }
    }
}

/// One logged workout.
///
/// `id`, `coords` and `date` never change after construction. The derived
/// pace/speed is recomputed whenever distance, duration or the variant
/// metric changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    coords: Coords,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    #[serde(alias = "createdAt")]
    date: DateTime<Utc>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    weather: Option<Weather>,
    #[serde(default, alias = "interactionCount")]
    clicks: u32,
    #[serde(flatten)]
    activity: Activity,
}

impl Workout {
    /// Build a workout from form input. Invalid input never produces a record.
    pub fn new(input: &WorkoutInput) -> Result<Self> {
        input.validate()?;

        let activity = match input.activity {
            // Whole and in range: checked by validate()
            ActivityInput::Running { cadence } => Activity::Running {
                cadence: cadence as u32,
                pace: 0.0,
            },
            ActivityInput::Cycling { elevation_gain } => Activity::Cycling {
                elevation_gain,
                speed: 0.0,
            },
        };

        let mut workout = Self {
            id: WorkoutId::generate(),
            coords: input.coords,
            distance: input.distance,
            duration: input.duration,
            date: Utc::now(),
            description: None,
            location: None,
            weather: None,
            clicks: 0,
            activity,
        };
        workout.recompute();
        Ok(workout)
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    /// Pace in min/km, for runs.
    pub fn pace(&self) -> Option<f64> {
        match self.activity {
            Activity::Running { pace, .. } => Some(pace),
            Activity::Cycling { .. } => None,
        }
    }

    /// Speed in km/h, for rides.
    pub fn speed(&self) -> Option<f64> {
        match self.activity {
            Activity::Cycling { speed, .. } => Some(speed),
            Activity::Running { .. } => None,
        }
    }

    /// Recompute the derived pace or speed from the current inputs.
    pub fn recompute(&mut self) {
        match &mut self.activity {
            Activity::Running { pace, .. } => *pace = self.duration / self.distance,
            Activity::Cycling { speed, .. } => *speed = self.distance / (self.duration / 60.0),
        }
    }

    /// Set the description to "Running in Lisbon on Mar 5".
    ///
    /// Leaves the description unset when there is no location.
    pub fn build_description(&mut self, location: Option<&str>) {
        let Some(location) = location else {
            return;
        };
        self.description = Some(format!(
            "{} in {} on {}",
            self.activity.title(),
            location,
            format_month_day(self.date)
        ));
    }

    pub fn set_location(&mut self, location: String) {
        self.location = Some(location);
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = Some(weather);
    }

    /// Record one selection from the list.
    pub fn click(&mut self) {
        self.clicks += 1;
    }

    /// Overwrite distance, duration and the variant metric, then recompute.
    ///
    /// Nothing changes if the edit is invalid.
    pub fn apply_edit(&mut self, edit: &WorkoutEdit) -> Result<()> {
        edit.validate(self.activity.is_running())?;

        self.distance = edit.distance;
        self.duration = edit.duration;
        match &mut self.activity {
            Activity::Running { cadence, .. } => *cadence = edit.metric as u32,
            Activity::Cycling { elevation_gain, .. } => *elevation_gain = edit.metric,
        }
        self.recompute();
        Ok(())
    }

    /// Give a not-yet-registered workout a fresh identity.
    pub(crate) fn reroll_id(&mut self) {
        self.id = WorkoutId::generate();
    }
}

/// Derived values may have been stored as `null` (e.g. a NaN in an old blob);
/// they are recomputed on load anyway.
fn nullable_f64<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Blobs from the browser version accepted any positive cadence, so a
/// stored value may be fractional. Round it to whole steps.
fn whole_cadence<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let cadence = f64::deserialize(deserializer)?;
    if !cadence.is_finite() || cadence < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "cadence must be a positive number, got {cadence}"
        )));
    }
    // `as` saturates at u32::MAX
    Ok(cadence.round() as u32)
}
