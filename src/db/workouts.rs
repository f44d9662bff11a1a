// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The workout collection as one JSON array under one fixed key.
//!
//! Every field is stored, derived ones included. On load the variant is
//! rebuilt from its `type` discriminant, enrichment results pass through
//! untouched, and pace/speed are recomputed.

use crate::config::STORAGE_KEY;
use crate::db::KeyValueStore;
use crate::error::Result;
use crate::models::Workout;

/// Persistence adapter for the workout collection.
#[derive(Debug, Clone)]
pub struct WorkoutStore<S> {
    backend: S,
}

impl<S: KeyValueStore> WorkoutStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Serialize the full ordered collection, replacing any prior value.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let json = serde_json::to_string(workouts)?;
        self.backend.set(STORAGE_KEY, &json)?;
        tracing::debug!(count = workouts.len(), "Saved workouts");
        Ok(())
    }

    /// Read the stored collection in stored order.
    ///
    /// A missing key is an empty collection. A blob that is not a JSON array
    /// is [`AppError::Corrupt`](crate::error::AppError::Corrupt); single
    /// entries that do not parse are skipped with a warning.
    pub fn load(&self) -> Result<Vec<Workout>> {
        let Some(json) = self.backend.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let total = entries.len();
        let mut workouts = Vec::with_capacity(total);
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<Workout>(entry) {
                Ok(mut workout) => {
                    workout.recompute();
                    workouts.push(workout);
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping unreadable stored workout");
                }
            }
        }
        tracing::debug!(count = workouts.len(), skipped = total - workouts.len(), "Loaded workouts");
        Ok(workouts)
    }

    /// Remove the stored collection entirely.
    pub fn reset(&mut self) -> Result<()> {
        self.backend.remove(STORAGE_KEY)
    }
}
