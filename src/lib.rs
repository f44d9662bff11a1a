// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: log workouts on a map
//!
//! This crate provides the workout state engine behind the map UI: the
//! workout records, their enrichment with weather and place names, the
//! registry that keeps the map and list views in sync, persistence, and
//! the freehand annotation mode.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod views;

use std::sync::Arc;

use config::Config;
use db::{FileStore, KeyValueStore, WorkoutStore};
use error::Result;
use models::Coords;
use services::{AnnotationMode, Enricher, WorkoutRegistry};
use views::{ListView, Notifier};

/// Everything one map session needs, wired together once at startup.
pub struct AppState<S> {
    pub config: Config,
    pub registry: WorkoutRegistry<S>,
    pub enricher: Enricher,
    pub annotation: AnnotationMode,
}

impl AppState<FileStore> {
    /// Open the file store, load saved workouts into the list, and build the
    /// enrichment clients. The map is attached later, once it is ready.
    pub fn open(
        config: Config,
        list: Box<dyn ListView>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let store = WorkoutStore::new(FileStore::open(&config.storage_dir)?);
        let mut registry = WorkoutRegistry::new(store, list, notifier.clone())
            .with_zoom_level(config.map_zoom_level);
        registry.load();

        Ok(Self {
            enricher: Enricher::from_config(&config, notifier),
            annotation: AnnotationMode::from_config(&config),
            registry,
            config,
        })
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Map clicked: annotation mode draws on the registry's map. Ignored
    /// until the map is attached.
    pub fn map_click(&mut self, coords: Coords) {
        if let Some(map) = self.registry.map_mut() {
            self.annotation.click(coords, map);
        }
    }
}
