// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The canonical workout collection and its two rendered views.
//!
//! Every mutation goes through [`WorkoutRegistry`], which then updates the
//! map markers and list entries (joined to workouts by id) and persists the
//! new collection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use geo::{BoundingRect, MultiPoint, Point, Rect};

use crate::db::{KeyValueStore, WorkoutStore};
use crate::error::{AppError, Result};
use crate::models::{Workout, WorkoutEdit, WorkoutId, WorkoutInput};
use crate::services::enrichment::{Enricher, EnrichmentOutcome};
use crate::time_utils::format_utc_rfc3339;
use crate::views::render::{editable_entry_html, list_entry_html};
use crate::views::{ListAnchor, ListView, MapLayer, MarkerHandle, MarkerPopup, Notifier};

/// Zoom level used when the map pans to a selected workout.
pub const DEFAULT_ZOOM_LEVEL: u8 = 13;

/// A validated workout that has not been registered yet.
///
/// Deleting its id from the registry while enrichment is in flight cancels
/// the eventual registration.
#[derive(Debug)]
pub struct PendingWorkout {
    workout: Workout,
    cancelled: Arc<AtomicBool>,
}

impl PendingWorkout {
    pub fn id(&self) -> &WorkoutId {
        self.workout.id()
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run the enrichment lookups, unless the workout was already cancelled.
    pub async fn enrich(&mut self, enricher: &Enricher) -> EnrichmentOutcome {
        if self.is_cancelled() {
            return EnrichmentOutcome::default();
        }
        enricher.enrich(&mut self.workout).await
    }
}

/// Single source of truth for workouts.
pub struct WorkoutRegistry<S> {
    workouts: Vec<Workout>,
    /// Marker for each workout currently on the map
    markers: HashMap<WorkoutId, MarkerHandle>,
    /// Cancellation flags of workouts between `prepare` and `register`
    pending: HashMap<WorkoutId, Arc<AtomicBool>>,
    /// `None` until the map reports it is ready
    map: Option<Box<dyn MapLayer>>,
    list: Box<dyn ListView>,
    notifier: Arc<dyn Notifier>,
    store: WorkoutStore<S>,
    zoom_level: u8,
    clear_all_visible: bool,
}

impl<S: KeyValueStore> WorkoutRegistry<S> {
    pub fn new(store: WorkoutStore<S>, list: Box<dyn ListView>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            workouts: Vec::new(),
            markers: HashMap::new(),
            pending: HashMap::new(),
            map: None,
            list,
            notifier,
            store,
            zoom_level: DEFAULT_ZOOM_LEVEL,
            clear_all_visible: false,
        }
    }

    pub fn with_zoom_level(mut self, zoom_level: u8) -> Self {
        self.zoom_level = zoom_level;
        self
    }

    // ─── Accessors ───────────────────────────────────────────────

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Whether the "delete all" control is currently shown.
    pub fn clear_all_visible(&self) -> bool {
        self.clear_all_visible
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    /// The map, once attached. Annotation mode draws on the same instance.
    pub fn map_mut(&mut self) -> Option<&mut (dyn MapLayer + 'static)> {
        self.map.as_deref_mut()
    }

    /// Bounding box of every workout position, if there are any.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        let points: Vec<Point<f64>> = self.workouts.iter().map(|w| w.coords().into()).collect();
        MultiPoint::from(points).bounding_rect()
    }

    // ─── Creation ────────────────────────────────────────────────

    /// Validate input, enrich, and register a new workout.
    pub async fn create(&mut self, input: WorkoutInput, enricher: &Enricher) -> Result<WorkoutId> {
        let mut pending = self.prepare(input)?;
        pending.enrich(enricher).await;
        self.register(pending)
    }

    /// Validate input and build the workout without registering it.
    ///
    /// Invalid input is reported to the user and mutates nothing.
    pub fn prepare(&mut self, input: WorkoutInput) -> Result<PendingWorkout> {
        let mut workout = match Workout::new(&input) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected workout input");
                self.notifier.report(&e.user_message());
                return Err(e);
            }
        };

        while self.get(workout.id()).is_some() || self.pending.contains_key(workout.id()) {
            workout.reroll_id();
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        self.pending.insert(workout.id().clone(), cancelled.clone());
        Ok(PendingWorkout { workout, cancelled })
    }

    /// Append a prepared workout, render it to both views, and persist.
    pub fn register(&mut self, pending: PendingWorkout) -> Result<WorkoutId> {
        let PendingWorkout { workout, cancelled } = pending;
        let id = workout.id().clone();
        self.pending.remove(&id);

        if cancelled.load(Ordering::SeqCst) {
            tracing::info!(workout_id = %id, "Workout deleted before registration");
            return Err(AppError::Cancelled(id));
        }

        tracing::info!(
            workout_id = %id,
            activity = workout.activity().name(),
            created_at = %format_utc_rfc3339(workout.date()),
            "Workout created"
        );

        if let Some(map) = self.map.as_deref_mut() {
            place_marker(map, &mut self.markers, &workout);
        }
        self.list
            .append_entry(&id, &list_entry_html(&workout), ListAnchor::Top);
        self.workouts.push(workout);

        self.persist();
        self.refresh_clear_all();
        Ok(id)
    }

    // ─── Editing ─────────────────────────────────────────────────

    /// Swap the list entry for an inline edit form. Returns `false` if the
    /// id is unknown.
    pub fn begin_edit(&mut self, id: &WorkoutId) -> bool {
        let Some(workout) = self.workouts.iter().find(|w| w.id() == id) else {
            tracing::debug!(workout_id = %id, "Edit requested for unknown workout");
            return false;
        };
        self.list
            .insert_editable_entry(id, &editable_entry_html(workout));
        true
    }

    /// Overwrite distance, duration and metric of a workout.
    ///
    /// Unknown ids are a no-op. Only the list entry is re-rendered; the
    /// marker stays where it is.
    pub fn edit(&mut self, id: &WorkoutId, edit: WorkoutEdit) -> Result<()> {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            tracing::debug!(workout_id = %id, "Edit of unknown workout ignored");
            return Ok(());
        };

        if let Err(e) = workout.apply_edit(&edit) {
            self.notifier.report(&e.user_message());
            return Err(e);
        }

        self.list
            .append_entry(id, &list_entry_html(workout), ListAnchor::Replace);
        tracing::debug!(workout_id = %id, "Workout edited");
        self.persist();
        Ok(())
    }

    // ─── Deletion ────────────────────────────────────────────────

    /// Remove one workout from the collection and both views.
    ///
    /// Deleting a workout that is still being enriched cancels it.
    pub fn delete(&mut self, id: &WorkoutId) {
        if let Some(cancelled) = self.pending.remove(id) {
            cancelled.store(true, Ordering::SeqCst);
            tracing::info!(workout_id = %id, "Pending workout cancelled");
            return;
        }

        let Some(index) = self.workouts.iter().position(|w| w.id() == id) else {
            tracing::debug!(workout_id = %id, "Delete of unknown workout ignored");
            return;
        };
        self.workouts.remove(index);
        self.list.remove_entry(id);
        if let Some(marker) = self.markers.remove(id) {
            if let Some(map) = self.map.as_deref_mut() {
                map.remove_marker(marker);
            }
        }

        tracing::info!(workout_id = %id, remaining = self.workouts.len(), "Workout deleted");
        self.persist();
        self.refresh_clear_all();
    }

    /// Remove every workout and persist the empty collection.
    pub fn delete_all(&mut self) {
        let count = self.clear_views();
        tracing::info!(count, "All workouts deleted");
        self.persist();
        self.refresh_clear_all();
    }

    /// Like [`delete_all`](Self::delete_all), but removes the stored blob
    /// instead of writing an empty one.
    pub fn reset(&mut self) {
        let count = self.clear_views();
        if let Err(e) = self.store.reset() {
            tracing::error!(error = %e, "Failed to reset stored workouts");
        }
        tracing::info!(count, "Workouts reset");
        self.refresh_clear_all();
    }

    fn clear_views(&mut self) -> usize {
        for (_, cancelled) in self.pending.drain() {
            cancelled.store(true, Ordering::SeqCst);
        }
        for workout in &self.workouts {
            self.list.remove_entry(workout.id());
        }
        for (_, marker) in self.markers.drain() {
            if let Some(map) = self.map.as_deref_mut() {
                map.remove_marker(marker);
            }
        }
        let count = self.workouts.len();
        self.workouts.clear();
        count
    }

    // ─── Ordering & selection ────────────────────────────────────

    /// Stable ascending sort by distance, then re-render the list in the
    /// new order.
    pub fn sort_by_distance(&mut self) {
        self.workouts
            .sort_by(|a, b| a.distance().total_cmp(&b.distance()));

        for workout in &self.workouts {
            self.list.remove_entry(workout.id());
        }
        for workout in &self.workouts {
            self.list
                .append_entry(workout.id(), &list_entry_html(workout), ListAnchor::Top);
        }
    }

    /// Pan the map to a workout and count the selection. Returns `false` if
    /// the id is unknown.
    pub fn select(&mut self, id: &WorkoutId) -> bool {
        let Some(workout) = self.workouts.iter_mut().find(|w| w.id() == id) else {
            return false;
        };
        workout.click();
        let coords = workout.coords();
        if let Some(map) = self.map.as_deref_mut() {
            map.pan_to(coords, self.zoom_level);
        }
        tracing::debug!(workout_id = %id, "Workout selected");
        self.persist();
        true
    }

    // ─── Loading & map readiness ─────────────────────────────────

    /// Load stored workouts, sort them, and render them to the list.
    ///
    /// Workouts already in the registry are kept and not duplicated.
    ///
    /// Unreadable storage is logged and treated as empty. Markers wait for
    /// [`attach_map`](Self::attach_map) unless the map is already there.
    pub fn load(&mut self) -> usize {
        let stored = match self.store.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Stored workouts unreadable, starting empty");
                self.refresh_clear_all();
                return 0;
            }
        };

        let mut loaded = 0;
        for workout in stored {
            if self.get(workout.id()).is_some() {
                tracing::debug!(workout_id = %workout.id(), "Workout already loaded");
                continue;
            }
            self.workouts.push(workout);
            loaded += 1;
        }
        self.sort_by_distance();

        if let Some(map) = self.map.as_deref_mut() {
            for workout in &self.workouts {
                if !self.markers.contains_key(workout.id()) {
                    place_marker(map, &mut self.markers, workout);
                }
            }
        }

        tracing::info!(count = loaded, "Workouts loaded");
        self.refresh_clear_all();
        loaded
    }

    /// The map is ready: place every deferred marker and, with more than one
    /// workout, fit the view around all of them.
    pub fn attach_map(&mut self, mut map: Box<dyn MapLayer>) {
        self.markers.clear();
        for workout in &self.workouts {
            place_marker(map.as_mut(), &mut self.markers, workout);
        }
        if self.workouts.len() > 1 {
            if let Some(bounds) = self.bounds() {
                map.fit_bounds(bounds);
            }
        }
        tracing::debug!(markers = self.markers.len(), "Map attached");
        self.map = Some(map);
    }

    // ─── Internals ───────────────────────────────────────────────

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.workouts) {
            tracing::error!(error = %e, "Failed to persist workouts");
        }
    }

    fn refresh_clear_all(&mut self) {
        let visible = !self.workouts.is_empty();
        self.list.set_clear_all_visible(visible);
        self.clear_all_visible = visible;
    }
}

fn place_marker<M: MapLayer + ?Sized>(
    map: &mut M,
    markers: &mut HashMap<WorkoutId, MarkerHandle>,
    workout: &Workout,
) {
    let marker = map.add_marker(workout.coords(), &MarkerPopup::for_workout(workout));
    markers.insert(workout.id().clone(), marker);
}
