// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording fakes for the view and enrichment collaborators.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geo::Rect;
use mapty_tracker::db::{MemoryStore, WorkoutStore};
use mapty_tracker::error::{AppError, Result};
use mapty_tracker::models::{Coords, Weather, WorkoutId};
use mapty_tracker::services::{Enricher, Geocoder, WeatherProvider, WorkoutRegistry};
use mapty_tracker::views::{
    LineHandle, ListAnchor, ListView, MapLayer, MarkerHandle, MarkerPopup, Notifier,
};

// ─── Map ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum MapEvent {
    AddMarker(u64, Coords),
    RemoveMarker(u64),
    PanTo(Coords, u8),
    FitBounds(Rect<f64>),
    AddLine(u64, Vec<Coords>),
    RemoveLine(u64),
}

#[derive(Default)]
struct MapLog {
    next_handle: u64,
    markers: HashMap<u64, (Coords, MarkerPopup)>,
    lines: HashMap<u64, Vec<Coords>>,
    events: Vec<MapEvent>,
}

/// Map that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct FakeMap {
    log: Arc<Mutex<MapLog>>,
}

#[allow(dead_code)]
impl FakeMap {
    pub fn marker_count(&self) -> usize {
        self.log.lock().unwrap().markers.len()
    }

    pub fn marker_coords(&self) -> Vec<Coords> {
        self.log
            .lock()
            .unwrap()
            .markers
            .values()
            .map(|(c, _)| *c)
            .collect()
    }

    pub fn popups(&self) -> Vec<MarkerPopup> {
        self.log
            .lock()
            .unwrap()
            .markers
            .values()
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn lines(&self) -> Vec<Vec<Coords>> {
        self.log.lock().unwrap().lines.values().cloned().collect()
    }

    pub fn events(&self) -> Vec<MapEvent> {
        self.log.lock().unwrap().events.clone()
    }

    fn next(&self, log: &mut MapLog) -> u64 {
        log.next_handle += 1;
        log.next_handle
    }
}

impl MapLayer for FakeMap {
    fn add_marker(&mut self, coords: Coords, popup: &MarkerPopup) -> MarkerHandle {
        let mut log = self.log.lock().unwrap();
        let handle = self.next(&mut log);
        log.markers.insert(handle, (coords, popup.clone()));
        log.events.push(MapEvent::AddMarker(handle, coords));
        MarkerHandle(handle)
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        let mut log = self.log.lock().unwrap();
        log.markers.remove(&marker.0);
        log.events.push(MapEvent::RemoveMarker(marker.0));
    }

    fn pan_to(&mut self, coords: Coords, zoom: u8) {
        self.log
            .lock()
            .unwrap()
            .events
            .push(MapEvent::PanTo(coords, zoom));
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>) {
        self.log
            .lock()
            .unwrap()
            .events
            .push(MapEvent::FitBounds(bounds));
    }

    fn add_polyline(&mut self, path: &[Coords]) -> LineHandle {
        let mut log = self.log.lock().unwrap();
        let handle = self.next(&mut log);
        log.lines.insert(handle, path.to_vec());
        log.events.push(MapEvent::AddLine(handle, path.to_vec()));
        LineHandle(handle)
    }

    fn remove_polyline(&mut self, line: LineHandle) {
        let mut log = self.log.lock().unwrap();
        log.lines.remove(&line.0);
        log.events.push(MapEvent::RemoveLine(line.0));
    }
}

// ─── List ────────────────────────────────────────────────────────

#[derive(Default)]
struct ListLog {
    /// Entries top to bottom
    entries: Vec<(WorkoutId, String)>,
    editing: Option<WorkoutId>,
    renders: HashMap<WorkoutId, usize>,
    clear_all_visible: Option<bool>,
}

/// List that keeps entries in display order. Clones share the same log.
#[derive(Clone, Default)]
pub struct FakeList {
    log: Arc<Mutex<ListLog>>,
}

#[allow(dead_code)]
impl FakeList {
    pub fn ids(&self) -> Vec<WorkoutId> {
        self.log
            .lock()
            .unwrap()
            .entries
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn html(&self, id: &WorkoutId) -> Option<String> {
        self.log
            .lock()
            .unwrap()
            .entries
            .iter()
            .find(|(entry, _)| entry == id)
            .map(|(_, html)| html.clone())
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().entries.len()
    }

    pub fn renders(&self, id: &WorkoutId) -> usize {
        self.log
            .lock()
            .unwrap()
            .renders
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    pub fn editing(&self) -> Option<WorkoutId> {
        self.log.lock().unwrap().editing.clone()
    }

    pub fn clear_all_visible(&self) -> Option<bool> {
        self.log.lock().unwrap().clear_all_visible
    }
}

impl ListView for FakeList {
    fn append_entry(&mut self, id: &WorkoutId, html: &str, anchor: ListAnchor) {
        let mut log = self.log.lock().unwrap();
        *log.renders.entry(id.clone()).or_insert(0) += 1;
        let existing = log.entries.iter().position(|(entry, _)| entry == id);
        match (anchor, existing) {
            (ListAnchor::Replace, Some(index)) => log.entries[index].1 = html.to_string(),
            _ => log.entries.insert(0, (id.clone(), html.to_string())),
        }
        if log.editing.as_ref() == Some(id) {
            log.editing = None;
        }
    }

    fn remove_entry(&mut self, id: &WorkoutId) {
        let mut log = self.log.lock().unwrap();
        log.entries.retain(|(entry, _)| entry != id);
    }

    fn insert_editable_entry(&mut self, id: &WorkoutId, html: &str) {
        let mut log = self.log.lock().unwrap();
        if let Some(entry) = log.entries.iter_mut().find(|(entry, _)| entry == id) {
            entry.1 = html.to_string();
        }
        log.editing = Some(id.clone());
    }

    fn set_clear_all_visible(&mut self, visible: bool) {
        self.log.lock().unwrap().clear_all_visible = Some(visible);
    }
}

// ─── Notifier ────────────────────────────────────────────────────

/// Notifier that keeps every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

// ─── Enrichment ──────────────────────────────────────────────────

/// Shared call order across the scripted lookups.
pub type CallLog = Arc<Mutex<Vec<&'static str>>>;

pub struct ScriptedWeather {
    result: std::result::Result<Weather, String>,
    calls: CallLog,
}

#[async_trait]
impl WeatherProvider for ScriptedWeather {
    async fn current_weather(&self, _coords: Coords) -> Result<Weather> {
        self.calls.lock().unwrap().push("weather");
        self.result.clone().map_err(AppError::Weather)
    }
}

pub struct ScriptedGeocoder {
    result: std::result::Result<String, String>,
    calls: CallLog,
}

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn reverse_geocode(&self, _coords: Coords) -> Result<String> {
        self.calls.lock().unwrap().push("geocode");
        self.result.clone().map_err(AppError::Geocode)
    }
}

#[allow(dead_code)]
pub fn sunny() -> Weather {
    Weather {
        temp_c: 21.0,
        icon: "//cdn.weatherapi.com/weather/64x64/day/113.png".to_string(),
    }
}

/// Enricher whose lookups succeed or fail as scripted.
#[allow(dead_code)]
pub fn scripted_enricher(
    weather: std::result::Result<Weather, &str>,
    place: std::result::Result<&str, &str>,
    notifier: Arc<RecordingNotifier>,
) -> (Enricher, CallLog) {
    let calls: CallLog = Arc::default();
    let enricher = Enricher::new(
        Arc::new(ScriptedWeather {
            result: weather.map_err(str::to_string),
            calls: calls.clone(),
        }),
        Arc::new(ScriptedGeocoder {
            result: place.map(str::to_string).map_err(str::to_string),
            calls: calls.clone(),
        }),
        notifier,
    );
    (enricher, calls)
}

/// Enricher whose lookups always succeed.
#[allow(dead_code)]
pub fn happy_enricher(notifier: Arc<RecordingNotifier>) -> Enricher {
    scripted_enricher(
        Ok(sunny()),
        Ok("Central Park, Manhattan, New York County, New York, USA"),
        notifier,
    )
    .0
}

// ─── Registry ────────────────────────────────────────────────────

/// Registry wired to recording fakes, plus handles to inspect them.
#[allow(dead_code)]
pub struct Harness {
    pub registry: WorkoutRegistry<MemoryStore>,
    pub list: FakeList,
    pub notifier: Arc<RecordingNotifier>,
    pub enricher: Enricher,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_backend(MemoryStore::new())
    }

    pub fn with_backend(backend: MemoryStore) -> Self {
        let list = FakeList::default();
        let notifier = Arc::new(RecordingNotifier::default());
        let registry = WorkoutRegistry::new(
            WorkoutStore::new(backend),
            Box::new(list.clone()),
            notifier.clone(),
        );
        Self {
            registry,
            list,
            enricher: happy_enricher(notifier.clone()),
            notifier,
        }
    }

    /// Attach a fresh fake map and return a handle to it.
    pub fn attach_map(&mut self) -> FakeMap {
        let map = FakeMap::default();
        self.registry.attach_map(Box::new(map.clone()));
        map
    }

    /// Persistence writes observed so far.
    pub fn writes(&self) -> usize {
        self.registry.store().backend().writes()
    }

    /// A copy of the backing store, for reloading into a second registry.
    pub fn backend(&self) -> MemoryStore {
        self.registry.store().backend().clone()
    }
}
