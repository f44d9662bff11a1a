// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contracts for the externally rendered views.
//!
//! The registry decides *what* each view shows; the host owns the map
//! widget, the list markup placement, and toast timing.

pub mod render;

use geo::Rect;

use crate::models::{Coords, WorkoutId};

pub use render::MarkerPopup;

/// Handle to a marker issued by the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Handle to a drawn polyline issued by the map collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineHandle(pub u64);

/// The map widget.
pub trait MapLayer {
    fn add_marker(&mut self, coords: Coords, popup: &MarkerPopup) -> MarkerHandle;
    fn remove_marker(&mut self, marker: MarkerHandle);
    fn pan_to(&mut self, coords: Coords, zoom: u8);
    /// Bounds are in geo's x = longitude, y = latitude convention.
    fn fit_bounds(&mut self, bounds: Rect<f64>);
    fn add_polyline(&mut self, path: &[Coords]) -> LineHandle;
    fn remove_polyline(&mut self, line: LineHandle);
}

/// Where a list entry goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAnchor {
    /// Directly below the new-workout form (newest first).
    Top,
    /// In place of the current entry with the same id.
    Replace,
}

/// The workout list in the sidebar.
pub trait ListView {
    fn append_entry(&mut self, id: &WorkoutId, html: &str, anchor: ListAnchor);
    /// No-op if there is no entry for `id`.
    fn remove_entry(&mut self, id: &WorkoutId);
    /// Swap the entry for `id` with an inline edit form.
    fn insert_editable_entry(&mut self, id: &WorkoutId, html: &str);
    /// Show or hide the "delete all" control.
    fn set_clear_all_visible(&mut self, visible: bool);
}

/// Transient user-facing messages (toasts). Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn report(&self, message: &str);
}

/// Notifier that only logs, for hosts without a message area.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report(&self, message: &str) {
        tracing::info!(message, "User message");
    }
}
