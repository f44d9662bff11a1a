// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Freehand drawing on the map ("edit mode").
//!
//! Press and hold the map to enter; each click then extends a line through
//! the clicked points. The host feeds pointer events and calls
//! [`AnnotationMode::tick`] from its timer so timed transitions fire.

use std::time::{Duration, Instant};

use crate::config::Config;
use crate::models::Coords;
use crate::views::{LineHandle, MapLayer};

/// Whether clicks on the map draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationState {
    Inactive,
    Active,
}

/// Transitions the host reacts to (hiding the sidebar, showing controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationEvent {
    /// Hold threshold reached; drawing controls should appear.
    Entered,
    /// Drawing resumed on its own after a clear.
    Resumed,
    /// Explicit exit; drawing controls should go away.
    Exited,
}

/// Annotation state machine. Shares nothing with the workout registry
/// except the map it draws on.
#[derive(Debug)]
pub struct AnnotationMode {
    state: AnnotationState,
    hold: Duration,
    resume_delay: Duration,
    /// Press that has not yet been held long enough
    pressed_at: Option<Instant>,
    /// Pending automatic re-entry after a clear
    resume_at: Option<Instant>,
    path: Vec<Coords>,
    line: Option<LineHandle>,
}

impl AnnotationMode {
    pub fn new(hold: Duration, resume_delay: Duration) -> Self {
        Self {
            state: AnnotationState::Inactive,
            hold,
            resume_delay,
            pressed_at: None,
            resume_at: None,
            path: Vec::new(),
            line: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.annotation_hold, config.annotation_resume)
    }

    pub fn state(&self) -> AnnotationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == AnnotationState::Active
    }

    pub fn path(&self) -> &[Coords] {
        &self.path
    }

    /// Pointer pressed on the map.
    pub fn press(&mut self, now: Instant) {
        if self.state == AnnotationState::Inactive && self.resume_at.is_none() {
            self.pressed_at = Some(now);
        }
    }

    /// Pointer released before the threshold: cancel the pending entry.
    pub fn release(&mut self) {
        self.pressed_at = None;
    }

    /// Pointer left the map: same as a release.
    pub fn leave(&mut self) {
        self.pressed_at = None;
    }

    /// Fire any timed transition that is due.
    pub fn tick(&mut self, now: Instant) -> Option<AnnotationEvent> {
        if let Some(pressed_at) = self.pressed_at {
            if now.saturating_duration_since(pressed_at) >= self.hold {
                self.pressed_at = None;
                self.state = AnnotationState::Active;
                tracing::debug!("Annotation mode entered");
                return Some(AnnotationEvent::Entered);
            }
        }

        if let Some(resume_at) = self.resume_at {
            if now >= resume_at {
                self.resume_at = None;
                self.state = AnnotationState::Active;
                return Some(AnnotationEvent::Resumed);
            }
        }

        None
    }

    /// Map clicked. While active, extend the path and redraw its line;
    /// otherwise drop any stale path.
    pub fn click<M: MapLayer + ?Sized>(&mut self, coords: Coords, map: &mut M) {
        if self.state == AnnotationState::Inactive {
            self.path.clear();
            return;
        }

        self.path.push(coords);
        if let Some(line) = self.line.take() {
            map.remove_polyline(line);
        }
        self.line = Some(map.add_polyline(&self.path));
    }

    /// Leave annotation mode and erase the drawing.
    pub fn exit<M: MapLayer + ?Sized>(&mut self, map: &mut M) -> Option<AnnotationEvent> {
        let was_drawing = self.is_active() || self.resume_at.is_some();
        self.erase(map);
        self.state = AnnotationState::Inactive;
        self.pressed_at = None;
        self.resume_at = None;

        if was_drawing {
            tracing::debug!("Annotation mode exited");
            Some(AnnotationEvent::Exited)
        } else {
            None
        }
    }

    /// Erase the drawing, drop out of drawing briefly, and schedule
    /// re-entry after the resume delay.
    pub fn clear<M: MapLayer + ?Sized>(&mut self, now: Instant, map: &mut M) {
        if !self.is_active() && self.resume_at.is_none() {
            return;
        }
        self.erase(map);
        self.state = AnnotationState::Inactive;
        self.resume_at = Some(now + self.resume_delay);
    }

    fn erase<M: MapLayer + ?Sized>(&mut self, map: &mut M) {
        if let Some(line) = self.line.take() {
            map.remove_polyline(line);
        }
        self.path.clear();
    }
}
