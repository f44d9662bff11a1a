// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML fragments for the list view and marker popups.

use std::fmt::Write as _;

use crate::models::{Activity, Workout};

/// Popup bound to a workout's marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPopup {
    pub content: String,
    /// CSS class, `running-popup` or `cycling-popup`
    pub class_name: String,
}

impl MarkerPopup {
    pub fn for_workout(workout: &Workout) -> Self {
        let activity = workout.activity();
        Self {
            content: format!("{} {}", activity.icon(), title(workout)),
            class_name: format!("{}-popup", activity.name()),
        }
    }
}

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Title shown for a workout; falls back to the activity name until
/// enrichment has produced a description.
fn title(workout: &Workout) -> String {
    escape_html(
        workout
            .description()
            .unwrap_or_else(|| workout.activity().title()),
    )
}

fn detail(html: &mut String, icon: &str, value: &str, unit: &str) {
    let _ = write!(
        html,
        r#"<div class="workout__details"><span class="workout__icon">{icon}</span><span class="workout__value">{value}</span><span class="workout__unit">{unit}</span></div>"#
    );
}

fn input(html: &mut String, icon: &str, field: &str, value: f64, unit: &str) {
    let _ = write!(
        html,
        r#"<div class="workout__details"><span class="workout__icon">{icon}</span><input type="number" class="workout-edit-input workout-edit-input__{field}" value="{value}" /><span class="workout__unit">{unit}</span></div>"#
    );
}

fn open_entry(html: &mut String, workout: &Workout, extra_class: &str) {
    let _ = write!(
        html,
        r#"<li class="workout workout-{}{extra_class}" data-id="{}"><div class="workout__icon-container"><box-icon class="icon__edit--workout" type="solid" name="edit"></box-icon><box-icon class="icon__delete--workout" name="message-square-x"></box-icon></div><h2 class="workout__title">{}</h2><div class="workout__details--container">"#,
        workout.activity().name(),
        escape_html(workout.id().as_str()),
        title(workout),
    );
}

/// Read-only list entry.
pub fn list_entry_html(workout: &Workout) -> String {
    let mut html = String::new();
    open_entry(&mut html, workout, "");

    let activity = workout.activity();
    detail(&mut html, activity.icon(), &workout.distance().to_string(), "km");
    detail(&mut html, "⏱", &workout.duration().to_string(), "min");

    match activity {
        Activity::Running { cadence, pace } => {
            detail(&mut html, "⚡️", &format!("{pace:.1}"), "min/km");
            detail(&mut html, "🦶", &cadence.to_string(), "spm");
        }
        Activity::Cycling {
            elevation_gain,
            speed,
        } => {
            detail(&mut html, "⚡️", &format!("{speed:.1}"), "km/h");
            detail(&mut html, "⛰", &elevation_gain.to_string(), "m");
        }
    }

    if let Some(weather) = workout.weather() {
        let _ = write!(
            html,
            r#"<div class="workout__details"><span class="workout__icon workout__weather__icon"><img src="{}" alt="Weather condition" /></span><span class="workout__value">{}</span><span class="workout__unit">°C</span></div>"#,
            escape_html(&weather.icon),
            weather.temp_c,
        );
    }

    html.push_str("</div></li>");
    html
}

/// Inline edit form, prefilled with the current values.
pub fn editable_entry_html(workout: &Workout) -> String {
    let mut html = String::new();
    open_entry(&mut html, workout, " workout-edit");

    let activity = workout.activity();
    input(&mut html, activity.icon(), "distance", workout.distance(), "km");
    input(&mut html, "⏱", "duration", workout.duration(), "min");
    match activity {
        Activity::Running { .. } => input(&mut html, "🦶", "cadence", activity.metric(), "spm"),
        Activity::Cycling { .. } => {
            input(&mut html, "⛰", "elevationGain", activity.metric(), "m")
        }
    }

    html.push_str("</div></li>");
    html
}
