// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map coordinates and weather snapshots attached to a workout.

use geo::Point;
use serde::{Deserialize, Serialize};

/// A map position. Stored as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl From<(f64, f64)> for Coords {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl From<Coords> for (f64, f64) {
    fn from(c: Coords) -> Self {
        (c.lat, c.lon)
    }
}

/// geo uses x = longitude, y = latitude.
impl From<Coords> for Point<f64> {
    fn from(c: Coords) -> Self {
        Point::new(c.lon, c.lat)
    }
}

/// Current conditions at a workout's position. Stored as `[tempC, iconRef]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, String)", into = "(f64, String)")]
pub struct Weather {
    /// Temperature in degrees Celsius
    pub temp_c: f64,
    /// Condition icon URL as returned by the weather service
    pub icon: String,
}

impl From<(f64, String)> for Weather {
    fn from((temp_c, icon): (f64, String)) -> Self {
        Self { temp_c, icon }
    }
}

impl From<Weather> for (f64, String) {
    fn from(w: Weather) -> Self {
        (w.temp_c, w.icon)
    }
}

/// Shorten a geocoder display name to its first two components.
///
/// `"Central Park, Manhattan, New York County, New York"` becomes
/// `"Central Park, Manhattan"`.
pub fn short_place_name(display_name: &str) -> Option<String> {
    let parts: Vec<&str> = display_name
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(2)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
