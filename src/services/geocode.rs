// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reverse geocoding via LocationIQ.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::Coords;
use crate::services::http::send_json;

/// Turns a map position into a human-readable place name.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Full display name for the position, e.g.
    /// `"Central Park, Manhattan, New York County, New York, USA"`.
    async fn reverse_geocode(&self, coords: Coords) -> Result<String>;
}

/// LocationIQ reverse geocoding client.
#[derive(Clone)]
pub struct LocationIqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LocationIqClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Geocoder for LocationIqClient {
    async fn reverse_geocode(&self, coords: Coords) -> Result<String> {
        let url = format!("{}/reverse", self.base_url.trim_end_matches('/'));
        let request = self.http.get(&url).query(&[
            ("key", self.api_key.clone()),
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("format", "json".to_string()),
        ]);

        let place: ReversePlace = send_json(request, AppError::Geocode).await?;
        place
            .display_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::Geocode("No place found at this position".to_string()))
    }
}

/// Reverse geocoding response (only the field we use).
#[derive(Debug, Clone, Deserialize)]
pub struct ReversePlace {
    pub display_name: Option<String>,
}
