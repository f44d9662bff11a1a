// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current conditions via WeatherAPI.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Coords, Weather};
use crate::services::http::send_json;

/// Looks up current weather at a map position.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, coords: Coords) -> Result<Weather>;
}

/// WeatherAPI client.
#[derive(Clone)]
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current_weather(&self, coords: Coords) -> Result<Weather> {
        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));
        let request = self.http.get(&url).query(&[
            ("key", self.api_key.clone()),
            ("q", format!("{},{}", coords.lat, coords.lon)),
        ]);

        let response: CurrentResponse = send_json(request, AppError::Weather).await?;
        Ok(response.into())
    }
}

/// Current conditions response.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentResponse {
    pub current: Current,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub icon: String,
}

impl From<CurrentResponse> for Weather {
    fn from(r: CurrentResponse) -> Self {
        Weather {
            temp_c: r.current.temp_c,
            icon: r.current.condition.icon,
        }
    }
}
