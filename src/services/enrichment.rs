// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort enrichment of a freshly created workout.
//!
//! Handles the workflow:
//! 1. Look up current weather at the workout's position
//! 2. Reverse geocode the position to a short place name
//! 3. Build the description from the place name
//!
//! Each lookup can fail on its own; failures are reported to the user and the
//! workout carries on with whatever was filled in.

use std::sync::Arc;

use crate::config::Config;
use crate::models::place::short_place_name;
use crate::models::Workout;
use crate::services::{Geocoder, LocationIqClient, WeatherApiClient, WeatherProvider};
use crate::views::Notifier;

/// Runs the weather and geocoding lookups for new workouts.
#[derive(Clone)]
pub struct Enricher {
    weather: Arc<dyn WeatherProvider>,
    geocoder: Arc<dyn Geocoder>,
    notifier: Arc<dyn Notifier>,
}

impl Enricher {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        geocoder: Arc<dyn Geocoder>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            weather,
            geocoder,
            notifier,
        }
    }

    /// Enricher backed by the real HTTP services.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            Arc::new(WeatherApiClient::new(
                &config.weather_base_url,
                &config.weather_api_key,
            )),
            Arc::new(LocationIqClient::new(
                &config.locationiq_base_url,
                &config.locationiq_api_key,
            )),
            notifier,
        )
    }

    /// Fill in weather, location and description.
    ///
    /// Lookups run one after the other; a weather failure does not stop
    /// geocoding.
    pub async fn enrich(&self, workout: &mut Workout) -> EnrichmentOutcome {
        let coords = workout.coords();
        let mut outcome = EnrichmentOutcome::default();

        match self.weather.current_weather(coords).await {
            Ok(weather) => {
                workout.set_weather(weather);
                outcome.weather = true;
            }
            Err(e) => {
                tracing::warn!(workout_id = %workout.id(), error = %e, "Weather lookup failed");
                self.notifier.report(&e.user_message());
            }
        }

        match self.geocoder.reverse_geocode(coords).await {
            Ok(display_name) => {
                if let Some(place) = short_place_name(&display_name) {
                    workout.set_location(place);
                    outcome.location = true;
                }
            }
            Err(e) => {
                tracing::warn!(workout_id = %workout.id(), error = %e, "Reverse geocoding failed");
                self.notifier.report(&e.user_message());
            }
        }

        let location = workout.location().map(str::to_owned);
        workout.build_description(location.as_deref());

        tracing::debug!(
            workout_id = %workout.id(),
            weather = outcome.weather,
            location = outcome.location,
            "Enrichment settled"
        );
        outcome
    }
}

/// Which lookups succeeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentOutcome {
    pub weather: bool,
    pub location: bool,
}

impl EnrichmentOutcome {
    pub fn is_complete(&self) -> bool {
        self.weather && self.location
    }
}
