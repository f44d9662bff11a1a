// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod annotation;
pub mod enrichment;
pub mod geocode;
mod http;
pub mod registry;
pub mod weather;

pub use annotation::{AnnotationEvent, AnnotationMode, AnnotationState};
pub use enrichment::{Enricher, EnrichmentOutcome};
pub use geocode::{Geocoder, LocationIqClient};
pub use registry::{PendingWorkout, WorkoutRegistry};
pub use weather::{WeatherApiClient, WeatherProvider};
