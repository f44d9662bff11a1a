// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod input;
pub mod place;
pub mod workout;

pub use input::{ActivityInput, WorkoutEdit, WorkoutInput};
pub use place::{Coords, Weather};
pub use workout::{Activity, Workout, WorkoutId};
