// ABOUTME: Nutrition resolution and aggregation pipeline
// ABOUTME: Per-item lookup with retry, sequential meal aggregation, and macro math
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nutrition pipeline
//!
//! [`resolver`] turns one food item into nutrient facts via the upstream
//! database, [`aggregator`] drives a whole meal phrase through resolution
//! and sums the result, and [`calculations`] holds the daily-total and
//! goal arithmetic shared by the tracking endpoints.

/// Per-item lookup with bounded retry
pub mod resolver;

/// Whole-phrase aggregation
pub mod aggregator;

/// Daily totals, remaining macros, and goal status
pub mod calculations;

pub use aggregator::{MealAggregator, PhraseResolution, ResolutionPolicy};
pub use resolver::{ItemResolution, ItemResolver, MissReason};
