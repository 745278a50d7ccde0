// ABOUTME: Core types and constants for the MacroMeter nutrition platform
// ABOUTME: Foundation crate with domain models, error types, and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core domain types for MacroMeter.
//!
//! This crate holds everything the server and its tests share: the meal
//! resolution data model (item descriptors, nutrient results, aggregate
//! outcomes), the persisted log types (meals, goals, day records), the
//! unified error system, and application constants.

/// Application constants: nutrient labels, defaults, file names
pub mod constants;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Domain models for meal resolution and the daily log
pub mod models;

pub use errors::{AppError, AppResult, ErrorCode};
pub use models::{
    AggregateOutcome, DailyGoals, DayRecord, FavoriteMeal, ItemDescriptor, Meal, MealQueryOutcome,
    NutrientResult, NutrientTotals,
};
