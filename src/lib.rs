// ABOUTME: Main library entry point for the MacroMeter nutrition platform
// ABOUTME: Natural language meal resolution backed by USDA FoodData Central
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # MacroMeter Server
//!
//! A nutrition tracking API with natural language meal entry. A free-text
//! phrase like "2 eggs and a banana" is segmented into quantified items,
//! each item is resolved against the USDA `FoodData` Central database with
//! bounded retry, and the results are aggregated into daily macro totals
//! tracked against configurable goals with a rolling on-disk history.
//!
//! ## Architecture
//!
//! - **Query**: phrase segmentation into quantified item descriptors
//! - **External**: USDA food search client behind a `FoodSearch` trait
//! - **Nutrition**: per-item resolution with retry, sequential aggregation,
//!   and macro arithmetic
//! - **Storage**: JSON-file meal history, favorites, and CSV export
//! - **Routes**: axum HTTP surface
//! - **Config**: environment-driven server configuration

/// Configuration management
pub mod config;

/// External API clients (USDA `FoodData` Central)
pub mod external;

/// Production logging and structured output
pub mod logging;

/// Meal resolution: item lookup, aggregation, and macro calculations
pub mod nutrition;

/// Natural language meal-phrase segmentation
pub mod query;

/// HTTP routes for meal queries, the daily log, and history
pub mod routes;

/// Server state and router assembly
pub mod server;

/// Persistent JSON-file stores for history and favorites
pub mod storage;

// Re-export core modules so consumers and tests can use
// `macrometer::errors::*` and `macrometer::models::*`.
pub use macrometer_core::constants;
pub use macrometer_core::errors;
pub use macrometer_core::models;
