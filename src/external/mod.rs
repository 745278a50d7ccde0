// ABOUTME: External API clients consumed by the resolution pipeline
// ABOUTME: Currently the USDA FoodData Central search client
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External API clients

/// USDA `FoodData` Central API client and the `FoodSearch` seam
pub mod usda_client;

pub use usda_client::{FoodCandidate, FoodNutrientEntry, FoodSearch, UpstreamError, UsdaClient};
