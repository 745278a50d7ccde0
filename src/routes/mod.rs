// ABOUTME: HTTP route handlers for the MacroMeter REST API
// ABOUTME: One module per resource, each exposing a Routes struct
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP route handlers

/// Health and readiness endpoints
pub mod health;

/// Natural-language nutrition query endpoint
pub mod nutrition;

/// Daily meal log endpoints
pub mod meals;

/// Daily goal endpoints
pub mod goals;

/// History and CSV export endpoints
pub mod history;

/// Favorite meal endpoints
pub mod favorites;

/// Recipe analysis endpoint
pub mod recipes;

pub use favorites::FavoritesRoutes;
pub use goals::GoalsRoutes;
pub use health::HealthRoutes;
pub use history::HistoryRoutes;
pub use meals::MealsRoutes;
pub use nutrition::NutritionRoutes;
pub use recipes::RecipesRoutes;
