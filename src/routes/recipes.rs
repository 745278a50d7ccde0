// ABOUTME: Recipe analysis route resolving an ingredient list to macros
// ABOUTME: Returns recipe totals plus a per-serving breakdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipe analysis route
//!
//! Runs an ingredient phrase through the same resolution pipeline as a
//! meal query, then divides the totals across the serving count.

use crate::nutrition::calculations;
use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use macrometer_core::constants::conversions;
use macrometer_core::errors::AppError;
use macrometer_core::models::MealQueryOutcome;
use serde::Deserialize;
use std::sync::Arc;

/// Request body for recipe analysis
#[derive(Debug, Deserialize)]
pub struct AnalyzeRecipeRequest {
    /// Ingredient list as a natural-language phrase
    pub ingredients: String,
    /// How many servings the recipe makes
    #[serde(default = "default_servings")]
    pub servings: u32,
}

const fn default_servings() -> u32 {
    1
}

/// Recipe routes
pub struct RecipesRoutes;

impl RecipesRoutes {
    /// Create the recipe analysis route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes/analyze", post(Self::handle_analyze))
            .with_state(resources)
    }

    async fn handle_analyze(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<AnalyzeRecipeRequest>,
    ) -> Result<Response, AppError> {
        let Some(resolution) = resources
            .aggregator
            .resolve_phrase_totals(&request.ingredients)
            .await?
        else {
            // Nothing resolved; surface the same found:false shape as a
            // meal query.
            return Ok((
                StatusCode::OK,
                Json(MealQueryOutcome::total_failure(&request.ingredients)),
            )
                .into_response());
        };

        // Both breakdowns derive from the unrounded totals, so each
        // reported number is rounded exactly once.
        let per = calculations::calculate_per_serving(&resolution.totals, request.servings);

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "found": true,
                "name": resolution.name,
                "servings": request.servings.max(1),
                "partial": !resolution.missing.is_empty(),
                "missing": resolution.missing,
                "total": {
                    "calories": conversions::round_f64_to_u32(resolution.totals.calories),
                    "protein": conversions::round_f64_to_u32(resolution.totals.protein),
                    "carbs": conversions::round_f64_to_u32(resolution.totals.carbs),
                    "fat": conversions::round_f64_to_u32(resolution.totals.fat),
                },
                "per_serving": {
                    "calories": conversions::round_f64_to_u32(per.calories),
                    "protein": conversions::round_f64_to_u32(per.protein),
                    "carbs": conversions::round_f64_to_u32(per.carbs),
                    "fat": conversions::round_f64_to_u32(per.fat),
                },
            })),
        )
            .into_response())
    }
}
