// ABOUTME: Nutrition query route turning meal phrases into aggregate macros
// ABOUTME: The primary endpoint backing the meal logging flow
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nutrition query route
//!
//! `GET /api/nutrition/query?query=2 eggs and a banana` drives the full
//! segmentation and resolution pipeline. A phrase where nothing resolves
//! is still HTTP 200 with `{found: false, error}`; only a malformed
//! request is a client error.

use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use macrometer_core::errors::AppError;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the nutrition query endpoint
#[derive(Deserialize, Default)]
struct NutritionQuery {
    #[serde(default)]
    query: Option<String>,
}

/// Nutrition query routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create the nutrition query route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition/query", get(Self::handle_query))
            .with_state(resources)
    }

    async fn handle_query(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<NutritionQuery>,
    ) -> Result<Response, AppError> {
        let phrase = params
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::invalid_input("query parameter is required"))?;

        let outcome = resources.aggregator.resolve_phrase(phrase).await?;
        Ok((StatusCode::OK, Json(outcome)).into_response())
    }
}
