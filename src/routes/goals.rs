// ABOUTME: Daily goal routes for reading and updating macro targets
// ABOUTME: Updates are bounds-checked before taking effect
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily goal routes

use crate::server::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use macrometer_core::errors::AppError;
use macrometer_core::models::DailyGoals;
use std::sync::Arc;

/// Accepted goal ranges; values outside them are almost certainly typos
const CALORIES_RANGE: (u32, u32) = (1000, 5000);
const PROTEIN_RANGE: (u32, u32) = (0, 500);
const CARBS_RANGE: (u32, u32) = (0, 500);
const FAT_RANGE: (u32, u32) = (0, 300);

/// Goal routes
pub struct GoalsRoutes;

impl GoalsRoutes {
    /// Create all goal routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/goals", get(Self::handle_get))
            .route("/api/goals", put(Self::handle_update))
            .with_state(resources)
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let goals = *resources.goals.read().await;
        Ok((StatusCode::OK, Json(goals)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<DailyGoals>,
    ) -> Result<Response, AppError> {
        validate_goals(&request)?;
        *resources.goals.write().await = request;
        Ok((StatusCode::OK, Json(request)).into_response())
    }
}

fn validate_goals(goals: &DailyGoals) -> Result<(), AppError> {
    for (name, value, (min, max)) in [
        ("calories", goals.calories, CALORIES_RANGE),
        ("protein", goals.protein, PROTEIN_RANGE),
        ("carbs", goals.carbs, CARBS_RANGE),
        ("fat", goals.fat, FAT_RANGE),
    ] {
        if value < min || value > max {
            return Err(AppError::out_of_range(format!(
                "{name} goal must be between {min} and {max}"
            )));
        }
    }
    Ok(())
}
