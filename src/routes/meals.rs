// ABOUTME: Daily meal log routes for listing, logging, and removing meals
// ABOUTME: Every mutation writes the day back to the history store
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily meal log routes

use crate::nutrition::calculations;
use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Local;
use macrometer_core::errors::AppError;
use macrometer_core::models::{Meal, NutrientTotals};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Request body for logging a meal
#[derive(Debug, Deserialize)]
pub struct LogMealRequest {
    /// Description of the meal
    pub description: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein, grams
    pub protein: f64,
    /// Carbohydrates, grams
    pub carbs: f64,
    /// Fat, grams
    pub fat: f64,
}

impl LogMealRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.description.trim().is_empty() {
            return Err(AppError::missing_field("description"));
        }
        for (name, value) in [
            ("calories", self.calories),
            ("protein", self.protein),
            ("carbs", self.carbs),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::out_of_range(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        Ok(())
    }
}

/// Meal log routes
pub struct MealsRoutes;

impl MealsRoutes {
    /// Create all meal log routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/meals", get(Self::handle_list))
            .route("/api/meals", post(Self::handle_log))
            .route("/api/meals", delete(Self::handle_clear))
            .route("/api/meals/:id", delete(Self::handle_remove))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let meals = resources.meals.read().await;
        let goals = *resources.goals.read().await;
        let totals = calculations::calculate_totals(&meals);
        let remaining = calculations::calculate_remaining(&goals, &totals);

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({
                "meals": *meals,
                "totals": totals,
                "remaining": remaining,
                "count": meals.len(),
            })),
        )
            .into_response())
    }

    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LogMealRequest>,
    ) -> Result<Response, AppError> {
        request.validate()?;

        let meal = Meal::new(
            request.description.trim(),
            NutrientTotals {
                calories: request.calories,
                protein: request.protein,
                carbs: request.carbs,
                fat: request.fat,
            },
        );

        let mut meals = resources.meals.write().await;
        meals.push(meal.clone());
        persist_day(&resources, &meals).await?;

        Ok((StatusCode::CREATED, Json(meal)).into_response())
    }

    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let mut meals = resources.meals.write().await;
        meals.clear();
        persist_day(&resources, &meals).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let mut meals = resources.meals.write().await;
        let index = meals
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| AppError::not_found(format!("meal {id}")))?;
        meals.remove(index);
        persist_day(&resources, &meals).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

/// Write the current day back to the history store
pub(crate) async fn persist_day(
    resources: &Arc<ServerResources>,
    meals: &[Meal],
) -> Result<(), AppError> {
    let goals = *resources.goals.read().await;
    let today = Local::now().date_naive();
    resources
        .history
        .write()
        .await
        .record_day(today, meals, goals)
}
