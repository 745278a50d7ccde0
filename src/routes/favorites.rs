// ABOUTME: Favorite meal routes for saving, listing, removing, and re-logging
// ABOUTME: Re-logging a favorite appends it to today's meal log
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Favorites routes

use crate::routes::meals::persist_day;
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

/// Request body for saving a favorite
#[derive(Debug, Deserialize)]
pub struct SaveFavoriteRequest {
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

/// Favorites routes
pub struct FavoritesRoutes;

impl FavoritesRoutes {
    /// Create all favorites routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/favorites", get(Self::handle_list))
            .route("/api/favorites", post(Self::handle_add))
            .route("/api/favorites/:id", delete(Self::handle_remove))
            .route("/api/favorites/:id/log", post(Self::handle_log))
            .with_state(resources)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let favorites = resources.favorites.read().await;
        Ok((StatusCode::OK, Json(favorites.list().to_vec())).into_response())
    }

    async fn handle_add(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<SaveFavoriteRequest>,
    ) -> Result<Response, AppError> {
        if request.description.trim().is_empty() {
            return Err(AppError::missing_field("description"));
        }

        let macros = NutrientTotals {
            calories: request.calories,
            protein: request.protein,
            carbs: request.carbs,
            fat: request.fat,
        };
        let today = Local::now().date_naive();

        let favorite = resources
            .favorites
            .write()
            .await
            .add(request.description.trim(), macros, today)?;

        Ok((StatusCode::CREATED, Json(favorite)).into_response())
    }

    async fn handle_remove(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        resources.favorites.write().await.remove(id)?;
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Append a saved favorite to today's meal log
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let meal = {
            let favorites = resources.favorites.read().await;
            let favorite = favorites
                .get(id)
                .ok_or_else(|| AppError::not_found(format!("favorite {id}")))?;
            Meal::new(
                favorite.description.clone(),
                NutrientTotals {
                    calories: favorite.calories,
                    protein: favorite.protein,
                    carbs: favorite.carbs,
                    fat: favorite.fat,
                },
            )
        };

        let mut meals = resources.meals.write().await;
        meals.push(meal.clone());
        persist_day(&resources, &meals).await?;

        Ok((StatusCode::CREATED, Json(meal)).into_response())
    }
}
