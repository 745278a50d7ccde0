// ABOUTME: HTTP server assembly wiring shared resources into the axum router
// ABOUTME: Owns startup, middleware, and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server assembly
//!
//! [`ServerResources`] bundles every shared dependency behind one `Arc`
//! so handlers take a single state extractor. Route tables live in
//! [`crate::routes`]; this module only composes and runs them.

use crate::config::ServerConfig;
use crate::external::FoodSearch;
use crate::nutrition::MealAggregator;
use crate::routes::{
    FavoritesRoutes, GoalsRoutes, HealthRoutes, HistoryRoutes, MealsRoutes, NutritionRoutes,
    RecipesRoutes,
};
use crate::storage::{FavoritesStore, HistoryStore};
use anyhow::{Context, Result};
use axum::Router;
use macrometer_core::models::{DailyGoals, Meal};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared dependencies injected into every route handler
pub struct ServerResources {
    /// Loaded server configuration
    pub config: ServerConfig,
    /// Meal phrase resolution pipeline
    pub aggregator: MealAggregator,
    /// Current daily goals
    pub goals: RwLock<DailyGoals>,
    /// Today's logged meals
    pub meals: RwLock<Vec<Meal>>,
    /// Daily history store
    pub history: RwLock<HistoryStore>,
    /// Favorites store
    pub favorites: RwLock<FavoritesStore>,
}

impl ServerResources {
    /// Build resources with the real USDA-backed aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let aggregator = MealAggregator::from_config(&config.usda, &config.resolution)?;
        Ok(Self::with_aggregator(config, aggregator))
    }

    /// Build resources over an explicit search backend. Used by tests to
    /// inject deterministic upstreams.
    #[must_use]
    pub fn with_search(config: ServerConfig, search: Arc<dyn FoodSearch>) -> Self {
        let aggregator = MealAggregator::new(search, &config.resolution, config.usda.page_size);
        Self::with_aggregator(config, aggregator)
    }

    fn with_aggregator(config: ServerConfig, aggregator: MealAggregator) -> Self {
        let data_dir = config.storage.data_dir.clone();
        Self {
            config,
            aggregator,
            goals: RwLock::new(DailyGoals::default()),
            meals: RwLock::new(Vec::new()),
            history: RwLock::new(HistoryStore::load(&data_dir)),
            favorites: RwLock::new(FavoritesStore::load(&data_dir)),
        }
    }
}

/// Assemble the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(NutritionRoutes::routes(resources.clone()))
        .merge(MealsRoutes::routes(resources.clone()))
        .merge(GoalsRoutes::routes(resources.clone()))
        .merge(HistoryRoutes::routes(resources.clone()))
        .merge(FavoritesRoutes::routes(resources.clone()))
        .merge(RecipesRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and serve until interrupted.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server
/// loop fails.
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        resources.config.host, resources.config.http_port
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(address = %addr, "HTTP server listening");

    let app = router(resources);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
