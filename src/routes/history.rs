// ABOUTME: History routes serving the recent-day window and CSV export
// ABOUTME: Windows are continuous; days without meals appear empty
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History routes

use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use macrometer_core::constants::defaults;
use macrometer_core::errors::AppError;
use serde::Deserialize;
use std::sync::Arc;

/// Query parameters for the history endpoints
#[derive(Deserialize, Default)]
struct HistoryQuery {
    #[serde(default)]
    days: Option<u64>,
}

/// History routes
pub struct HistoryRoutes;

impl HistoryRoutes {
    /// Create all history routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/history", get(Self::handle_recent))
            .route("/api/history/export", get(Self::handle_export))
            .with_state(resources)
    }

    async fn handle_recent(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let days = clamp_window(params.days.unwrap_or(defaults::HISTORY_WINDOW_DAYS));
        let today = Local::now().date_naive();

        let history = resources.history.read().await;
        let window: Vec<serde_json::Value> = history
            .recent(today, days)
            .into_iter()
            .map(|(date, record)| {
                serde_json::json!({
                    "date": date,
                    "totals": record.totals,
                    "goals": record.goals,
                    "meal_count": record.meal_count,
                })
            })
            .collect();

        Ok((StatusCode::OK, Json(serde_json::json!({ "days": window }))).into_response())
    }

    async fn handle_export(
        State(resources): State<Arc<ServerResources>>,
        Query(params): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let days = clamp_window(params.days.unwrap_or(defaults::EXPORT_WINDOW_DAYS));
        let today = Local::now().date_naive();

        let csv = resources.history.read().await.export_csv(today, days);

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"macrometer_history.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    }
}

/// Cap a requested window so a pathological `days` value cannot make the
/// server materialize billions of placeholder records
const fn clamp_window(days: u64) -> u64 {
    if days > defaults::MAX_WINDOW_DAYS {
        defaults::MAX_WINDOW_DAYS
    } else {
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_requests_are_capped() {
        assert_eq!(clamp_window(7), 7);
        assert_eq!(clamp_window(defaults::MAX_WINDOW_DAYS), defaults::MAX_WINDOW_DAYS);
        assert_eq!(clamp_window(u64::MAX), defaults::MAX_WINDOW_DAYS);
    }
}
