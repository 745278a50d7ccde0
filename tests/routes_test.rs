// ABOUTME: HTTP-level tests for the REST API over a stubbed upstream
// ABOUTME: Exercises the query, meals, goals, favorites, history, and recipe routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]

use async_trait::async_trait;
use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use macrometer::config::{
    ResolutionConfig, ServerConfig, StorageConfig, UsdaConfig, UsdaCredentials,
};
use macrometer::external::{FoodCandidate, FoodNutrientEntry, FoodSearch, UpstreamError};
use macrometer::server::{self, ServerResources};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

/// Upstream stub answering from a fixed query-to-candidate map
struct MappedSearch {
    foods: HashMap<String, FoodCandidate>,
}

impl MappedSearch {
    fn new(entries: Vec<(&str, FoodCandidate)>) -> Self {
        Self {
            foods: entries
                .into_iter()
                .map(|(query, food)| (query.to_owned(), food))
                .collect(),
        }
    }
}

#[async_trait]
impl FoodSearch for MappedSearch {
    async fn search_foods(
        &self,
        query: &str,
        _page_size: u32,
    ) -> Result<Vec<FoodCandidate>, UpstreamError> {
        Ok(self.foods.get(query).cloned().into_iter().collect())
    }
}

fn food(description: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodCandidate {
    FoodCandidate {
        description: description.into(),
        food_nutrients: vec![
            FoodNutrientEntry::new("Energy", calories),
            FoodNutrientEntry::new("Protein", protein),
            FoodNutrientEntry::new("Carbohydrate, by difference", carbs),
            FoodNutrientEntry::new("Total lipid (fat)", fat),
        ],
    }
}

fn test_config(data_dir: &Path) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".into(),
        usda: UsdaConfig {
            credentials: UsdaCredentials::new("test-key"),
            base_url: "http://localhost".into(),
            timeout_secs: 1,
            connect_timeout_secs: 1,
            page_size: 5,
        },
        resolution: ResolutionConfig {
            max_retries: 0,
            backoff_ms: 0,
            lookup_concurrency: 1,
        },
        storage: StorageConfig {
            data_dir: data_dir.to_path_buf(),
        },
    }
}

fn test_app(data_dir: &Path, entries: Vec<(&str, FoodCandidate)>) -> Router {
    let search = Arc::new(MappedSearch::new(entries));
    let resources = Arc::new(ServerResources::with_search(test_config(data_dir), search));
    server::router(resources)
}

fn pantry() -> Vec<(&'static str, FoodCandidate)> {
    vec![
        ("eggs", food("Egg, whole, raw", 72.0, 6.3, 0.4, 4.8)),
        ("banana", food("Banana, raw", 105.0, 1.3, 27.0, 0.4)),
    ]
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let response = app.oneshot(get("/health")).await.expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "macrometer-server");
}

#[tokio::test]
async fn nutrition_query_resolves_a_full_phrase() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), pantry());

    let response = app
        .oneshot(get("/api/nutrition/query?query=2%20eggs%20and%20a%20banana"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["partial"], false);
    assert_eq!(body["calories"], 249);
    assert_eq!(body["name"], "2 x Egg, whole, raw, 1 x Banana, raw");
}

#[tokio::test]
async fn nutrition_query_reports_partial_resolution() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), pantry());

    let response = app
        .oneshot(get("/api/nutrition/query?query=eggs%20and%20dragonfruit"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["partial"], true);
    assert_eq!(body["missing"][0], "dragonfruit");
}

#[tokio::test]
async fn nutrition_query_total_failure_is_still_http_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let response = app
        .oneshot(get("/api/nutrition/query?query=unicorn%20steak"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["found"], false);
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("unicorn steak"));
}

#[tokio::test]
async fn nutrition_query_requires_the_query_parameter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let response = app
        .oneshot(get("/api/nutrition/query"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn malformed_phrases_are_rejected_with_400() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), pantry());

    // "2 and eggs" leaves a bare quantity fragment
    let response = app
        .oneshot(get("/api/nutrition/query?query=2%20and%20eggs"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn goals_default_and_update() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let response = app
        .clone()
        .oneshot(get("/api/goals"))
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["calories"], 2000);

    let update = serde_json::json!({
        "calories": 1800, "protein": 140, "carbs": 200, "fat": 60
    });
    let response = app
        .clone()
        .oneshot(json_request("PUT", "/api/goals", &update))
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/goals")).await.expect("responds");
    let body = json_body(response).await;
    assert_eq!(body["calories"], 1800);
}

#[tokio::test]
async fn out_of_range_goals_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let update = serde_json::json!({
        "calories": 900, "protein": 140, "carbs": 200, "fat": 60
    });
    let response = app
        .oneshot(json_request("PUT", "/api/goals", &update))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
}

#[tokio::test]
async fn logging_a_meal_appears_in_the_daily_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let meal = serde_json::json!({
        "description": "2 eggs and a banana",
        "calories": 249.0, "protein": 13.9, "carbs": 27.8, "fat": 10.0
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/meals", &meal))
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/meals")).await.expect("responds");
    let body = json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["meals"][0]["description"], "2 eggs and a banana");
    assert!((body["totals"]["calories"].as_f64().expect("calories") - 249.0).abs() < 1e-9);

    // The day is persisted to the history file
    assert!(dir.path().join("history.json").exists());
}

#[tokio::test]
async fn negative_macros_are_rejected_when_logging() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let meal = serde_json::json!({
        "description": "mystery", "calories": -10.0,
        "protein": 0.0, "carbs": 0.0, "fat": 0.0
    });
    let response = app
        .oneshot(json_request("POST", "/api/meals", &meal))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn favorites_flow_save_duplicate_and_relog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let favorite = serde_json::json!({
        "description": "Greek yogurt bowl",
        "calories": 220.0, "protein": 18.0, "carbs": 8.0, "fat": 11.0
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/favorites", &favorite))
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::CREATED);
    let saved = json_body(response).await;
    let id = saved["id"].as_str().expect("id").to_owned();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/favorites", &favorite))
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/favorites/{id}/log"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/meals")).await.expect("responds");
    let body = json_body(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["meals"][0]["description"], "Greek yogurt bowl");
}

#[tokio::test]
async fn history_export_returns_csv() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let meal = serde_json::json!({
        "description": "lunch",
        "calories": 600.0, "protein": 30.0, "carbs": 60.0, "fat": 20.0
    });
    app.clone()
        .oneshot(json_request("POST", "/api/meals", &meal))
        .await
        .expect("responds");

    let response = app
        .oneshot(get("/api/history/export"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .expect("content type")
        .starts_with("text/csv"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let csv = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(csv.starts_with("Date,Meals,Calories,Protein (g),Carbs (g),Fat (g),Calorie Goal,Goal %"));
    assert!(csv.contains(",600,30.0,60.0,20.0,2000,30.0"));
}

#[tokio::test]
async fn history_window_requests_are_capped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), vec![]);

    let response = app
        .oneshot(get("/api/history?days=18446744073709551615"))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["days"].as_array().expect("days array").len(), 365);
}

#[tokio::test]
async fn recipe_per_serving_derives_from_unrounded_totals() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), pantry());

    // 2 bananas: protein 2.6g, fat 0.8g unrounded. Dividing the rounded
    // totals (3g, 1g) by 2 servings would report 2g and 1g per serving;
    // rounding once from the unrounded sums gives 1g and 0g.
    let request = serde_json::json!({
        "ingredients": "2 banana",
        "servings": 2
    });
    let response = app
        .oneshot(json_request("POST", "/api/recipes/analyze", &request))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"]["protein"], 3);
    assert_eq!(body["total"]["fat"], 1);
    assert_eq!(body["per_serving"]["protein"], 1);
    assert_eq!(body["per_serving"]["fat"], 0);
    assert_eq!(body["per_serving"]["calories"], 105);
}

#[tokio::test]
async fn recipe_analysis_divides_totals_across_servings() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = test_app(dir.path(), pantry());

    let request = serde_json::json!({
        "ingredients": "2 eggs and a banana",
        "servings": 2
    });
    let response = app
        .oneshot(json_request("POST", "/api/recipes/analyze", &request))
        .await
        .expect("responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["found"], true);
    assert_eq!(body["servings"], 2);
    assert_eq!(body["total"]["calories"], 249);
    // 249 / 2 = 124.5, rounded once at the end
    assert_eq!(body["per_serving"]["calories"], 125);
}
