// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Implements the food search request behind the FoodSearch trait seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! USDA `FoodData` Central API Client
//!
//! One operation is consumed by the resolution pipeline: food search.
//! The search endpoint already returns nutrient values inline, so no
//! follow-up detail request is needed.
//!
//! The client sits behind the [`FoodSearch`] trait so the resolver can be
//! exercised against deterministic stub upstreams in tests. Credentials
//! are injected at construction; nothing reads the key from ambient
//! process state.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::config::UsdaConfig;
use async_trait::async_trait;
use reqwest::ClientBuilder;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Failure of one search attempt against the upstream database.
///
/// Both variants are transient from the resolver's point of view and are
/// eligible for retry; a successful response with zero foods is not an
/// error and is never retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network-level failure (connect, timeout, body read)
    #[error("food database request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success HTTP status from the upstream
    #[error("food database returned HTTP {status}")]
    Status {
        /// The HTTP status code received
        status: u16,
    },
}

/// One candidate food from the search response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodCandidate {
    /// Food description, e.g. "Egg, whole, raw, fresh"
    pub description: String,
    /// Inline nutrient values
    #[serde(rename = "foodNutrients", default)]
    pub food_nutrients: Vec<FoodNutrientEntry>,
}

/// One `{nutrientName, value}` pair from the search response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodNutrientEntry {
    /// Nutrient label, e.g. "Energy" or "Protein"
    #[serde(rename = "nutrientName", default)]
    pub nutrient_name: String,
    /// Amount per 100g (or per serving, per upstream data type)
    #[serde(default)]
    pub value: f64,
}

impl FoodNutrientEntry {
    /// Construct an entry, mainly for stub upstreams in tests
    pub fn new(nutrient_name: impl Into<String>, value: f64) -> Self {
        Self {
            nutrient_name: nutrient_name.into(),
            value,
        }
    }
}

/// USDA API search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodCandidate>,
}

/// Seam between the resolver and the upstream food database.
///
/// One call corresponds to one search attempt; retry policy lives in the
/// resolver, not here.
#[async_trait]
pub trait FoodSearch: Send + Sync {
    /// Search for foods matching `query`, requesting at most `page_size`
    /// candidates, best match first.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure or a non-success
    /// HTTP status.
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<FoodCandidate>, UpstreamError>;
}

/// USDA `FoodData` Central API client
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new client from configuration.
    ///
    /// The underlying HTTP client carries the configured request and
    /// connect timeouts so a hung upstream cannot stall a request
    /// indefinitely.
    ///
    /// # Errors
    ///
    /// Returns the builder error when the HTTP client cannot be
    /// constructed; running without the configured timeouts is not an
    /// acceptable fallback.
    pub fn new(config: &UsdaConfig) -> Result<Self, reqwest::Error> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config.credentials.api_key.clone(),
            base_url: config.base_url.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl FoodSearch for UsdaClient {
    async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> Result<Vec<FoodCandidate>, UpstreamError> {
        let url = format!("{}/foods/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", &page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let search_response: SearchResponse = response.json().await?;
        Ok(search_response.foods)
    }
}
