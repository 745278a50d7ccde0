// ABOUTME: Meal aggregator driving a phrase through segmentation and resolution
// ABOUTME: Sums scaled nutrients sequentially and classifies the outcome
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meal aggregation
//!
//! Takes a raw meal phrase, segments it, resolves each item through the
//! upstream in input order, scales by quantity, and sums into one
//! outcome. Fractional totals accumulate unrounded; rounding happens
//! exactly once, on the final sums.
//!
//! Items resolve one at a time. A semaphore with a single permit enforces
//! this rather than an incidental `for`-loop ordering, so the guarantee
//! survives refactoring and is observable in tests.

use crate::config::{ResolutionConfig, UsdaConfig};
use crate::external::FoodSearch;
use anyhow::Context as _;
use crate::nutrition::resolver::{ItemResolution, ItemResolver};
use crate::query::segment;
use macrometer_core::errors::{AppError, AppResult};
use macrometer_core::models::{AggregateOutcome, MealQueryOutcome, NutrientTotals};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Limits how many upstream lookups run at once.
///
/// Defaults to one permit: lookups stay strictly sequential out of
/// politeness to the upstream rate limit.
#[derive(Clone)]
pub struct ResolutionPolicy {
    permits: Arc<Semaphore>,
}

impl ResolutionPolicy {
    /// One lookup at a time
    #[must_use]
    pub fn sequential() -> Self {
        Self::with_limit(1)
    }

    /// At most `limit` lookups at a time
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(limit.max(1))),
        }
    }
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Unrounded result of resolving a phrase where at least one item matched.
///
/// Carries the running totals before the final rounding step so callers
/// that derive further numbers (per-serving breakdowns) can round once at
/// the very end instead of compounding rounding error.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseResolution {
    /// Quantity-weighted sums over the resolved items, unrounded
    pub totals: NutrientTotals,
    /// Joined description of matched items, e.g. "2 x Egg, 1 x Banana"
    pub name: String,
    /// Original texts of unresolved items, in input order
    pub missing: Vec<String>,
}

/// Resolves whole meal phrases into aggregate nutrition
pub struct MealAggregator {
    resolver: ItemResolver,
    policy: ResolutionPolicy,
}

impl MealAggregator {
    /// Build an aggregator over a search backend with explicit tuning
    pub fn new(search: Arc<dyn FoodSearch>, resolution: &ResolutionConfig, page_size: u32) -> Self {
        Self {
            resolver: ItemResolver::new(
                search,
                resolution.max_retries,
                Duration::from_millis(resolution.backoff_ms),
                page_size,
            ),
            policy: ResolutionPolicy::with_limit(resolution.lookup_concurrency),
        }
    }

    /// Convenience constructor from the USDA client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the upstream HTTP client cannot be built.
    pub fn from_config(usda: &UsdaConfig, resolution: &ResolutionConfig) -> anyhow::Result<Self> {
        let client = Arc::new(
            crate::external::UsdaClient::new(usda)
                .context("cannot build USDA HTTP client")?,
        );
        Ok(Self::new(client, resolution, usda.page_size))
    }

    /// Resolve a meal phrase into a single nutrition outcome.
    ///
    /// Items are processed in input order. A resolved item contributes its
    /// nutrients multiplied by its quantity; a missed item lands in the
    /// `missing` list and marks the outcome partial. When nothing
    /// resolves, the outcome is a total failure carrying a user-facing
    /// message rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] with `InvalidInput` when the phrase fails
    /// segmentation. Upstream trouble never surfaces here; it degrades to
    /// missing items.
    pub async fn resolve_phrase(&self, phrase: &str) -> AppResult<MealQueryOutcome> {
        let Some(resolution) = self.resolve_phrase_totals(phrase).await? else {
            return Ok(MealQueryOutcome::total_failure(phrase));
        };

        let outcome =
            AggregateOutcome::from_totals(resolution.totals, resolution.name, resolution.missing);
        info!(
            name = %outcome.name,
            calories = outcome.calories,
            partial = outcome.partial,
            "resolved meal phrase"
        );
        Ok(MealQueryOutcome::Resolved(outcome))
    }

    /// Resolve a meal phrase into unrounded totals, or `None` when no
    /// item resolved. Rounding is left to the caller so derived numbers
    /// are rounded exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] with `InvalidInput` when the phrase fails
    /// segmentation.
    pub async fn resolve_phrase_totals(
        &self,
        phrase: &str,
    ) -> AppResult<Option<PhraseResolution>> {
        let items = segment(phrase)?;
        debug!(item_count = items.len(), "segmented meal phrase");

        let mut totals = NutrientTotals::default();
        let mut found_parts: Vec<String> = Vec::new();
        let mut missing: Vec<String> = Vec::new();

        for item in &items {
            let _permit = self
                .policy
                .permits
                .acquire()
                .await
                .map_err(|e| AppError::internal(format!("resolution semaphore closed: {e}")))?;

            match self.resolver.resolve(&item.text).await {
                ItemResolution::Hit(result) => {
                    totals.add_scaled(&result, item.quantity);
                    found_parts.push(format!(
                        "{} x {}",
                        format_quantity(item.quantity),
                        result.name
                    ));
                }
                ItemResolution::Miss(_) => missing.push(item.text.clone()),
            }
        }

        if found_parts.is_empty() {
            info!(phrase = %phrase, "no items in meal phrase resolved");
            return Ok(None);
        }

        Ok(Some(PhraseResolution {
            totals,
            name: found_parts.join(", "),
            missing,
        }))
    }
}

/// Render a quantity without a trailing ".0" for whole numbers
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{quantity:.0}")
    } else {
        format!("{quantity}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_quantities_render_without_decimals() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.0), "1");
    }

    #[test]
    fn fractional_quantities_keep_their_digits() {
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
    }
}
