// ABOUTME: Item resolver mapping one food item to nutrient facts
// ABOUTME: Bounded retry with fixed backoff against the food search upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item resolution
//!
//! One item in, one outcome out: either nutrient facts from the best
//! search candidate, or a miss. Upstream failures are retried a bounded
//! number of times with a fixed pause; a successful search that returns
//! no candidates is a content miss and is never retried.

use crate::external::{FoodCandidate, FoodSearch};
use macrometer_core::constants::nutrient_labels;
use macrometer_core::models::NutrientResult;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of resolving one item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemResolution {
    /// Nutrient facts from the top-ranked candidate
    Hit(NutrientResult),
    /// No facts obtained; the reason is logged but both reasons read the
    /// same to the caller
    Miss(MissReason),
}

/// Why an item failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissReason {
    /// Upstream answered but had no candidate for the query
    NotFound,
    /// Every attempt failed at the transport or HTTP level
    UpstreamExhausted,
}

/// Resolves one food item against the upstream database
pub struct ItemResolver {
    search: Arc<dyn FoodSearch>,
    max_retries: u32,
    backoff: Duration,
    page_size: u32,
}

impl ItemResolver {
    /// Create a resolver over a search backend.
    ///
    /// `max_retries` counts attempts after the first, so the total number
    /// of tries is `max_retries + 1`.
    pub fn new(
        search: Arc<dyn FoodSearch>,
        max_retries: u32,
        backoff: Duration,
        page_size: u32,
    ) -> Self {
        Self {
            search,
            max_retries,
            backoff,
            page_size,
        }
    }

    /// Resolve one item's text into nutrient facts.
    ///
    /// Never returns an error: an exhausted upstream degrades to a miss so
    /// one flaky item cannot fail a whole meal.
    pub async fn resolve(&self, text: &str) -> ItemResolution {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.search.search_foods(text, self.page_size).await {
                Ok(foods) => {
                    let Some(best) = foods.into_iter().next() else {
                        debug!(item = %text, "no candidates for item");
                        return ItemResolution::Miss(MissReason::NotFound);
                    };
                    return ItemResolution::Hit(extract_nutrients(&best));
                }
                Err(err) => {
                    if attempt > self.max_retries {
                        warn!(
                            item = %text,
                            attempts = attempt,
                            error = %err,
                            "food search exhausted retries"
                        );
                        return ItemResolution::Miss(MissReason::UpstreamExhausted);
                    }
                    warn!(
                        item = %text,
                        attempt,
                        error = %err,
                        "food search attempt failed, retrying"
                    );
                    tokio::time::sleep(self.backoff).await;
                }
            }
        }
    }
}

/// Extract macro facts from a candidate's nutrient list.
///
/// Calories prefer the plain "Energy" label when present and non-zero;
/// some records carry a zero "Energy" alongside a populated Atwater
/// variant, in which case the Atwater value wins. Absent labels read as
/// zero.
fn extract_nutrients(food: &FoodCandidate) -> NutrientResult {
    let mut energy = 0.0;
    let mut energy_atwater = 0.0;
    let mut protein = 0.0;
    let mut carbs = 0.0;
    let mut fat = 0.0;

    for entry in &food.food_nutrients {
        match entry.nutrient_name.as_str() {
            nutrient_labels::ENERGY => energy = entry.value,
            nutrient_labels::ENERGY_ATWATER => energy_atwater = entry.value,
            nutrient_labels::PROTEIN => protein = entry.value,
            nutrient_labels::CARBOHYDRATE => carbs = entry.value,
            nutrient_labels::FAT => fat = entry.value,
            _ => {}
        }
    }

    let calories = if energy != 0.0 { energy } else { energy_atwater };

    NutrientResult {
        name: food.description.clone(),
        calories,
        protein,
        carbs,
        fat,
    }
}
