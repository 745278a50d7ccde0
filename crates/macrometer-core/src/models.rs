// ABOUTME: Domain models for meal resolution, daily logging, and history
// ABOUTME: Item descriptors, nutrient results, aggregate outcomes, meals, goals
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common data models for nutrition data.

use crate::constants::{conversions, goal_defaults};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One parsed (quantity, text) pair extracted from a segment of a
/// multi-food phrase. Produced by the segmenter, consumed by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// How many of the item; positive, defaults to 1
    pub quantity: f64,
    /// The food description to look up, never empty
    pub text: String,
}

impl ItemDescriptor {
    /// Create a descriptor for a quantified item
    pub fn new(quantity: f64, text: impl Into<String>) -> Self {
        Self {
            quantity,
            text: text.into(),
        }
    }

    /// Create a descriptor with the default quantity of 1
    pub fn unquantified(text: impl Into<String>) -> Self {
        Self::new(1.0, text)
    }
}

/// One resolved food match with per-unit macro values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientResult {
    /// Matched food description from the upstream database
    pub name: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein, grams
    pub protein: f64,
    /// Carbohydrates, grams
    pub carbs: f64,
    /// Fat, grams
    pub fat: f64,
}

/// Running macro totals, accumulated as floats and rounded only once
/// at the aggregate step so error does not compound across items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    /// Calories (kcal)
    pub calories: f64,
    /// Protein, grams
    pub protein: f64,
    /// Carbohydrates, grams
    pub carbs: f64,
    /// Fat, grams
    pub fat: f64,
}

impl NutrientTotals {
    /// Add a resolved item's per-unit values scaled by its quantity
    pub fn add_scaled(&mut self, result: &NutrientResult, quantity: f64) {
        self.calories += quantity * result.calories;
        self.protein += quantity * result.protein;
        self.carbs += quantity * result.carbs;
        self.fat += quantity * result.fat;
    }

    /// Add a logged meal's macros
    pub fn add_meal(&mut self, meal: &Meal) {
        self.calories += meal.calories;
        self.protein += meal.protein;
        self.carbs += meal.carbs;
        self.fat += meal.fat;
    }
}

/// Terminal artifact of resolving a multi-item phrase. Built once per
/// request and never mutated after return.
///
/// Invariant: the nutrient fields equal the quantity-weighted sum over
/// exactly the items that resolved; `missing` lists exactly the items
/// that did not resolve, in original order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOutcome {
    /// True iff at least one item resolved
    pub found: bool,
    /// Joined description of matched items, e.g. "2 x Egg, 1 x Banana"
    pub name: String,
    /// Summed calories, rounded once at the aggregate step
    pub calories: u32,
    /// Summed protein (g), rounded once
    pub protein: u32,
    /// Summed carbohydrates (g), rounded once
    pub carbs: u32,
    /// Summed fat (g), rounded once
    pub fat: u32,
    /// True iff at least one but not all items resolved
    pub partial: bool,
    /// Original texts of unresolved items, in input order
    pub missing: Vec<String>,
}

impl AggregateOutcome {
    /// Build the outcome from running totals and the per-item bookkeeping
    #[must_use]
    pub fn from_totals(totals: NutrientTotals, name: String, missing: Vec<String>) -> Self {
        Self {
            found: true,
            name,
            calories: conversions::round_f64_to_u32(totals.calories),
            protein: conversions::round_f64_to_u32(totals.protein),
            carbs: conversions::round_f64_to_u32(totals.carbs),
            fat: conversions::round_f64_to_u32(totals.fat),
            partial: !missing.is_empty(),
            missing,
        }
    }
}

/// Result of a meal query: either an aggregate outcome or a total
/// resolution failure. Serializes flat, so callers see either the
/// outcome fields or `{found: false, error: <message>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MealQueryOutcome {
    /// At least one item resolved
    Resolved(AggregateOutcome),
    /// No item resolved
    Unresolved {
        /// Always false
        found: bool,
        /// Message naming the original phrase
        error: String,
    },
}

impl MealQueryOutcome {
    /// Total resolution failure for the given phrase
    #[must_use]
    pub fn total_failure(phrase: &str) -> Self {
        Self::Unresolved {
            found: false,
            error: format!(
                "Couldn't find nutrition data for '{phrase}'. Try being more specific."
            ),
        }
    }

    /// Whether any item resolved
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// One meal logged to the daily log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique meal id
    pub id: Uuid,
    /// The user's description of the meal
    pub description: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein, grams
    pub protein: f64,
    /// Carbohydrates, grams
    pub carbs: f64,
    /// Fat, grams
    pub fat: f64,
    /// When the meal was logged
    pub logged_at: DateTime<Utc>,
}

impl Meal {
    /// Log a new meal with the given description and macros
    pub fn new(description: impl Into<String>, macros: NutrientTotals) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            calories: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
            logged_at: Utc::now(),
        }
    }
}

/// Configurable daily nutrition goals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoals {
    /// Daily calories
    pub calories: u32,
    /// Daily protein, grams
    pub protein: u32,
    /// Daily carbohydrates, grams
    pub carbs: u32,
    /// Daily fat, grams
    pub fat: u32,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calories: goal_defaults::CALORIES,
            protein: goal_defaults::PROTEIN,
            carbs: goal_defaults::CARBS,
            fat: goal_defaults::FAT,
        }
    }
}

/// One day's worth of logged meals, as persisted to history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Meals logged on this day
    pub meals: Vec<Meal>,
    /// Summed macros for the day
    pub totals: NutrientTotals,
    /// Goals in effect when the day was saved, if any
    pub goals: Option<DailyGoals>,
    /// Number of meals logged
    pub meal_count: usize,
}

impl DayRecord {
    /// An empty placeholder day (no meals logged)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            meals: Vec::new(),
            totals: NutrientTotals::default(),
            goals: None,
            meal_count: 0,
        }
    }
}

/// A saved favorite meal for quick re-logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteMeal {
    /// Unique favorite id
    pub id: Uuid,
    /// The meal description
    pub description: String,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein, grams
    pub protein: f64,
    /// Carbohydrates, grams
    pub carbs: f64,
    /// Fat, grams
    pub fat: f64,
    /// Date the favorite was saved
    pub added_date: NaiveDate,
}
