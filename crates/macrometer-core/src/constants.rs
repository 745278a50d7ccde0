// ABOUTME: Application constants for upstream lookups, defaults, and storage
// ABOUTME: Central place for nutrient label names, retry tuning, and file names
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application constants.

/// USDA `FoodData` Central nutrient label names consumed by the resolver.
///
/// The search endpoint reports nutrients as `{nutrientName, value}` pairs;
/// these are the exact labels the macro extraction matches against.
pub mod nutrient_labels {
    /// Calories (kcal) under the standard label
    pub const ENERGY: &str = "Energy";
    /// Calories (kcal) under the alternate Atwater label
    pub const ENERGY_ATWATER: &str = "Energy (Atwater General Factors)";
    /// Protein in grams
    pub const PROTEIN: &str = "Protein";
    /// Carbohydrates in grams
    pub const CARBOHYDRATE: &str = "Carbohydrate, by difference";
    /// Total fat in grams
    pub const FAT: &str = "Total lipid (fat)";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port for the server
    pub const HTTP_PORT: u16 = 8081;
    /// Base URL for the USDA `FoodData` Central API
    pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Number of candidate foods requested per search
    pub const SEARCH_PAGE_SIZE: u32 = 5;
    /// Retry attempts after the initial try (2 retries = up to 3 tries)
    pub const MAX_RETRIES: u32 = 2;
    /// Fixed pause between retries, in milliseconds
    pub const RETRY_BACKOFF_MS: u64 = 300;
    /// Request timeout toward the upstream API, in seconds
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;
    /// Connect timeout toward the upstream API, in seconds
    pub const UPSTREAM_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Concurrent upstream lookups per request; 1 keeps resolution
    /// strictly sequential out of politeness to the upstream rate limit
    pub const LOOKUP_CONCURRENCY: usize = 1;
    /// Rolling history window returned by default
    pub const HISTORY_WINDOW_DAYS: u64 = 7;
    /// Rolling history window exported to CSV by default
    pub const EXPORT_WINDOW_DAYS: u64 = 30;
    /// Largest window a single request may ask for
    pub const MAX_WINDOW_DAYS: u64 = 365;
}

/// Default daily nutrition goals
pub mod goal_defaults {
    /// Daily calories
    pub const CALORIES: u32 = 2000;
    /// Daily protein, grams
    pub const PROTEIN: u32 = 150;
    /// Daily carbohydrates, grams
    pub const CARBS: u32 = 250;
    /// Daily fat, grams
    pub const FAT: u32 = 65;
}

/// Data store file names
pub mod files {
    /// Meal history keyed by date
    pub const HISTORY_FILE: &str = "history.json";
    /// Saved favorite meals
    pub const FAVORITES_FILE: &str = "favorites.json";
}

/// Service names for structured logging
pub mod service_names {
    /// The MacroMeter server service name
    pub const MACROMETER_SERVER: &str = "macrometer-server";
}

/// Safe numeric conversion utilities
pub mod conversions {
    /// Round and convert an `f64` nutrient total to `u32`, clamping to the
    /// valid range. Used when producing the final aggregate outcome.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::missing_const_for_fn
    )]
    #[must_use]
    pub fn round_f64_to_u32(value: f64) -> u32 {
        value.round().max(0.0).min(f64::from(u32::MAX)) as u32
    }
}
