// ABOUTME: JSON file persistence for daily history and favorite meals
// ABOUTME: Small stores loaded at startup and written back on change
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed persistence
//!
//! Two small JSON files under the configured data directory: one keyed by
//! day for the meal history, one flat list of favorites. Both stores load
//! tolerantly (a corrupt or missing file starts empty) and write the
//! whole file back on every change.

/// Daily history store (`history.json`)
pub mod history;

/// Favorites store (`favorites.json`)
pub mod favorites;

pub use favorites::FavoritesStore;
pub use history::HistoryStore;
