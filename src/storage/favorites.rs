// ABOUTME: Favorite meals persisted as a flat JSON list
// ABOUTME: Add with duplicate detection, remove by id, lookup for re-logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Favorites store

use chrono::NaiveDate;
use macrometer_core::constants::files;
use macrometer_core::errors::{AppError, AppResult};
use macrometer_core::models::{FavoriteMeal, NutrientTotals};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// Flat list of saved favorite meals
pub struct FavoritesStore {
    path: PathBuf,
    favorites: Vec<FavoriteMeal>,
}

impl FavoritesStore {
    /// Load the favorites file from `data_dir`, starting empty when the
    /// file is absent or unreadable.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(files::FAVORITES_FILE);
        let favorites = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(favorites) => favorites,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "favorites file unreadable, starting empty");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self { path, favorites }
    }

    /// All saved favorites, in insertion order
    #[must_use]
    pub fn list(&self) -> &[FavoriteMeal] {
        &self.favorites
    }

    /// Look up a favorite by id
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&FavoriteMeal> {
        self.favorites.iter().find(|f| f.id == id)
    }

    /// Save a new favorite. Descriptions are compared case-insensitively;
    /// saving "Greek Yogurt" twice is rejected.
    ///
    /// # Errors
    ///
    /// Returns a conflict error for a duplicate description, or a storage
    /// error when the file cannot be written.
    pub fn add(
        &mut self,
        description: &str,
        macros: NutrientTotals,
        today: NaiveDate,
    ) -> AppResult<FavoriteMeal> {
        let duplicate = self
            .favorites
            .iter()
            .any(|f| f.description.eq_ignore_ascii_case(description));
        if duplicate {
            return Err(AppError::already_exists(format!("favorite '{description}'")));
        }

        let favorite = FavoriteMeal {
            id: Uuid::new_v4(),
            description: description.to_owned(),
            calories: macros.calories,
            protein: macros.protein,
            carbs: macros.carbs,
            fat: macros.fat,
            added_date: today,
        };
        self.favorites.push(favorite.clone());
        self.save()?;
        Ok(favorite)
    }

    /// Remove a favorite by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no favorite has that id, or a
    /// storage error when the file cannot be written.
    pub fn remove(&mut self, id: Uuid) -> AppResult<FavoriteMeal> {
        let index = self
            .favorites
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("favorite {id}")))?;
        let removed = self.favorites.remove(index);
        self.save()?;
        Ok(removed)
    }

    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("cannot create data directory: {}", parent.display()))
                    .with_source(e)
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.favorites)
            .map_err(|e| AppError::storage("cannot serialize favorites").with_source(e))?;
        fs::write(&self.path, contents).map_err(|e| {
            AppError::storage(format!("cannot write {}", self.path.display())).with_source(e)
        })
    }
}
