// ABOUTME: Daily meal history persisted as a date-keyed JSON map
// ABOUTME: Recent-window reads with placeholders and CSV export
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Daily history store
//!
//! Keys are `YYYY-MM-DD` strings so the on-disk map sorts
//! chronologically and stays diffable by hand.

use chrono::{Days, NaiveDate};
use macrometer_core::constants::{files, goal_defaults};
use macrometer_core::errors::{AppError, AppResult};
use macrometer_core::models::{DailyGoals, DayRecord, Meal, NutrientTotals};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Date key format used throughout the history file
const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV header for history export
const CSV_HEADER: &str =
    "Date,Meals,Calories,Protein (g),Carbs (g),Fat (g),Calorie Goal,Goal %";

/// Date-keyed store of daily meal records
pub struct HistoryStore {
    path: PathBuf,
    days: BTreeMap<String, DayRecord>,
}

impl HistoryStore {
    /// Load the history file from `data_dir`, starting empty when the
    /// file is absent or unreadable.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(files::HISTORY_FILE);
        let days = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(days) => days,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "history file unreadable, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self { path, days }
    }

    /// Number of days with a saved record
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether no day has been saved yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The saved record for a date, if any
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date.format(DATE_FORMAT).to_string())
    }

    /// Save (or overwrite) one day's record and write the file back.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the data directory cannot be created
    /// or the file cannot be written.
    pub fn record_day(
        &mut self,
        date: NaiveDate,
        meals: &[Meal],
        goals: DailyGoals,
    ) -> AppResult<()> {
        let mut totals = NutrientTotals::default();
        for meal in meals {
            totals.add_meal(meal);
        }

        let record = DayRecord {
            meals: meals.to_vec(),
            totals,
            goals: Some(goals),
            meal_count: meals.len(),
        };
        self.days.insert(date.format(DATE_FORMAT).to_string(), record);
        self.save()
    }

    /// The last `days` days ending at `today`, oldest first. Days with no
    /// saved record appear as empty placeholders so charts and exports
    /// keep a continuous axis.
    #[must_use]
    pub fn recent(&self, today: NaiveDate, days: u64) -> Vec<(String, DayRecord)> {
        window_dates(today, days)
            .map(|date| {
                let key = date.format(DATE_FORMAT).to_string();
                let record = self.days.get(&key).cloned().unwrap_or_else(DayRecord::empty);
                (key, record)
            })
            .collect()
    }

    /// Render the last `days` days as CSV, oldest first, one row per day
    /// with a saved record.
    #[must_use]
    pub fn export_csv(&self, today: NaiveDate, days: u64) -> String {
        let mut out = String::from(CSV_HEADER);
        out.push('\n');

        for date in window_dates(today, days) {
            let key = date.format(DATE_FORMAT).to_string();
            let Some(record) = self.days.get(&key) else {
                continue;
            };

            let calorie_goal = record
                .goals
                .map_or(goal_defaults::CALORIES, |g| g.calories);
            let goal_pct = if calorie_goal == 0 {
                0.0
            } else {
                record.totals.calories / f64::from(calorie_goal) * 100.0
            };

            out.push_str(&format!(
                "{},{},{:.0},{:.1},{:.1},{:.1},{},{:.1}\n",
                key,
                record.meal_count,
                record.totals.calories,
                record.totals.protein,
                record.totals.carbs,
                record.totals.fat,
                calorie_goal,
                goal_pct,
            ));
        }

        out
    }

    fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("cannot create data directory: {}", parent.display()))
                    .with_source(e)
            })?;
        }

        let contents = serde_json::to_string_pretty(&self.days)
            .map_err(|e| AppError::storage("cannot serialize history").with_source(e))?;
        fs::write(&self.path, contents).map_err(|e| {
            AppError::storage(format!("cannot write {}", self.path.display())).with_source(e)
        })
    }
}

/// The dates of the last `days` days ending at `today`, oldest first
fn window_dates(today: NaiveDate, days: u64) -> impl Iterator<Item = NaiveDate> {
    let span = days.max(1);
    (0..span).rev().filter_map(move |back| today.checked_sub_days(Days::new(back)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_runs_oldest_to_newest() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).expect("valid date");
        let dates: Vec<NaiveDate> = window_dates(today, 3).collect();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 3, 8).expect("valid date"));
        assert_eq!(dates[2], today);
    }
}
