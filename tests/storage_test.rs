// ABOUTME: Tests for the JSON-file history and favorites stores
// ABOUTME: Round-trips, recent-window placeholders, CSV export, duplicates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(missing_docs)]

use chrono::NaiveDate;
use macrometer::storage::{FavoritesStore, HistoryStore};
use macrometer_core::models::{DailyGoals, Meal, NutrientTotals};
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn meal(description: &str, calories: f64, protein: f64, carbs: f64, fat: f64) -> Meal {
    Meal::new(
        description,
        NutrientTotals {
            calories,
            protein,
            carbs,
            fat,
        },
    )
}

#[test]
fn history_round_trips_through_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let today = date(2025, 3, 10);
    let meals = vec![
        meal("2 eggs", 144.0, 12.6, 0.8, 9.6),
        meal("banana", 105.0, 1.3, 27.0, 0.4),
    ];

    {
        let mut store = HistoryStore::load(dir.path());
        store
            .record_day(today, &meals, DailyGoals::default())
            .expect("saves");
    }

    let reloaded = HistoryStore::load(dir.path());
    assert_eq!(reloaded.len(), 1);
    let record = reloaded.day(today).expect("day exists");
    assert_eq!(record.meal_count, 2);
    assert!((record.totals.calories - 249.0).abs() < f64::EPSILON);
    assert_eq!(record.goals, Some(DailyGoals::default()));
}

#[test]
fn recent_window_fills_missing_days_with_placeholders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = HistoryStore::load(dir.path());
    store
        .record_day(date(2025, 3, 9), &[meal("oatmeal", 150.0, 5.0, 27.0, 3.0)], DailyGoals::default())
        .expect("saves");

    let window = store.recent(date(2025, 3, 10), 3);

    assert_eq!(window.len(), 3);
    assert_eq!(window[0].0, "2025-03-08");
    assert_eq!(window[0].1.meal_count, 0);
    assert_eq!(window[1].0, "2025-03-09");
    assert_eq!(window[1].1.meal_count, 1);
    assert_eq!(window[2].0, "2025-03-10");
    assert_eq!(window[2].1.meal_count, 0);
}

#[test]
fn csv_export_has_the_expected_header_and_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = HistoryStore::load(dir.path());
    store
        .record_day(
            date(2025, 3, 9),
            &[meal("lunch", 1000.0, 50.0, 120.0, 30.0)],
            DailyGoals::default(),
        )
        .expect("saves");

    let csv = store.export_csv(date(2025, 3, 10), 7);
    let mut lines = csv.lines();

    assert_eq!(
        lines.next(),
        Some("Date,Meals,Calories,Protein (g),Carbs (g),Fat (g),Calorie Goal,Goal %")
    );
    // 1000 / 2000 = 50.0%
    assert_eq!(
        lines.next(),
        Some("2025-03-09,1,1000,50.0,120.0,30.0,2000,50.0")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn corrupt_history_file_starts_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("history.json"), "not json at all").expect("writes");

    let store = HistoryStore::load(dir.path());
    assert!(store.is_empty());
}

#[test]
fn favorites_round_trip_and_reject_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let today = date(2025, 3, 10);
    let macros = NutrientTotals {
        calories: 220.0,
        protein: 18.0,
        carbs: 8.0,
        fat: 11.0,
    };

    let saved = {
        let mut store = FavoritesStore::load(dir.path());
        let saved = store.add("Greek yogurt bowl", macros, today).expect("adds");

        // Same description, different case
        let duplicate = store.add("greek YOGURT bowl", macros, today);
        assert!(duplicate.is_err());
        saved
    };

    let reloaded = FavoritesStore::load(dir.path());
    assert_eq!(reloaded.list().len(), 1);
    assert_eq!(reloaded.get(saved.id).expect("exists").description, "Greek yogurt bowl");
}

#[test]
fn removing_a_favorite_persists_and_missing_ids_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let today = date(2025, 3, 10);
    let macros = NutrientTotals::default();

    let mut store = FavoritesStore::load(dir.path());
    let saved = store.add("protein shake", macros, today).expect("adds");

    store.remove(saved.id).expect("removes");
    assert!(store.remove(saved.id).is_err());

    let reloaded = FavoritesStore::load(dir.path());
    assert!(reloaded.list().is_empty());
}
