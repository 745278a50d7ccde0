// ABOUTME: Daily nutrition arithmetic shared by tracking endpoints
// ABOUTME: Totals, remaining-vs-goal, per-serving scaling, and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nutrition calculations

use macrometer_core::models::{DailyGoals, Meal, NutrientTotals};

/// Calorie factors per gram of each macronutrient
const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
const KCAL_PER_GRAM_CARBS: f64 = 4.0;
const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Progress toward one daily goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    /// Below 80% of the goal
    Under,
    /// At or above 80% but below the goal
    Approaching,
    /// At or above the goal
    Met,
}

/// Share of calories contributed by each macro, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroPercentages {
    /// Protein share
    pub protein: f64,
    /// Carbohydrate share
    pub carbs: f64,
    /// Fat share
    pub fat: f64,
}

/// Sum the macros of a day's meals
#[must_use]
pub fn calculate_totals(meals: &[Meal]) -> NutrientTotals {
    let mut totals = NutrientTotals::default();
    for meal in meals {
        totals.add_meal(meal);
    }
    totals
}

/// What is left of each goal after the day's totals; negative when over
#[must_use]
pub fn calculate_remaining(goals: &DailyGoals, totals: &NutrientTotals) -> NutrientTotals {
    NutrientTotals {
        calories: f64::from(goals.calories) - totals.calories,
        protein: f64::from(goals.protein) - totals.protein,
        carbs: f64::from(goals.carbs) - totals.carbs,
        fat: f64::from(goals.fat) - totals.fat,
    }
}

/// Scale recipe totals down to one serving. Serving counts below 1 are
/// treated as 1.
#[must_use]
pub fn calculate_per_serving(totals: &NutrientTotals, servings: u32) -> NutrientTotals {
    let divisor = f64::from(servings.max(1));
    NutrientTotals {
        calories: totals.calories / divisor,
        protein: totals.protein / divisor,
        carbs: totals.carbs / divisor,
        fat: totals.fat / divisor,
    }
}

/// Macro calorie split of a day's totals.
///
/// Percentages come from the macro-derived calories (4/4/9 kcal per
/// gram), not the reported calorie total, so they always sum to 100 for
/// non-empty intake.
#[must_use]
pub fn macro_percentages(totals: &NutrientTotals) -> MacroPercentages {
    let protein_kcal = totals.protein * KCAL_PER_GRAM_PROTEIN;
    let carbs_kcal = totals.carbs * KCAL_PER_GRAM_CARBS;
    let fat_kcal = totals.fat * KCAL_PER_GRAM_FAT;
    let macro_kcal = protein_kcal + carbs_kcal + fat_kcal;

    if macro_kcal <= 0.0 {
        return MacroPercentages {
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
        };
    }

    MacroPercentages {
        protein: protein_kcal / macro_kcal * 100.0,
        carbs: carbs_kcal / macro_kcal * 100.0,
        fat: fat_kcal / macro_kcal * 100.0,
    }
}

/// Classify progress toward a goal value
#[must_use]
pub fn goal_status(current: f64, goal: u32) -> GoalStatus {
    if goal == 0 {
        return GoalStatus::Met;
    }
    let ratio = current / f64::from(goal);
    if ratio >= 1.0 {
        GoalStatus::Met
    } else if ratio >= 0.8 {
        GoalStatus::Approaching
    } else {
        GoalStatus::Under
    }
}

/// One-line human-readable summary of a set of totals
#[must_use]
pub fn format_nutrition_summary(totals: &NutrientTotals) -> String {
    format!(
        "{:.0} kcal | {:.1}g protein | {:.1}g carbs | {:.1}g fat",
        totals.calories, totals.protein, totals.carbs, totals.fat
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(calories: f64, protein: f64, carbs: f64, fat: f64) -> NutrientTotals {
        NutrientTotals {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    #[test]
    fn totals_sum_across_meals() {
        let meals = vec![
            Meal::new("breakfast", totals(400.0, 20.0, 40.0, 15.0)),
            Meal::new("lunch", totals(600.0, 35.0, 55.0, 22.0)),
        ];
        let day = calculate_totals(&meals);
        assert!((day.calories - 1000.0).abs() < f64::EPSILON);
        assert!((day.protein - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remaining_goes_negative_when_over_goal() {
        let goals = DailyGoals::default();
        let remaining = calculate_remaining(&goals, &totals(2200.0, 100.0, 100.0, 30.0));
        assert!((remaining.calories - -200.0).abs() < f64::EPSILON);
        assert!((remaining.protein - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn per_serving_floors_servings_at_one() {
        let recipe = totals(800.0, 40.0, 80.0, 30.0);
        let per = calculate_per_serving(&recipe, 4);
        assert!((per.calories - 200.0).abs() < f64::EPSILON);

        let per_zero = calculate_per_serving(&recipe, 0);
        assert!((per_zero.calories - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn macro_percentages_sum_to_one_hundred() {
        let pct = macro_percentages(&totals(0.0, 100.0, 200.0, 50.0));
        assert!((pct.protein + pct.carbs + pct.fat - 100.0).abs() < 1e-9);
        // 400 + 800 + 450 = 1650 macro kcal
        assert!((pct.fat - 450.0 / 1650.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn macro_percentages_of_empty_day_are_zero() {
        let pct = macro_percentages(&NutrientTotals::default());
        assert!((pct.protein).abs() < f64::EPSILON);
    }

    #[test]
    fn goal_status_thresholds() {
        assert_eq!(goal_status(1500.0, 2000), GoalStatus::Under);
        assert_eq!(goal_status(1600.0, 2000), GoalStatus::Approaching);
        assert_eq!(goal_status(2000.0, 2000), GoalStatus::Met);
        assert_eq!(goal_status(2400.0, 2000), GoalStatus::Met);
        assert_eq!(goal_status(0.0, 0), GoalStatus::Met);
    }

    #[test]
    fn summary_formats_whole_calories_and_tenth_gram_macros() {
        let line = format_nutrition_summary(&totals(512.4, 31.25, 44.0, 12.5));
        assert_eq!(line, "512 kcal | 31.2g protein | 44.0g carbs | 12.5g fat");
    }
}
