// ABOUTME: Query segmenter splitting meal phrases into quantified food items
// ABOUTME: Handles separators, leading counts, and the articles "a"/"an"
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query segmentation
//!
//! Splits a free-form meal phrase like "2 eggs and a banana" into ordered
//! [`ItemDescriptor`]s. Splitting is purely lexical: fragments are cut at
//! commas and at the standalone word "and", then each fragment is checked
//! for a leading quantity. No food-vocabulary knowledge is involved, so
//! "chicken breast with rice" stays one item.

use macrometer_core::errors::{AppError, AppResult};
use macrometer_core::models::ItemDescriptor;
use regex::Regex;
use std::sync::LazyLock;

/// Fragment separators: a comma, or "and" as a standalone word
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i),|\s+and\s+").unwrap_or_else(|e| panic!("invalid separator regex: {e}"))
});

/// Leading quantity: a number (integer or decimal) or the article "a"/"an",
/// followed by at least one word of item text
static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?|an?)\s+(\S.*)$")
        .unwrap_or_else(|e| panic!("invalid quantity regex: {e}"))
});

/// A fragment that is nothing but a quantity, e.g. "2" or "an"
static BARE_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+(?:\.\d+)?|an?)$")
        .unwrap_or_else(|e| panic!("invalid bare-quantity regex: {e}"))
});

/// Split a meal phrase into ordered, quantified items.
///
/// Each fragment either starts with a quantity ("2 eggs", "1.5 cups rice",
/// "a banana") or carries none and defaults to 1. Output order matches
/// input order.
///
/// # Errors
///
/// Returns [`AppError`] with `InvalidInput` when the phrase is empty or
/// whitespace, when every fragment is empty after splitting, or when a
/// fragment is a quantity with no item text (e.g. "2 and eggs" leaves a
/// bare "2").
pub fn segment(phrase: &str) -> AppResult<Vec<ItemDescriptor>> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("meal description is empty"));
    }

    let mut items = Vec::new();
    for fragment in SEPARATOR.split(trimmed) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            // "eggs, , toast" -- skip the hole rather than reject the meal
            continue;
        }

        if BARE_QUANTITY.is_match(fragment) {
            return Err(AppError::invalid_input(format!(
                "'{fragment}' is a quantity with no food item"
            )));
        }

        items.push(parse_fragment(fragment)?);
    }

    if items.is_empty() {
        return Err(AppError::invalid_input(
            "meal description contains no food items",
        ));
    }

    Ok(items)
}

/// Parse one fragment into a descriptor, defaulting the quantity to 1
fn parse_fragment(fragment: &str) -> AppResult<ItemDescriptor> {
    let Some(captures) = LEADING_QUANTITY.captures(fragment) else {
        return Ok(ItemDescriptor::unquantified(fragment));
    };

    let quantity_text = &captures[1];
    let text = captures[2].trim();

    let quantity = if quantity_text.eq_ignore_ascii_case("a")
        || quantity_text.eq_ignore_ascii_case("an")
    {
        1.0
    } else {
        quantity_text.parse::<f64>().map_err(|_| {
            AppError::invalid_input(format!("'{quantity_text}' is not a valid quantity"))
        })?
    };

    if quantity <= 0.0 {
        return Err(AppError::invalid_input(format!(
            "quantity must be positive, got '{quantity_text}'"
        )));
    }

    Ok(ItemDescriptor::new(quantity, text))
}
