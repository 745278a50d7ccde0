// ABOUTME: Natural-language meal query parsing
// ABOUTME: Splits free-form phrases into quantified food items
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Meal query parsing

/// Phrase segmentation into quantified items
pub mod segmenter;

pub use segmenter::segment;
