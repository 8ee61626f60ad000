// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food database references and food log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_utc_rfc3339_millis;

/// A record in the external nutrition database (read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodItem {
    /// FoodData Central ID
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub fdc_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortened_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emojis: Option<String>,
}

/// One record of food consumption in the user's log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoggedFood {
    /// `{fdc_id}-{timestamp}`; unique within a log
    pub id: String,
    /// When the food was logged
    pub date: DateTime<Utc>,
    pub food: FoodItem,
    /// Amount in grams, exactly as the user entered it
    #[serde(default)]
    pub amount: Option<String>,
}

impl LoggedFood {
    /// Create a log entry stamped with `now`.
    pub fn new(food: FoodItem, amount: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Self::make_id(food.fdc_id, now),
            date: now,
            food,
            amount,
        }
    }

    /// Build the log entry ID for a food logged at `at`.
    pub fn make_id(fdc_id: u64, at: DateTime<Utc>) -> String {
        format!("{}-{}", fdc_id, format_utc_rfc3339_millis(at))
    }
}

/// A log entry reduced to what the recommendation service needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LoggedAmount {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub fdc_id: u64,
    /// Grams; never negative
    pub amount: f64,
}
