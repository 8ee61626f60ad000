// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model held by the session.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::LoggedFood;

/// Biological sex, as used by the intake tables of the recommendation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Sex {
    M,
    F,
}

/// Dietary objective used to bias recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MacroRatio {
    Maintain,
    Loss,
    Gain,
    Keto,
}

/// The session user's profile and food log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub sex: Sex,
    /// Only meaningful when `sex` is `F`
    #[serde(default)]
    pub is_pregnant: bool,
    /// Only meaningful when `sex` is `F`
    #[serde(default)]
    pub is_lactating: bool,
    pub macro_ratio: MacroRatio,
    /// Height in inches
    pub height: f64,
    /// Weight in pounds
    pub weight: f64,
    /// Chronological (insertion-ordered) food log
    #[serde(default)]
    pub logged_food: Vec<LoggedFood>,
}

impl UserProfile {
    /// Clear life-stage flags that do not apply to the profile's sex.
    pub fn normalize_life_stage(&mut self) {
        if self.sex == Sex::M {
            self.is_pregnant = false;
            self.is_lactating = false;
        }
    }

    /// Find a log entry by ID.
    pub fn find_logged_food(&self, id: &str) -> Option<&LoggedFood> {
        self.logged_food.iter().find(|f| f.id == id)
    }
}
