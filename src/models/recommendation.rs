// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wire types for the external recommendation service.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{LoggedAmount, MacroRatio, Sex, UserProfile};

/// Body of `POST /api/recommend`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub age: u32,
    pub sex: Sex,
    pub is_pregnant: bool,
    pub is_lactating: bool,
    pub macro_ratio: MacroRatio,
    pub height_inches: f64,
    pub weight_pounds: f64,
    pub food_log: Vec<LoggedAmount>,
}

impl RecommendationRequest {
    /// Copy biometrics from the profile and attach an already-filtered food log.
    pub fn new(profile: &UserProfile, food_log: Vec<LoggedAmount>) -> Self {
        Self {
            age: profile.age,
            sex: profile.sex,
            is_pregnant: profile.is_pregnant,
            is_lactating: profile.is_lactating,
            macro_ratio: profile.macro_ratio,
            height_inches: profile.height,
            weight_pounds: profile.weight,
            food_log,
        }
    }
}

/// A food suggested by the recommendation service.
///
/// Only `name` is guaranteed; everything else is display sugar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendedFood {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub fdc_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortened_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emojis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significant_3: Option<String>,
}

impl RecommendedFood {
    /// Display label: the short name (or full name) followed by any emojis.
    pub fn label(&self) -> String {
        let name = self.shortened_name.as_deref().unwrap_or(&self.name);
        match self.emojis.as_deref() {
            Some(emojis) if !emojis.is_empty() => format!("{} {}", name, emojis),
            _ => name.to_string(),
        }
    }

    /// The nutrient call-outs that are present, in order.
    pub fn significant_nutrients(&self) -> impl Iterator<Item = &str> {
        [&self.significant_1, &self.significant_2, &self.significant_3]
            .into_iter()
            .filter_map(|s| s.as_deref())
    }
}
