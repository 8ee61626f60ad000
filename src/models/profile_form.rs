// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile edit form: required-field validation and merge into the profile.

use serde::Deserialize;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{MacroRatio, Sex, UserProfile};

/// Field name (camelCase, as the UI knows it) to error code.
pub type FieldErrors = BTreeMap<String, String>;

/// Submitted profile form. Every field the UI marks as required is optional
/// here so that a missing field is reported instead of failing to parse.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[validate(required, custom(function = "not_blank"))]
    pub first_name: Option<String>,
    #[validate(required, custom(function = "not_blank"))]
    pub last_name: Option<String>,
    #[validate(required)]
    pub age: Option<u32>,
    #[validate(required)]
    pub sex: Option<Sex>,
    #[serde(default)]
    pub is_pregnant: bool,
    #[serde(default)]
    pub is_lactating: bool,
    #[validate(required)]
    pub macro_ratio: Option<MacroRatio>,
    #[validate(required)]
    pub height: Option<f64>,
    #[validate(required)]
    pub weight: Option<f64>,
}

impl ProfileForm {
    /// Prefill a form from the current profile.
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            first_name: Some(profile.first_name.clone()),
            last_name: Some(profile.last_name.clone()),
            age: Some(profile.age),
            sex: Some(profile.sex),
            is_pregnant: profile.is_pregnant,
            is_lactating: profile.is_lactating,
            macro_ratio: Some(profile.macro_ratio),
            height: Some(profile.height),
            weight: Some(profile.weight),
        }
    }

    /// Validate the form and merge it into a copy of `profile`.
    ///
    /// The food log is carried over untouched. Life-stage flags are cleared
    /// for male profiles.
    pub fn apply_to(&self, profile: &UserProfile) -> Result<UserProfile, FieldErrors> {
        self.validate().map_err(|e| field_errors(&e))?;

        // validate() guarantees every required field is present
        let (
            Some(first_name),
            Some(last_name),
            Some(age),
            Some(sex),
            Some(macro_ratio),
            Some(height),
            Some(weight),
        ) = (
            self.first_name.clone(),
            self.last_name.clone(),
            self.age,
            self.sex,
            self.macro_ratio,
            self.height,
            self.weight,
        )
        else {
            return Err(self.missing_fields());
        };

        let mut updated = UserProfile {
            first_name,
            last_name,
            age,
            sex,
            is_pregnant: self.is_pregnant,
            is_lactating: self.is_lactating,
            macro_ratio,
            height,
            weight,
            logged_food: profile.logged_food.clone(),
        };
        updated.normalize_life_stage();
        Ok(updated)
    }

    fn missing_fields(&self) -> FieldErrors {
        let present = [
            ("firstName", self.first_name.is_some()),
            ("lastName", self.last_name.is_some()),
            ("age", self.age.is_some()),
            ("sex", self.sex.is_some()),
            ("macroRatio", self.macro_ratio.is_some()),
            ("height", self.height.is_some()),
            ("weight", self.weight.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(field, _)| (field.to_string(), "required".to_string()))
            .collect()
    }
}

/// Whitespace-only text counts as missing.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Flatten validator errors into one code per field.
fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first()
                .map(|e| (to_camel_case(&field), e.code.to_string()))
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
