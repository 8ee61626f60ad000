// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-owned profile state.
//!
//! The session is the single writer of the user's profile. Every mutation
//! goes through one of the methods here and hands back the resulting
//! profile so the caller can start a recommendation cycle for it.

use crate::error::AppError;
use crate::models::{FoodItem, LoggedFood, ProfileForm, UserProfile};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use tokio::sync::RwLock;

/// Result of submitting the profile form.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub profile: UserProfile,
    /// False when the form matched the stored profile; nothing was written.
    pub changed: bool,
}

/// In-memory profile state for one session.
pub struct Session {
    profile: RwLock<UserProfile>,
}

impl Session {
    pub fn new(mut profile: UserProfile) -> Self {
        profile.normalize_life_stage();
        Self {
            profile: RwLock::new(profile),
        }
    }

    /// Load the initial profile from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| SessionError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load the initial profile from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self, SessionError> {
        let profile: UserProfile = serde_json::from_str(json_data)
            .map_err(|e| SessionError::ParseError(e.to_string()))?;

        tracing::info!(
            logged_food = profile.logged_food.len(),
            "Loaded seed profile"
        );
        Ok(Self::new(profile))
    }

    /// Copy of the current profile.
    pub async fn profile(&self) -> UserProfile {
        self.profile.read().await.clone()
    }

    /// Run `f` against the profile with writers locked out.
    pub async fn with_profile<R>(&self, f: impl FnOnce(&UserProfile) -> R) -> R {
        let profile = self.profile.read().await;
        f(&*profile)
    }

    /// Validate the form and merge it into the profile.
    ///
    /// `on_change` runs with the write lock still held, and only when the
    /// merge changed something.
    pub async fn update_profile(
        &self,
        form: &ProfileForm,
        on_change: impl FnOnce(&UserProfile),
    ) -> Result<ProfileUpdate, AppError> {
        let mut profile = self.profile.write().await;
        let updated = form.apply_to(&profile).map_err(AppError::Validation)?;

        if updated == *profile {
            return Ok(ProfileUpdate {
                profile: updated,
                changed: false,
            });
        }

        *profile = updated;
        tracing::info!(
            age = profile.age,
            macro_ratio = ?profile.macro_ratio,
            "Profile updated"
        );
        on_change(&*profile);

        Ok(ProfileUpdate {
            profile: profile.clone(),
            changed: true,
        })
    }

    /// Append a food to the log, stamped with `now`. `on_change` runs under
    /// the write lock.
    pub async fn log_food(
        &self,
        food: FoodItem,
        amount: Option<String>,
        now: DateTime<Utc>,
        on_change: impl FnOnce(&UserProfile),
    ) -> Result<(LoggedFood, UserProfile), AppError> {
        let mut profile = self.profile.write().await;
        let entry = LoggedFood::new(food, amount, now);

        if profile.find_logged_food(&entry.id).is_some() {
            return Err(AppError::Conflict(format!(
                "Food already logged with id {}",
                entry.id
            )));
        }

        profile.logged_food.push(entry.clone());
        tracing::info!(id = %entry.id, fdc_id = entry.food.fdc_id, "Food logged");
        on_change(&*profile);

        Ok((entry, profile.clone()))
    }

    /// Remove a log entry by ID.
    pub async fn delete_logged_food(
        &self,
        id: &str,
        on_change: impl FnOnce(&UserProfile),
    ) -> Result<UserProfile, AppError> {
        let mut profile = self.profile.write().await;
        let index = profile
            .logged_food
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Logged food {}", id)))?;

        profile.logged_food.remove(index);
        tracing::info!(id, "Logged food removed");
        on_change(&*profile);

        Ok(profile.clone())
    }
}

/// Errors loading the seed profile.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
