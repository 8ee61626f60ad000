// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sabrosa: personal nutrition tracking session service.
//!
//! Holds the user's profile and food log for one session and keeps a list
//! of daily food recommendations fresh by asking an external
//! recommendation service whenever the profile changes.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use models::UserProfile;
use services::{RecommendationService, Session};
use std::sync::Arc;
use time_utils::Clock;
use tokio::task::JoinHandle;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: Session,
    pub recommendations: RecommendationService,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Start a recommendation cycle for `profile` as of the session clock's "now".
    ///
    /// Callers hold the session lock, so cycle order matches write order.
    pub(crate) fn refresh_recommendations(&self, profile: &UserProfile) -> JoinHandle<()> {
        let now = self.clock.now();
        self.recommendations.trigger(profile, &now)
    }

    /// Start a recommendation cycle for the stored profile.
    pub async fn refresh_current(&self) -> JoinHandle<()> {
        self.session
            .with_profile(|profile| self.refresh_recommendations(profile))
            .await
    }
}
