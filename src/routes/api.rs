// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session API routes: profile, food log, and recommendations.

use crate::error::Result;
use crate::models::{FoodItem, LoggedAmount, LoggedFood, ProfileForm, RecommendedFood, UserProfile};
use crate::services::daily_log;
use crate::services::recommend::CycleStatus;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/profile", get(get_profile).put(update_profile))
        .route("/api/log", get(get_log).post(log_food))
        .route("/api/log/today", get(get_todays_log))
        .route("/api/log/{id}", delete(delete_logged_food))
        .route("/api/recommendations", get(get_recommendations))
}

// ─── Profile ─────────────────────────────────────────────────

async fn get_profile(State(state): State<Arc<AppState>>) -> Json<UserProfile> {
    Json(state.session.profile().await)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProfileUpdateResponse {
    pub profile: UserProfile,
    /// False when the submitted form matched the stored profile
    pub changed: bool,
}

/// Save the profile form. A real change starts a recommendation cycle.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ProfileForm>,
) -> Result<Json<ProfileUpdateResponse>> {
    let update = state
        .session
        .update_profile(&form, |profile| {
            state.refresh_recommendations(profile);
        })
        .await?;

    if !update.changed {
        tracing::debug!("Profile form unchanged, skipping recommendation cycle");
    }

    Ok(Json(ProfileUpdateResponse {
        profile: update.profile,
        changed: update.changed,
    }))
}

// ─── Food Log ────────────────────────────────────────────────

async fn get_log(State(state): State<Arc<AppState>>) -> Json<Vec<LoggedFood>> {
    Json(state.session.profile().await.logged_food)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TodaysLogResponse {
    /// Session-local calendar date (YYYY-MM-DD)
    pub date: String,
    pub entries: Vec<LoggedAmount>,
}

/// Today's entries exactly as they would be sent to the recommendation service.
async fn get_todays_log(State(state): State<Arc<AppState>>) -> Json<TodaysLogResponse> {
    let now = state.clock.now();
    let profile = state.session.profile().await;

    Json(TodaysLogResponse {
        date: now.date_naive().to_string(),
        entries: daily_log::todays_entries(&profile.logged_food, &now),
    })
}

/// Amount as typed by the user; numbers are accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
struct LogFoodRequest {
    food: FoodItem,
    #[serde(default)]
    amount: Option<RawAmount>,
}

async fn log_food(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LogFoodRequest>,
) -> Result<(StatusCode, Json<LoggedFood>)> {
    let amount = body.amount.map(|a| match a {
        RawAmount::Number(n) => n.to_string(),
        RawAmount::Text(s) => s,
    });
    let now = state.clock.now().with_timezone(&Utc);

    let (entry, _) = state
        .session
        .log_food(body.food, amount, now, |profile| {
            state.refresh_recommendations(profile);
        })
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn delete_logged_food(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .session
        .delete_logged_food(&id, |profile| {
            state.refresh_recommendations(profile);
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Recommendations ─────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub food: RecommendedFood,
    /// Ready-to-render display name
    pub label: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationsResponse {
    pub status: CycleStatus,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub sequence: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub latest_sequence: u64,
    pub items: Vec<RecommendationItem>,
}

/// Latest accepted recommendations. Stale-but-valid after a failed cycle.
async fn get_recommendations(State(state): State<Arc<AppState>>) -> Json<RecommendationsResponse> {
    let snapshot = state.recommendations.snapshot();

    Json(RecommendationsResponse {
        status: snapshot.status,
        sequence: snapshot.sequence,
        latest_sequence: snapshot.latest_sequence,
        items: snapshot
            .items
            .into_iter()
            .map(|food| RecommendationItem {
                label: food.label(),
                food,
            })
            .collect(),
    })
}
