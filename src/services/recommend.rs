// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation service client and cycle orchestration.
//!
//! Each profile change starts one cycle: build the request from the profile
//! and today's log, POST it, and publish the result. Cycles are tagged with
//! a sequence number so a slow, older response can never replace a newer
//! one. Failures leave the last good result in place.

use crate::error::AppError;
use crate::models::{RecommendationRequest, RecommendedFood, UserProfile};
use crate::services::daily_log;
use crate::services::diagnostics::{Diagnostic, DiagnosticSink};
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// HTTP client for the external recommendation service.
#[derive(Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    base_url: String,
}

impl RecommendationClient {
    /// Create a client for the service rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service for recommendations.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendedFood>, AppError> {
        let url = format!("{}/api/recommend", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::RecommendationApi(e.to_string()))?;

        parse_recommendations(response).await
    }
}

/// Check response status and parse the JSON body.
async fn parse_recommendations(
    response: reqwest::Response,
) -> Result<Vec<RecommendedFood>, AppError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::RecommendationApi(format!("HTTP {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::RecommendationApi(format!("JSON parse error: {}", e)))
}

/// State of the most recently started cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CycleStatus {
    Idle,
    Requesting,
    Fulfilled,
    Failed,
}

/// What the UI sees.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSnapshot {
    pub status: CycleStatus,
    /// Cycle whose response is currently shown (0 = none yet)
    pub sequence: u64,
    /// Most recently started cycle
    pub latest_sequence: u64,
    pub items: Vec<RecommendedFood>,
}

#[derive(Debug)]
struct Slot {
    status: CycleStatus,
    accepted: u64,
    latest: u64,
    items: Vec<RecommendedFood>,
}

struct Inner {
    client: RecommendationClient,
    next_sequence: AtomicU64,
    slot: RwLock<Slot>,
    sink: Arc<dyn DiagnosticSink>,
}

/// Runs recommendation cycles and holds the latest accepted result.
#[derive(Clone)]
pub struct RecommendationService {
    inner: Arc<Inner>,
}

impl RecommendationService {
    pub fn new(client: RecommendationClient, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            inner: Arc::new(Inner {
                client,
                next_sequence: AtomicU64::new(0),
                slot: RwLock::new(Slot {
                    status: CycleStatus::Idle,
                    accepted: 0,
                    latest: 0,
                    items: Vec::new(),
                }),
                sink,
            }),
        }
    }

    /// Start one cycle for `profile` as of `now`. Does not wait for it.
    ///
    /// Must be called from within a tokio runtime. The returned handle
    /// resolves once the response has been applied or discarded.
    pub fn trigger<Tz: TimeZone>(&self, profile: &UserProfile, now: &DateTime<Tz>) -> JoinHandle<()> {
        let request =
            RecommendationRequest::new(profile, daily_log::todays_entries(&profile.logged_food, now));
        let sequence = self.inner.next_sequence.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut slot = self.inner.write_slot();
            slot.latest = slot.latest.max(sequence);
            slot.status = CycleStatus::Requesting;
        }

        tracing::info!(
            sequence,
            food_log = request.food_log.len(),
            "Starting recommendation cycle"
        );

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let result = inner.client.recommend(&request).await;
            inner.complete(sequence, result);
        })
    }

    /// Current result slot.
    pub fn snapshot(&self) -> RecommendationSnapshot {
        let slot = self
            .inner
            .slot
            .read()
            .unwrap_or_else(|e| e.into_inner());
        RecommendationSnapshot {
            status: slot.status,
            sequence: slot.accepted,
            latest_sequence: slot.latest,
            items: slot.items.clone(),
        }
    }
}

impl Inner {
    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }

    fn complete(&self, sequence: u64, result: Result<Vec<RecommendedFood>, AppError>) {
        let mut slot = self.write_slot();
        let is_latest = sequence == slot.latest;

        match result {
            Ok(items) => {
                if sequence > slot.accepted {
                    tracing::info!(sequence, count = items.len(), "Recommendations updated");
                    slot.accepted = sequence;
                    slot.items = items;
                } else {
                    tracing::debug!(
                        sequence,
                        accepted = slot.accepted,
                        "Discarding stale recommendation response"
                    );
                }
                if is_latest {
                    slot.status = CycleStatus::Fulfilled;
                }
            }
            Err(e) => {
                if is_latest {
                    slot.status = CycleStatus::Failed;
                }
                drop(slot);
                self.sink.record(Diagnostic {
                    sequence,
                    message: e.to_string(),
                });
            }
        }
    }
}
