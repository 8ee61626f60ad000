// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use sabrosa::config::Config;
use sabrosa::models::{FoodItem, LoggedFood, MacroRatio, Sex, UserProfile};
use sabrosa::routes::create_router;
use sabrosa::services::{
    CycleStatus, Diagnostic, DiagnosticSink, RecommendationClient, RecommendationService,
    Session,
};
use sabrosa::time_utils::FixedClock;
use sabrosa::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Test app with handles to the pieces tests need to poke at.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub clock: Arc<FixedClock>,
    pub sink: Arc<RecordingSink>,
}

/// Diagnostic sink that keeps every event for assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    #[allow(dead_code)]
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&self, diagnostic: Diagnostic) {
        self.events.lock().unwrap().push(diagnostic);
    }
}

/// Session timezone used by tests (UTC-7).
#[allow(dead_code)]
pub fn session_offset() -> FixedOffset {
    FixedOffset::west_opt(7 * 3600).unwrap()
}

/// "Now" for tests: 2024-05-02 12:00 in the session timezone.
#[allow(dead_code)]
pub fn test_now() -> DateTime<FixedOffset> {
    session_offset()
        .with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .unwrap()
}

/// A log entry for `fdc_id` stamped `date`.
#[allow(dead_code)]
pub fn logged(fdc_id: u64, amount: Option<&str>, date: DateTime<Utc>) -> LoggedFood {
    LoggedFood::new(
        FoodItem {
            fdc_id,
            name: None,
            shortened_name: None,
            emojis: None,
        },
        amount.map(String::from),
        date,
    )
}

#[allow(dead_code)]
pub fn seed_profile() -> UserProfile {
    UserProfile {
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        age: 30,
        sex: Sex::F,
        is_pregnant: false,
        is_lactating: false,
        macro_ratio: MacroRatio::Maintain,
        height: 64.0,
        weight: 140.0,
        logged_food: vec![],
    }
}

/// Create a recommendation service pointed at `recommend_url`.
#[allow(dead_code)]
pub fn test_service(recommend_url: &str, sink: Arc<RecordingSink>) -> RecommendationService {
    let client = RecommendationClient::new(recommend_url, Duration::from_secs(2))
        .expect("Failed to build recommendation client");
    RecommendationService::new(client, sink)
}

/// Create a test app whose recommendation service lives at `recommend_url`.
#[allow(dead_code)]
pub fn create_test_app(recommend_url: &str, profile: UserProfile) -> TestApp {
    let config = Config {
        recommend_api_url: recommend_url.to_string(),
        ..Config::test_default()
    };
    let clock = Arc::new(FixedClock::new(test_now()));
    let sink = Arc::new(RecordingSink::default());
    let recommendations = test_service(recommend_url, sink.clone());

    let state = Arc::new(AppState {
        config,
        session: Session::new(profile),
        recommendations,
        clock: clock.clone(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        clock,
        sink,
    }
}

/// Wait until the latest cycle has finished (or give up after ~2s).
#[allow(dead_code)]
pub async fn wait_for_cycle(service: &RecommendationService) {
    for _ in 0..100 {
        if service.snapshot().status != CycleStatus::Requesting {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("Recommendation cycle did not finish");
}
