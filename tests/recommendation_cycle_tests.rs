// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recommendation cycles against a mocked recommendation service.

use chrono::{Duration as ChronoDuration, Utc};
use sabrosa::services::CycleStatus;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{logged, seed_profile, test_now, test_service, RecordingSink};

#[tokio::test]
async fn test_cycle_posts_profile_and_todays_log() {
    let mock_server = MockServer::start().await;
    let now = test_now();
    let mut profile = seed_profile();
    profile.logged_food = vec![
        logged(1, Some("100"), now.with_timezone(&Utc)),
        logged(2, Some("50"), now.with_timezone(&Utc) - ChronoDuration::days(1)),
        logged(3, Some("abc"), now.with_timezone(&Utc)),
    ];

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(body_json(json!({
            "age": 30,
            "sex": "F",
            "isPregnant": false,
            "isLactating": false,
            "macroRatio": "maintain",
            "heightInches": 64.0,
            "weightPounds": 140.0,
            "foodLog": [
                {"fdc_id": 1, "amount": 100.0},
                {"fdc_id": 3, "amount": 0.0}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Spinach, raw", "shortened_name": "Spinach", "emojis": "🥬",
             "significant_1": "Vitamin K", "significant_2": "Folate", "significant_3": "Iron"},
            {"name": "Lentils, boiled"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let service = test_service(&mock_server.uri(), sink.clone());

    service.trigger(&profile, &now).await.unwrap();

    let snapshot = service.snapshot();
    assert_eq!(snapshot.status, CycleStatus::Fulfilled);
    assert_eq!(snapshot.sequence, 1);
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].label(), "Spinach 🥬");
    assert_eq!(snapshot.items[1].name, "Lentils, boiled");
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_non_2xx_keeps_previous_list_and_reports_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(body_partial_json(json!({"age": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Kale"}])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .and(body_partial_json(json!({"age": 31})))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let service = test_service(&mock_server.uri(), sink.clone());
    let now = test_now();

    let mut profile = seed_profile();
    service.trigger(&profile, &now).await.unwrap();
    profile.age = 31;
    service.trigger(&profile, &now).await.unwrap();

    let snapshot = service.snapshot();
    assert_eq!(snapshot.status, CycleStatus::Failed);
    assert_eq!(snapshot.sequence, 1);
    assert_eq!(snapshot.latest_sequence, 2);
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].name, "Kale");

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].sequence, 2);
    assert!(events[0].message.contains("500"));
}

#[tokio::test]
async fn test_unreachable_service_is_reported_not_fatal() {
    let sink = Arc::new(RecordingSink::default());
    // Nothing listens on the discard port
    let service = test_service("http://127.0.0.1:9", sink.clone());

    service.trigger(&seed_profile(), &test_now()).await.unwrap();

    let snapshot = service.snapshot();
    assert_eq!(snapshot.status, CycleStatus::Failed);
    assert!(snapshot.items.is_empty());
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_malformed_body_is_a_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/recommend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let service = test_service(&mock_server.uri(), sink.clone());

    service.trigger(&seed_profile(), &test_now()).await.unwrap();

    assert_eq!(service.snapshot().status, CycleStatus::Failed);
    assert_eq!(sink.events().len(), 1);
}

/// Two changes in quick succession where the first response arrives last:
/// the late, older response must not replace the newer one.
#[tokio::test]
async fn test_late_older_response_does_not_overwrite_newer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"age": 30})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "Older"}]))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"age": 31})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Newer"}])))
        .mount(&mock_server)
        .await;

    let service = test_service(&mock_server.uri(), Arc::new(RecordingSink::default()));
    let now = test_now();
    let mut profile = seed_profile();

    let first = service.trigger(&profile, &now);
    profile.age = 31;
    let second = service.trigger(&profile, &now);

    second.await.unwrap();
    assert_eq!(service.snapshot().items[0].name, "Newer");

    first.await.unwrap();
    let snapshot = service.snapshot();
    assert_eq!(snapshot.sequence, 2);
    assert_eq!(snapshot.items[0].name, "Newer");
    assert_eq!(snapshot.status, CycleStatus::Fulfilled);
}

#[tokio::test]
async fn test_slow_newer_response_still_wins() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"age": 30})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Older"}])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"age": 31})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"name": "Newer"}]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let service = test_service(&mock_server.uri(), Arc::new(RecordingSink::default()));
    let now = test_now();
    let mut profile = seed_profile();

    let first = service.trigger(&profile, &now);
    profile.age = 31;
    let second = service.trigger(&profile, &now);

    first.await.unwrap();
    second.await.unwrap();

    let snapshot = service.snapshot();
    assert_eq!(snapshot.sequence, 2);
    assert_eq!(snapshot.items[0].name, "Newer");
}
