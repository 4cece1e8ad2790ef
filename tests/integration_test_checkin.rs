mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use invix_backend::domain::models::activity::{ActivityKind, ActivityPayload};
use invix_backend::domain::ports::ActivityLogRepository;
use serde_json::Value;

async fn setup_guest(app: &TestApp, token: &str) -> (String, Value) {
    let event = app.create_event(token, "Gala").await;
    let event_id = event["id"].as_str().unwrap().to_string();
    let guest = app.add_guest(token, &event_id, "Ada", "vip").await;
    (event_id, guest)
}

#[tokio::test]
async fn test_resolve_unknown_token_is_structured_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/v1/guests/resolve/nonexistent-token", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_body(response).await;
    assert_eq!(body["error"], "GUEST_NOT_FOUND");
    assert_eq!(body["qr_token"], "nonexistent-token");
}

#[tokio::test]
async fn test_new_guest_starts_not_arrived() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (_, guest) = setup_guest(&app, &token).await;

    let response = app
        .request(
            "GET",
            &format!("/api/v1/guests/resolve/{}", guest["token"].as_str().unwrap()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["status"], "not_arrived");
    assert!(body["lastActivity"].is_null());
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["event"]["name"], "Gala");
}

#[tokio::test]
async fn test_check_in_requires_auth() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (_, guest) = setup_guest(&app, &token).await;

    let response = app
        .request(
            "POST",
            &format!("/api/v1/guests/check-in/{}", guest["token"].as_str().unwrap()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_in_unknown_token_returns_guest_not_found() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");

    let response = app
        .request("POST", "/api/v1/guests/check-in/bogus", Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(response).await["error"], "GUEST_NOT_FOUND");
}

#[tokio::test]
async fn test_check_in_transitions_state() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (_, guest) = setup_guest(&app, &token).await;
    let guest_token = guest["token"].as_str().unwrap();

    let response = app
        .request("POST", &format!("/api/v1/guests/check-in/{}", guest_token), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_body(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["guest_name"], "Ada");
    assert!(body["check_in_time"].is_string());

    let response = app
        .request("GET", &format!("/api/v1/guests/resolve/{}", guest_token), None, None)
        .await;
    let body = parse_body(response).await;
    assert_eq!(body["status"], "checked_in");
    assert!(body["lastActivity"].is_string());
}

#[tokio::test]
async fn test_double_check_in_rejected_without_ledger_write() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (event_id, guest) = setup_guest(&app, &token).await;
    let guest_token = guest["token"].as_str().unwrap();
    let uri = format!("/api/v1/guests/check-in/{}", guest_token);

    let response = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request("POST", &uri, Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "ALREADY_CHECKED_IN");
    assert_eq!(body["guest_name"], "Ada");
    assert!(body["last_check_in"].is_string());

    // exactly one check_in on the ledger, from the first call
    let entries = app.state.activity_repo.list_by_event(&event_id).await.unwrap();
    let check_ins = entries
        .iter()
        .filter(|row| row.entry.kind == ActivityKind::CheckIn)
        .count();
    assert_eq!(check_ins, 1);
}

#[tokio::test]
async fn test_check_out_without_check_in_rejected_without_ledger_write() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (event_id, guest) = setup_guest(&app, &token).await;

    let response = app
        .request(
            "POST",
            &format!("/api/v1/guests/check-out/{}", guest["token"].as_str().unwrap()),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(response).await;
    assert_eq!(body["error"], "NOT_CHECKED_IN");
    assert_eq!(body["guest_name"], "Ada");

    let entries = app.state.activity_repo.list_by_event(&event_id).await.unwrap();
    assert!(entries.iter().all(|row| row.entry.kind != ActivityKind::CheckOut));
}

#[tokio::test]
async fn test_check_out_records_pairing_and_duration() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (_, guest) = setup_guest(&app, &token).await;
    let guest_token = guest["token"].as_str().unwrap();
    let guest_id = guest["id"].as_str().unwrap();

    let response = app
        .request("POST", &format!("/api/v1/guests/check-in/{}", guest_token), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request("POST", &format!("/api/v1/guests/check-out/{}", guest_token), Some(&token), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["guest_name"], "Ada");
    let duration = body["duration_hours"].as_f64().unwrap();
    assert!((0.0..0.01).contains(&duration));

    let entry = app
        .state
        .activity_repo
        .latest_for_guest(guest_id, &[ActivityKind::CheckOut])
        .await
        .unwrap()
        .expect("check-out not on ledger");
    match entry.payload {
        ActivityPayload::CheckOut { check_in_time, check_out_time, duration_hours, .. } => {
            assert!(check_out_time >= check_in_time);
            assert!((duration_hours - duration).abs() < 1e-9);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
}

#[tokio::test]
async fn test_round_trip_leave_and_return() {
    let app = TestApp::new().await;
    let token = app.mint_access_token("user-1");
    let (event_id, guest) = setup_guest(&app, &token).await;
    let guest_token = guest["token"].as_str().unwrap();
    let guest_id = guest["id"].as_str().unwrap();

    let check_in_uri = format!("/api/v1/guests/check-in/{}", guest_token);
    let check_out_uri = format!("/api/v1/guests/check-out/{}", guest_token);

    assert_eq!(app.request("POST", &check_in_uri, Some(&token), None).await.status(), StatusCode::OK);
    assert_eq!(app.request("POST", &check_out_uri, Some(&token), None).await.status(), StatusCode::OK);
    // guests may leave and return
    assert_eq!(app.request("POST", &check_in_uri, Some(&token), None).await.status(), StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/v1/guests/resolve/{}", guest_token), None, None)
        .await;
    assert_eq!(parse_body(response).await["status"], "checked_in");

    // three check entries in chronological order: in, out, in
    let entries = app.state.activity_repo.list_by_event(&event_id).await.unwrap();
    let mut kinds: Vec<ActivityKind> = entries
        .iter()
        .filter(|row| row.entry.guest_id.as_deref() == Some(guest_id))
        .filter(|row| {
            row.entry.kind == ActivityKind::CheckIn || row.entry.kind == ActivityKind::CheckOut
        })
        .map(|row| row.entry.kind)
        .collect();
    kinds.reverse();
    assert_eq!(
        kinds,
        vec![ActivityKind::CheckIn, ActivityKind::CheckOut, ActivityKind::CheckIn]
    );
}
