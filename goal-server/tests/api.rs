use axum::Router;
use axum::body::Body;
use chrono::{Days, NaiveDate};
use goal_server::api::build_app;
use goal_server::goals::MemoryGoalRepository;
use goal_server::utils::FixedClock;
use goal_server::{Config, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn yesterday() -> NaiveDate {
    today() - Days::new(1)
}

fn app() -> Router {
    let config = Config {
        http_port: 0,
        environment: "test".to_string(),
        log_level: "info".to_string(),
        log_dir: None,
        business_timezone: "Europe/Paris".to_string(),
        request_timeout_ms: 5000,
    };
    let state = ServerState::new(
        config,
        Arc::new(MemoryGoalRepository::new()),
        Arc::new(FixedClock(today())),
    );
    build_app(&state).with_state(state)
}

async fn call(
    app: &Router,
    method: &str,
    uri: &str,
    role: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        req = req.header("x-actor-role", role);
    }
    let req = match body {
        Some(b) => req
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn track(app: &Router, manager: &str, metric: &str, role: &str) {
    let (status, _) = call(
        app,
        "PUT",
        &format!("/api/kpi-config/{manager}/toggle"),
        Some("manager"),
        Some(json!({ "metric": metric, "role": role, "enabled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

fn ca_objective(end: NaiveDate) -> Value {
    json!({
        "manager_id": "m1",
        "family": "objective",
        "title": "CA octobre",
        "scope": "collective",
        "kind": "kpi_standard",
        "kpi_name": "ca",
        "target_value": 50000,
        "unit": "€",
        "data_entry_responsible": "manager",
        "period_start": "2026-10-01",
        "period_end": end.to_string()
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = call(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["today"], "2026-10-19");
}

#[tokio::test]
async fn test_kpi_config_not_found_then_created_by_toggle() {
    let app = app();
    let (status, body) = call(&app, "GET", "/api/kpi-config/m1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);

    track(&app, "m1", "ca", "seller").await;
    let (status, body) = call(&app, "GET", "/api/kpi-config/m1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw_metric_toggle"]["ca"]["seller_entry"], true);
    assert_eq!(body["raw_metric_toggle"]["ventes"]["seller_entry"], false);
}

#[tokio::test]
async fn test_toggle_conflict() {
    let app = app();
    track(&app, "m1", "ventes", "seller").await;
    let (status, body) = call(
        &app,
        "PUT",
        "/api/kpi-config/m1/toggle",
        Some("manager"),
        Some(json!({ "metric": "ventes", "role": "manager", "enabled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_toggle_requires_manager() {
    let app = app();
    let (status, body) = call(
        &app,
        "PUT",
        "/api/kpi-config/m1/toggle",
        Some("seller"),
        Some(json!({ "metric": "ca", "role": "seller", "enabled": true })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);
}

#[tokio::test]
async fn test_replace_config_rejects_both_roles() {
    let app = app();
    let (status, _) = call(
        &app,
        "PUT",
        "/api/kpi-config/m1",
        Some("manager"),
        Some(json!({ "raw_metric_toggle": {
            "ca": { "seller_entry": true, "manager_entry": true }
        }})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = call(
        &app,
        "PUT",
        "/api/kpi-config/m1",
        Some("manager"),
        Some(json!({ "raw_metric_toggle": {
            "ca": { "seller_entry": true, "manager_entry": false }
        }})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw_metric_toggle"]["articles"]["manager_entry"], false);
}

#[tokio::test]
async fn test_derived_metrics() {
    let app = app();
    track(&app, "m1", "ca", "seller").await;
    track(&app, "m1", "ventes", "manager").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/kpi-config/m1/derived",
        None,
        Some(json!({ "ca": 1000, "ventes": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], "panier_moyen");
    assert_eq!(body[0]["value"], 50.0);
    assert_eq!(body[0]["active"], true);
    assert_eq!(body[1]["id"], "taux_transformation");
    assert_eq!(body[1]["active"], false);
    assert_eq!(body[1]["value"], Value::Null);
}

#[tokio::test]
async fn test_derived_from_entries() {
    let app = app();
    track(&app, "m1", "articles", "seller").await;
    track(&app, "m1", "ventes", "seller").await;

    let (status, body) = call(
        &app,
        "POST",
        "/api/kpi-config/m1/derived/from-entries",
        None,
        Some(json!([
            { "date": "2026-10-01", "seller_id": "s1", "ventes": 4, "articles": 10 },
            { "date": "2026-10-02", "seller_id": "s1", "ventes": 6, "articles": 15 }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[2]["id"], "indice_vente");
    assert_eq!(body[2]["value"], 2.5);
}

#[tokio::test]
async fn test_create_goal_reports_every_violation() {
    let app = app();
    let mut bad = ca_objective(today());
    bad["title"] = json!("");
    bad["target_value"] = json!(0);

    let (status, body) = call(&app, "POST", "/api/goals", Some("manager"), Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    let fields: Vec<&str> = body["details"]["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    // ca is not tracked yet
    assert_eq!(fields, vec!["title", "target_value", "kpi_name"]);
}

#[tokio::test]
async fn test_objective_achieved_with_overshoot() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;

    let (status, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = goal["id"].as_i64().unwrap();
    assert_eq!(goal["current_value"], 0.0);
    assert_eq!(goal["version"], 1);

    let (status, view) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("manager"),
        Some(json!({ "value": 62000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "in_progress");
    assert_eq!(view["percent_complete"], 100);
    assert_eq!(view["exceeded_by"], 12000.0);

    // moving the end into the past closes the goal on its current value
    let mut edit = ca_objective(yesterday());
    edit["expected_version"] = json!(2);
    let (status, view) = call(
        &app,
        "PUT",
        &format!("/api/goals/{id}"),
        Some("manager"),
        Some(edit),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "achieved");
    assert_eq!(view["exceeded_by"], 12000.0);

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("manager"),
        Some(json!({ "value": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);
}

#[tokio::test]
async fn test_report_rejected_when_read_shows_closed() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(yesterday())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();
    assert_eq!(goal["status"], "failed");

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("manager"),
        Some(json!({ "value": 62000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    let (status, view) = call(&app, "GET", &format!("/api/goals/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "failed");
    assert_eq!(view["current_value"], 0.0);
    assert_eq!(view["version"], 1);
}

#[tokio::test]
async fn test_progress_above_max_rejected() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("manager"),
        Some(json!({ "value": 1e30 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);

    let mut huge = ca_objective(today());
    huge["target_value"] = json!(1e30);
    let (status, body) = call(&app, "POST", "/api/goals", Some("manager"), Some(huge)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_seller_cannot_report_on_manager_goal() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("seller"),
        Some(json!({ "value": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (_, goal) = call(&app, "GET", &format!("/api/goals/{id}"), None, None).await;
    assert_eq!(goal["current_value"], 0.0);
    assert_eq!(goal["version"], 1);
}

#[tokio::test]
async fn test_progress_requires_actor_role_header() {
    let app = app();
    let (status, body) = call(
        &app,
        "POST",
        "/api/goals/1/progress",
        None,
        Some(json!({ "value": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2003);

    let (status, _) = call(
        &app,
        "POST",
        "/api/goals/1/progress",
        Some("director"),
        Some(json!({ "value": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_challenge_failed_after_close_expired() {
    let app = app();
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(json!({
            "manager_id": "m1",
            "family": "challenge",
            "title": "Ceintures",
            "scope": "collective",
            "kind": "product_focus",
            "product_name": "Ceinture",
            "target_value": 100,
            "data_entry_responsible": "seller",
            "start_date": "2026-10-01",
            "end_date": "2026-10-31"
        })),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let (status, view) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress"),
        Some("seller"),
        Some(json!({ "value": 40, "expected_version": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "in_progress");
    assert_eq!(view["percent_complete"], 40);

    // move the end date to yesterday
    let mut edit = goal.clone();
    edit["end_date"] = json!(yesterday().to_string());
    edit["expected_version"] = json!(2);
    let (status, view) = call(
        &app,
        "PUT",
        &format!("/api/goals/{id}"),
        Some("manager"),
        Some(edit),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["status"], "failed");
    assert_eq!(view["current_value"], 40.0);
    assert_eq!(view["percent_complete"], 40);

    let (status, closed) = call(&app, "POST", "/api/goals/close-expired", Some("manager"), None).await;
    assert_eq!(status, StatusCode::OK);
    // already stored as failed by the edit
    assert_eq!(closed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stale_version_rejected() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let mut edit = goal.clone();
    edit["expected_version"] = json!(7);
    let (status, body) = call(
        &app,
        "PUT",
        &format!("/api/goals/{id}"),
        Some("manager"),
        Some(edit),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4003);
}

#[tokio::test]
async fn test_list_and_delete() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let (_, list) = call(&app, "GET", "/api/goals?manager_id=m1&family=objective", None, None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let (_, list) = call(&app, "GET", "/api/goals?family=challenge", None, None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, _) = call(&app, "DELETE", &format!("/api/goals/{id}"), Some("manager"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = call(&app, "DELETE", &format!("/api/goals/{id}"), Some("manager"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_progress_suggestion() {
    let app = app();
    track(&app, "m1", "ca", "manager").await;
    let (_, goal) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(ca_objective(today())),
    )
    .await;
    let id = goal["id"].as_i64().unwrap();

    let (status, body) = call(
        &app,
        "POST",
        &format!("/api/goals/{id}/progress/suggest"),
        None,
        Some(json!([
            { "date": "2026-09-30", "store_id": "st1", "ca": 9999 },
            { "date": "2026-10-02", "store_id": "st1", "ca": 1200.5 },
            { "date": "2026-10-03", "store_id": "st1", "ca": 800 }
        ])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["suggested_value"], 2000.5);
}

#[tokio::test]
async fn test_seller_goal_visibility() {
    let app = app();
    for seller in ["A", "B"] {
        let (status, _) = call(
            &app,
            "PUT",
            &format!("/api/sellers/{seller}"),
            None,
            Some(json!({
                "id": seller,
                "name": format!("Seller {seller}"),
                "email": format!("{seller}@example.com"),
                "manager_id": "m1"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, _) = call(
        &app,
        "POST",
        "/api/goals",
        Some("manager"),
        Some(json!({
            "manager_id": "m1",
            "family": "challenge",
            "title": "Vitrine",
            "scope": "collective",
            "visible_to_sellers": ["A"],
            "kind": "custom",
            "custom_description": "Refaire la vitrine",
            "target_value": 1,
            "data_entry_responsible": "manager",
            "start_date": "2026-10-01",
            "end_date": "2026-10-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, a_goals) = call(&app, "GET", "/api/sellers/A/goals", None, None).await;
    assert_eq!(a_goals.as_array().unwrap().len(), 1);
    let (_, b_goals) = call(&app, "GET", "/api/sellers/B/goals", None, None).await;
    assert!(b_goals.as_array().unwrap().is_empty());

    let (status, body) = call(&app, "GET", "/api/sellers/Z/goals", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5001);
}
