mod common;

use common::TestApp;
use http::StatusCode;
use serde_json::{Value, json};

fn employee(first: &str, position: &str) -> Value {
    json!({
        "first_name": first,
        "last_name": "Weber",
        "position": position,
        "branch": "Mitte",
        "salary": 14.5
    })
}

fn shift(staff_id: &Value, date: &str, start: &str, end: &str) -> Value {
    json!({"staff_id": staff_id, "date": date, "start_time": start, "end_time": end})
}

#[tokio::test]
async fn test_employees_are_store_scoped() {
    let app = TestApp::new().await;
    let (manager, _) = app
        .register("lead@coffeebloom.de", Some("mgr-key"), Some("Mitte"))
        .await;
    let hq = app.head_office().await;

    let (status, created) = app
        .post("/api/stores/Mitte/employees", &manager, employee("Lena", "Branch:Parttime"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["salary_type"], "hourly");

    let (status, body) = app.get("/api/stores/Kreuzberg/employees", &manager).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["details"]["store"], "Kreuzberg");

    let (status, listed) = app.get("/api/stores/Mitte/employees", &hq).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (_, empty) = app.get("/api/stores/Kreuzberg/employees", &hq).await;
    assert!(empty.as_array().unwrap().is_empty());

    let uri = format!("/api/stores/Mitte/employees/{}", created["id"]);
    let (status, body) = app.delete(&uri, &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");
    let (status, _) = app.delete(&uri, &manager).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_employee_gates_and_validation() {
    let app = TestApp::new().await;
    let (store_user, _) = app.register("mitte@coffeebloom.de", None, Some("Mitte")).await;
    let (manager, _) = app
        .register("lead@coffeebloom.de", Some("mgr-key"), Some("Mitte"))
        .await;
    let (unassigned, _) = app
        .register("float@coffeebloom.de", Some("mgr-key"), None)
        .await;

    let (status, _) = app.get("/api/stores/Mitte/employees", &store_user).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/api/stores/Mitte/employees", &unassigned).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post("/api/stores/Mitte/employees", &manager, employee(" ", "Branch:Fulltime"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing first_name");
}

#[tokio::test]
async fn test_shift_schedule() {
    let app = TestApp::new().await;
    let (manager, _) = app
        .register("lead@coffeebloom.de", Some("mgr-key"), Some("Mitte"))
        .await;
    let (staff, _) = app
        .register("staff@coffeebloom.de", Some("staff-key"), Some("Mitte"))
        .await;

    let (_, lena) = app
        .post("/api/stores/Mitte/employees", &manager, employee("Lena", "Branch:Parttime"))
        .await;
    let (_, max) = app
        .post("/api/stores/Mitte/employees", &manager, employee("Max", "Branch:Fulltime"))
        .await;

    let (status, created) = app
        .post(
            "/api/stores/Mitte/shifts",
            &manager,
            shift(&lena["id"], "2025-03-01", "08:00", "12:30"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["staff_name"], "Lena Weber");
    app.post(
        "/api/stores/Mitte/shifts",
        &manager,
        shift(&lena["id"], "2025-03-02", "14:00", "18:00"),
    )
    .await;
    app.post(
        "/api/stores/Mitte/shifts",
        &manager,
        shift(&max["id"], "2025-03-01", "06:00", "14:00"),
    )
    .await;

    let (status, _) = app
        .post(
            "/api/stores/Mitte/shifts",
            &manager,
            shift(&lena["id"], "2025-03-03", "18:00", "08:00"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/stores/Mitte/shifts",
            &manager,
            shift(&json!(42), "2025-03-03", "08:00", "12:00"),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // employees read the schedule but cannot edit it
    let (status, shifts) = app.get("/api/stores/Mitte/shifts", &staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shifts.as_array().unwrap().len(), 3);
    assert_eq!(shifts[0]["staff_name"], "Max Weber");
    let (status, _) = app
        .post(
            "/api/stores/Mitte/shifts",
            &staff,
            shift(&lena["id"], "2025-03-04", "08:00", "12:00"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, totals) = app.get("/api/stores/Mitte/shifts/totals", &staff).await;
    assert_eq!(
        totals,
        json!([
            {"staff_name": "Lena Weber", "hours": 8.5},
            {"staff_name": "Max Weber", "hours": 8.0}
        ])
    );

    let uri = format!("/api/stores/Mitte/shifts/{}", created["id"]);
    let (status, _) = app.delete(&uri, &staff).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = app.delete(&uri, &manager).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Shift deleted successfully");
}

#[tokio::test]
async fn test_shifts_reject_foreign_store() {
    let app = TestApp::new().await;
    let (staff, _) = app
        .register("staff@coffeebloom.de", Some("staff-key"), Some("Mitte"))
        .await;
    let (status, body) = app.get("/api/stores/Kreuzberg/shifts", &staff).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Store is outside your scope");
}
