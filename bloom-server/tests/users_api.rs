mod common;

use common::{PASSWORD, TestApp};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_user_management_is_head_office_only() {
    let app = TestApp::new().await;
    let (store_token, _) = app.register("a@coffeebloom.de", None, Some("Mitte")).await;

    let (status, body) = app.get("/users", &store_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Requires one of: honbu");

    let (status, _) = app
        .post("/deleteUser", &store_token, json!({"uid": "whatever"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.request(Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.request(Method::GET, "/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_pages() {
    let app = TestApp::new().await;
    let hq = app.head_office().await;
    for i in 0..9 {
        app.register(&format!("staff{i}@coffeebloom.de"), None, Some("Mitte"))
            .await;
    }
    app.register("lead@coffeebloom.de", Some("mgr-key"), Some("Kreuzberg"))
        .await;

    let (status, page) = app.get("/users", &hq).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 11);
    assert_eq!(page["page_size"], 8);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 8);

    let (_, page) = app.get("/users?page=2", &hq).await;
    assert_eq!(page["data"].as_array().unwrap().len(), 3);

    let (_, page) = app.get("/users?role=manager", &hq).await;
    assert_eq!(page["total"], 1);
    assert_eq!(page["data"][0]["email"], "lead@coffeebloom.de");

    let (_, page) = app.get("/users?store=Mitte&q=STAFF1", &hq).await;
    assert_eq!(page["total"], 1);
}

#[tokio::test]
async fn test_profile_crud() {
    let app = TestApp::new().await;
    let hq = app.head_office().await;

    let (status, _) = app
        .post("/users", &hq, json!({"email": "ghost@coffeebloom.de", "roles": ["manager"]}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // An account without a profile record
    let identity = app
        .state
        .identity
        .create_account("new@coffeebloom.de", PASSWORD)
        .await
        .unwrap();

    let (status, created) = app
        .post(
            "/users",
            &hq,
            json!({"email": "new@coffeebloom.de", "roles": ["manager", "employee"], "store": "Mitte"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["uid"], identity.uid);
    assert_eq!(created["roles"], json!(["employee", "manager"]));

    let (status, _) = app
        .post("/users", &hq, json!({"email": "new@coffeebloom.de"}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/users/{}", identity.uid);
    let (status, updated) = app
        .put(&uri, &hq, json!({"roles": ["store-admin"], "region": "Berlin"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["roles"], json!(["store-admin"]));
    assert_eq!(updated["store"], "Mitte");
    assert_eq!(updated["region"], "Berlin");

    let (status, body) = app.delete(&uri, &hq).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile deleted successfully");

    let (status, _) = app.delete(&uri, &hq).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_account_actions() {
    let app = TestApp::new().await;
    let hq = app.head_office().await;
    let (_, uid) = app.register("a@coffeebloom.de", None, None).await;
    let login = json!({"email": "a@coffeebloom.de", "password": PASSWORD});

    let (status, body) = app.post("/setUserDisabled", &hq, json!({"uid": uid})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing uid or disabled flag");

    let (_, body) = app
        .post("/setUserDisabled", &hq, json!({"uid": uid, "disabled": true}))
        .await;
    assert_eq!(body["message"], "User disabled successfully");
    let (status, _) = app
        .request(Method::POST, "/api/auth/login", None, Some(login.clone()))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = app
        .post("/setUserDisabled", &hq, json!({"uid": uid, "disabled": false}))
        .await;
    assert_eq!(body["message"], "User enabled successfully");
    let (status, _) = app
        .request(Method::POST, "/api/auth/login", None, Some(login.clone()))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.post("/deleteUser", &hq, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing uid");

    let (status, body) = app.post("/deleteUser", &hq, json!({"uid": uid})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");
    let (status, _) = app
        .request(Method::POST, "/api/auth/login", None, Some(login))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.post("/resetPassword", &hq, json!({"email": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing email");
}

#[tokio::test]
async fn test_tokens_stop_working_after_account_changes() {
    let app = TestApp::new().await;
    let hq = app.head_office().await;
    let (other_token, other_uid) = app
        .register("hq2@coffeebloom.de", Some("hq-key"), None)
        .await;

    let (status, _) = app.get("/users", &other_token).await;
    assert_eq!(status, StatusCode::OK);

    app.post("/setUserDisabled", &hq, json!({"uid": other_uid, "disabled": true}))
        .await;
    let (status, body) = app.get("/users", &other_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1005);

    app.post("/setUserDisabled", &hq, json!({"uid": other_uid, "disabled": false}))
        .await;
    let (status, _) = app.get("/users", &other_token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post("/deleteUser", &hq, json!({"uid": other_uid})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = app.get("/users", &other_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);
    let (status, _) = app
        .post("/resetPassword", &other_token, json!({"email": "hq@coffeebloom.de"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
