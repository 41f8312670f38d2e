mod common;

use common::{STAFF_PASSWORD, TestApp, code};
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::Role;

#[tokio::test]
async fn test_login_returns_token_for_known_account() {
    let app = TestApp::new();
    app.staff("Admin@Tiffin.test", Some(Role::Admin));

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "admin@tiffin.test", "password": STAFF_PASSWORD}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user"]["email"], "admin@tiffin.test");

    let (status, me) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["email"], "admin@tiffin.test");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.staff("chef@tiffin.test", Some(Role::Chef));

    let (wrong_status, wrong) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "chef@tiffin.test", "password": "not-the-password"}),
        )
        .await;
    let (unknown_status, unknown) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "nobody@tiffin.test", "password": "not-the-password"}),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
    assert_eq!(code(&wrong), 1002);
}

#[tokio::test]
async fn test_role_endpoint_never_defaults() {
    let app = TestApp::new();
    let nobody = app.staff("new@tiffin.test", None);
    let chef = app.chef();

    let (status, body) = app.get("/api/auth/role", Some(&nobody)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({"status": "not_found"}));

    let (_, body) = app.get("/api/auth/role", Some(&chef)).await;
    assert_eq!(body["data"], json!({"status": "found", "role": "chef"}));
}

#[tokio::test]
async fn test_admin_routes_follow_the_gate() {
    let app = TestApp::new();
    let dish = json!({
        "name": "Masala Dosa",
        "description": "Crispy crepe",
        "price": 150.0,
        "category": "morning"
    });

    // no identity
    let (status, body) = app.post("/api/menu", None, dish.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), 1001);

    // identity without role
    let nobody = app.staff("new@tiffin.test", None);
    let (status, body) = app.post("/api/menu", Some(&nobody), dish.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2002);

    // role not allowed
    let chef = app.chef();
    let (status, body) = app.post("/api/menu", Some(&chef), dish.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2003);

    let admin = app.admin();
    let (status, body) = app.post("/api/menu", Some(&admin), dish).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Masala Dosa");
}

#[tokio::test]
async fn test_kitchen_is_chef_only() {
    let app = TestApp::new();
    let admin = app.admin();
    let chef = app.chef();

    let (status, body) = app.get("/api/kitchen/orders", Some(&admin)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(code(&body), 2006);

    let (status, _) = app.get("/api/kitchen/orders", Some(&chef)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let app = TestApp::new();

    assert_eq!(app.get("/api/menu", None).await.0, StatusCode::OK);
    assert_eq!(app.get("/api/gallery", None).await.0, StatusCode::OK);
    assert_eq!(app.get("/health", None).await.0, StatusCode::OK);
    assert_eq!(
        app.get("/api/preorders?phone=98400", None).await.0,
        StatusCode::OK
    );

    // listing every order is back office
    assert_eq!(
        app.get("/api/preorders", None).await.0,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.get("/api/reservations", None).await.0,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new();
    let (status, body) = app.get("/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(code(&body), 1004);
}

#[tokio::test]
async fn test_admin_provisions_staff_who_can_sign_in() {
    let app = TestApp::new();
    let admin = app.admin();

    let (status, body) = app
        .post(
            "/api/staff",
            Some(&admin),
            json!({"email": "cook@tiffin.test", "password": "dosa-batter-42", "role": "chef"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "cook@tiffin.test");

    let (status, _) = app
        .post(
            "/api/staff",
            Some(&admin),
            json!({"email": "cook@tiffin.test", "password": "dosa-batter-42", "role": "chef"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, login) = app
        .post(
            "/api/auth/login",
            None,
            json!({"email": "cook@tiffin.test", "password": "dosa-batter-42"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["data"]["token"].as_str().unwrap();

    let (_, role) = app.get("/api/auth/role", Some(token)).await;
    assert_eq!(role["data"]["role"], "chef");

    let (status, _) = app
        .call(Method::POST, "/api/auth/logout", Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}
