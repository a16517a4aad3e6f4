mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn register_hides_password_and_login_issues_token() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            json!({
                "first_name": "Siti",
                "email": "Siti@Example.com",
                "password": "correct-horse-battery",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "siti@example.com");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());

    let (status, body) = app
        .post(
            "/api/v1/auth/register",
            json!({
                "first_name": "Siti",
                "email": "siti@example.com",
                "password": "another-password",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");

    let (status, body) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": "siti@example.com", "password": "correct-horse-battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["first_name"], "Siti");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = TestApp::new().await;
    app.login_token("budi@example.com").await;

    let (status, wrong) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": "budi@example.com", "password": "nope-nope-nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown) = app
        .post(
            "/api/v1/auth/login",
            json!({ "email": "ghost@example.com", "password": "nope-nope-nope" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong["error"], unknown["error"]);
}

#[tokio::test]
async fn protected_routes_need_a_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/users").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().is_some());

    let (status, _) = app
        .request(Method::GET, "/api/v1/accounts", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.login_token("admin@example.com").await;
    let (status, me) = app
        .request(Method::GET, "/api/v1/users/me", None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "admin@example.com");
}

#[tokio::test]
async fn accounting_crud_behind_auth() {
    let app = TestApp::new().await;
    let token = app.login_token("finance@example.com").await;
    let auth = Some(token.as_str());

    let (status, company) = app
        .request(
            Method::POST,
            "/api/v1/companies",
            Some(json!({ "name": "PT Gas Nusantara", "country": "ID" })),
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{company}");
    let company_id = company["id"].as_i64().unwrap();

    let (status, account) = app
        .request(
            Method::POST,
            "/api/v1/accounts",
            Some(json!({
                "name": "Cash",
                "type": "asset",
                "currency": "idr",
                "balance": "1000000",
                "company_id": company_id,
            })),
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{account}");
    assert_eq!(account["type"], "asset");
    assert_eq!(account["currency"], "IDR");

    let (status, category) = app
        .request(
            Method::POST,
            "/api/v1/categories",
            Some(json!({ "name": "Sales", "type": "income", "color": "#00aa00" })),
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{category}");
    let category_id = category["id"].as_i64().unwrap();

    let (status, _) = app
        .request(
            Method::DELETE,
            &format!("/api/v1/categories/{}", category_id),
            None,
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            Method::GET,
            &format!("/api/v1/categories/{}", category_id),
            None,
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Category not found");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/v1/accounts",
            Some(json!({ "name": "Bad", "type": "imaginary" })),
            auth,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
}
