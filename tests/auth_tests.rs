
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn register_student_returns_201_without_graduation_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/api/auth/register", app.address))
        .json(&json!({
            "name": "Sneha Reddy",
            "email": "sneha@example.com",
            "password": TEST_PASSWORD,
            "role": "student"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["role"], "student");
    assert!(body["user"]["graduation_year"].is_null());
}

#[actix_rt::test]
async fn register_alumni_requires_graduation_year_and_department() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(format!("{}/api/auth/register", app.address))
        .json(&json!({
            "name": "Rajesh Kumar",
            "email": "rajesh@example.com",
            "password": TEST_PASSWORD,
            "role": "alumni"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
}

#[actix_rt::test]
async fn duplicate_email_registration_conflicts() {
    let app = TestApp::spawn().await;
    app.register_student("dup@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/auth/register", app.address))
        .json(&json!({
            "name": "Second Account",
            "email": "dup@example.com",
            "password": TEST_PASSWORD,
            "role": "student"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn login_returns_token_for_valid_credentials() {
    let app = TestApp::spawn().await;
    app.register_student("login@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/auth/login", app.address))
        .json(&json!({
            "email": "login@example.com",
            "password": TEST_PASSWORD
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "login@example.com");
}

#[actix_rt::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = TestApp::spawn().await;
    app.register_student("wrongpw@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/auth/login", app.address))
        .json(&json!({
            "email": "wrongpw@example.com",
            "password": "not-the-password-1"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn protected_routes_require_a_token() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/api/profile", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn profile_update_replaces_skill_lists() {
    let app = TestApp::spawn().await;
    let student = app.register_student("skills@example.com").await;

    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&student.token)
        .json(&json!({
            "bio": "Final year student",
            "skills": ["Rust", "SQL"],
            "languages": ["English"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["skills"], json!(["Rust", "SQL"]));

    // A second update replaces, not appends.
    let response = app
        .client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&student.token)
        .json(&json!({"skills": ["Python"]}))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["skills"], json!(["Python"]));
    assert_eq!(body["bio"], "Final year student");
    assert_eq!(body["languages"], json!(["English"]));
}

#[actix_rt::test]
async fn alumni_listing_is_public_and_includes_availability() {
    let app = TestApp::spawn().await;
    app.register_alumni("mentor@example.com").await;

    let response = app
        .client
        .get(format!("{}/api/alumni", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["is_available"], true);
}
