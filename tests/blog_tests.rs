
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

async fn create_post(app: &TestApp, author: &AuthedUser, title: &str) -> i64 {
    let response = app
        .client
        .post(format!("{}/api/blog", app.address))
        .bearer_auth(&author.token)
        .json(&json!({
            "title": title,
            "content": "Long-form thoughts on building things.",
            "category": "Career"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    body["id"].as_i64().unwrap()
}

async fn toggle_like(app: &TestApp, user: &AuthedUser, post_id: i64) -> Value {
    app.client
        .post(format!("{}/api/blog/{}/like", app.address, post_id))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[actix_rt::test]
async fn posts_are_alumni_authored_and_publicly_readable() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("author@example.com").await;
    let student = app.register_student("reader@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/blog", app.address))
        .bearer_auth(&student.token)
        .json(&json!({"title": "Nope", "content": "Students cannot post"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let post_id = create_post(&app, &alumni, "My Journey").await;

    // Anonymous read.
    let body: Value = app
        .client
        .get(format!("{}/api/blog/{}", app.address, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["title"], "My Journey");
    assert_eq!(body["author_name"], "Test Alumni");
    assert_eq!(body["like_count"], 0);
}

#[actix_rt::test]
async fn like_toggles_back_to_the_original_count() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("author@example.com").await;
    let student = app.register_student("reader@example.com").await;
    let post_id = create_post(&app, &alumni, "Toggle Me").await;

    let body = toggle_like(&app, &student, post_id).await;
    assert_eq!(body["liked"], true);
    assert_eq!(body["like_count"], 1);

    let body = toggle_like(&app, &student, post_id).await;
    assert_eq!(body["liked"], false);
    assert_eq!(body["like_count"], 0);
}

#[actix_rt::test]
async fn update_and_delete_are_author_only() {
    let app = TestApp::spawn().await;
    let author = app.register_alumni("author@example.com").await;
    let other = app.register_alumni("other@example.com").await;
    let post_id = create_post(&app, &author, "Original").await;

    let response = app
        .client
        .put(format!("{}/api/blog/{}", app.address, post_id))
        .bearer_auth(&other.token)
        .json(&json!({"title": "Defaced"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .put(format!("{}/api/blog/{}", app.address, post_id))
        .bearer_auth(&author.token)
        .json(&json!({"title": "Edited"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Edited");
    assert_eq!(body["content"], "Long-form thoughts on building things.");

    let response = app
        .client
        .delete(format!("{}/api/blog/{}", app.address, post_id))
        .bearer_auth(&author.token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .client
        .get(format!("{}/api/blog/{}", app.address, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn liked_by_me_is_present_only_for_authenticated_readers() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("author@example.com").await;
    let student = app.register_student("reader@example.com").await;
    let post_id = create_post(&app, &alumni, "Liked").await;
    toggle_like(&app, &student, post_id).await;

    let anonymous: Value = app
        .client
        .get(format!("{}/api/blog/{}", app.address, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(anonymous.get("liked_by_me").is_none());

    let authed: Value = app
        .client
        .get(format!("{}/api/blog/{}", app.address, post_id))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(authed["liked_by_me"], true);
}
