
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

async fn recommended(app: &TestApp, user: &AuthedUser) -> Value {
    app.client
        .get(format!("{}/api/projects/recommended", app.address))
        .bearer_auth(&user.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[actix_rt::test]
async fn recommendations_are_for_students_only() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;

    let response = app
        .client
        .get(format!("{}/api/projects/recommended", app.address))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn matching_projects_rank_above_weaker_matches() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;

    // "Rust Web Service" matches a required skill (+10) and more;
    // "Figma Workshop" matches nothing for this student.
    app.create_project_with_position(&alumni, "Rust Web Service", 1)
        .await;
    app.client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&alumni.token)
        .json(&json!({
            "title": "Figma Workshop",
            "description": "Design sessions",
            "category": "Design",
            "tags": ["design"]
        }))
        .send()
        .await
        .unwrap();

    let student = app.register_student("student@example.com").await;
    app.client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&student.token)
        .json(&json!({"skills": ["Rust"]}))
        .send()
        .await
        .unwrap();

    let body = recommended(&app, &student).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["title"], "Rust Web Service");
    assert!(list[0]["score"].as_i64().unwrap() > 0);
}

#[actix_rt::test]
async fn zero_scores_fall_back_to_recent_actives() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    app.create_project_with_position(&alumni, "Quantum Router", 1).await;
    app.create_project_with_position(&alumni, "Protein Folding", 1).await;

    // No skills, no department: nothing can score.
    let student = app.register_student("blank@example.com").await;

    let body = recommended(&app, &student).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    for project in list {
        assert_eq!(project["score"], 0);
    }
}

#[actix_rt::test]
async fn applied_and_inactive_projects_are_excluded() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let (applied_id, position_id) = app
        .create_project_with_position(&alumni, "Rust Applied", 1)
        .await;
    let (paused_id, _) = app
        .create_project_with_position(&alumni, "Rust Paused", 1)
        .await;
    app.create_project_with_position(&alumni, "Rust Open", 1).await;

    app.client
        .put(format!("{}/api/projects/{}", app.address, paused_id))
        .bearer_auth(&alumni.token)
        .json(&json!({"status": "paused"}))
        .send()
        .await
        .unwrap();

    let student = app.register_student("student@example.com").await;
    app.client
        .put(format!("{}/api/profile", app.address))
        .bearer_auth(&student.token)
        .json(&json!({"skills": ["Rust"]}))
        .send()
        .await
        .unwrap();
    app.apply(&student, applied_id, Some(position_id)).await;

    let body = recommended(&app, &student).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust Open"]);
}
