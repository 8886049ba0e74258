
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn students_cannot_create_projects() {
    let app = TestApp::spawn().await;
    let student = app.register_student("student@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&student.token)
        .json(&json!({
            "title": "Nope",
            "description": "Students cannot own projects",
            "category": "Testing"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn create_project_defaults_to_active_with_empty_positions() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&alumni.token)
        .json(&json!({
            "title": "Minimal",
            "description": "No positions yet",
            "category": "Research"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "active");
    assert_eq!(body["positions"], json!([]));
    assert_eq!(body["created_by"], json!(alumni.id));
}

#[actix_rt::test]
async fn missing_required_fields_fail_validation() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/projects", app.address))
        .bearer_auth(&alumni.token)
        .json(&json!({
            "title": "",
            "description": "Missing title and category",
            "category": ""
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn update_is_partial_and_owner_only() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let intruder = app.register_alumni("intruder@example.com").await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Original Title", 1)
        .await;

    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, project_id))
        .bearer_auth(&intruder.token)
        .json(&json!({"title": "Hijacked"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, project_id))
        .bearer_auth(&alumni.token)
        .json(&json!({"status": "paused"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    // Absent fields keep their stored values.
    assert_eq!(body["title"], "Original Title");
    assert_eq!(body["status"], "paused");
}

#[actix_rt::test]
async fn update_upserts_positions() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Position Upserts", 1)
        .await;

    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, project_id))
        .bearer_auth(&alumni.token)
        .json(&json!({
            "positions": [
                {"id": position_id, "count": 3},
                {"title": "Designer", "count": 1, "required_skills": ["Figma"]}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    let positions = body["positions"].as_array().unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0]["id"], json!(position_id));
    assert_eq!(positions[0]["count"], 3);
    assert_eq!(positions[1]["title"], "Designer");
}

#[actix_rt::test]
async fn positions_of_other_projects_cannot_be_patched() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let other = app.register_alumni("other@example.com").await;
    let (_, foreign_position_id) = app
        .create_project_with_position(&other, "Foreign", 1)
        .await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Mine", 1)
        .await;

    let response = app
        .client
        .put(format!("{}/api/projects/{}", app.address, project_id))
        .bearer_auth(&alumni.token)
        .json(&json!({
            "positions": [{"id": foreign_position_id, "count": 99}]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn listing_is_anonymous_but_annotates_authenticated_students() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("student@example.com").await;
    let (applied_id, position_id) = app
        .create_project_with_position(&alumni, "Applied", 1)
        .await;
    app.create_project_with_position(&alumni, "Not Applied", 1).await;

    app.apply(&student, applied_id, Some(position_id)).await;

    // Anonymous: no has_applied annotation at all.
    let response = app
        .client
        .get(format!("{}/api/projects", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert!(body[0].get("has_applied").is_none());

    // Authenticated student sees the flag.
    let body: Value = app
        .client
        .get(format!("{}/api/projects", app.address))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let applied_flags: Vec<(&str, bool)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| {
            (
                p["title"].as_str().unwrap(),
                p["has_applied"].as_bool().unwrap(),
            )
        })
        .collect();
    assert!(applied_flags.contains(&("Applied", true)));
    assert!(applied_flags.contains(&("Not Applied", false)));

    // The availability filter hides already-applied projects.
    let body: Value = app
        .client
        .get(format!("{}/api/projects?exclude_applied=true", app.address))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Not Applied"]);
}

#[actix_rt::test]
async fn my_projects_lists_only_the_callers() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let other = app.register_alumni("other@example.com").await;
    app.create_project_with_position(&alumni, "Mine", 1).await;
    app.create_project_with_position(&other, "Theirs", 1).await;

    let body: Value = app
        .client
        .get(format!("{}/api/projects/mine", app.address))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Mine"]);
}
