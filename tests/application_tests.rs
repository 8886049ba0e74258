
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn duplicate_application_conflicts_and_leaves_one_row() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Healthcare AI", 2)
        .await;

    let first = app.apply(&student, project_id, Some(position_id)).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.apply(&student, project_id, Some(position_id)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM project_applications WHERE student_id = ? AND position_id = ?",
    )
    .bind(student.id)
    .bind(position_id)
    .fetch_one(&app.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);
}

#[actix_rt::test]
async fn accept_fills_position_and_deactivates_it() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Smart Agriculture", 1)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;

    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    let response = app
        .client
        .post(format!("{}/api/applications/{}/accept", app.address, application_id))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["positions"][0]["filled_count"], 1);
    assert_eq!(detail["positions"][0]["is_active"], false);

    let applications = app.applications_for(&alumni).await;
    assert_eq!(applications[0]["status"], "accepted");

    // The seat is gone, so a second student is stopped at submission.
    let second_student = app.register_student("second@example.com").await;
    let rejected = app.apply(&second_student, project_id, Some(position_id)).await;
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn repeated_accept_does_not_double_count() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "EdTech Platform", 2)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;
    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    for _ in 0..2 {
        let response = app
            .client
            .post(format!("{}/api/applications/{}/accept", app.address, application_id))
            .bearer_auth(&alumni.token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["positions"][0]["filled_count"], 1);
    assert_eq!(detail["positions"][0]["is_active"], true);
}

#[actix_rt::test]
async fn decline_after_accept_reopens_the_seat() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Blockchain Tracker", 1)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;
    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    app.client
        .post(format!("{}/api/applications/{}/accept", app.address, application_id))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();

    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["positions"][0]["filled_count"], 1);
    assert_eq!(detail["positions"][0]["is_active"], false);

    app.client
        .post(format!("{}/api/applications/{}/decline", app.address, application_id))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();

    // Round-tripping accept -> decline restores the pre-accept fill state.
    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["positions"][0]["filled_count"], 0);
    assert_eq!(detail["positions"][0]["is_active"], true);
}

#[actix_rt::test]
async fn withdraw_without_application_is_not_found() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Energy Grid", 1)
        .await;

    let response = app
        .client
        .delete(format!("{}/api/projects/{}/apply", app.address, project_id))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn withdraw_deletes_the_application_row() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Energy Grid", 1)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;

    let response = app
        .client
        .delete(format!("{}/api/projects/{}/apply", app.address, project_id))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM project_applications WHERE student_id = ?")
            .bind(student.id)
            .fetch_one(&app.db_pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[actix_rt::test]
async fn complete_requires_accepted_status() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "AgriTech Monitor", 1)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;
    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    // Still pending: completion is a domain error, not a crash.
    let response = app
        .client
        .post(format!("{}/api/applications/{}/complete", app.address, application_id))
        .bearer_auth(&alumni.token)
        .json(&json!({"feedback": "Great work"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    app.client
        .post(format!("{}/api/applications/{}/accept", app.address, application_id))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();

    let response = app
        .client
        .post(format!("{}/api/applications/{}/complete", app.address, application_id))
        .bearer_auth(&alumni.token)
        .json(&json!({"feedback": "Great work"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let applications = app.applications_for(&alumni).await;
    assert_eq!(applications[0]["is_completed"], true);
    assert_eq!(applications[0]["feedback"], "Great work");
}

#[actix_rt::test]
async fn only_the_owner_can_accept() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let other_alumni = app.register_alumni("other@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Supply Chain", 1)
        .await;

    app.apply(&student, project_id, Some(position_id)).await;
    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    let response = app
        .client
        .post(format!("{}/api/applications/{}/accept", app.address, application_id))
        .bearer_auth(&other_alumni.token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn applying_without_a_position_fails_when_positions_are_open() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let student = app.register_student("applicant@example.com").await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Open Positions", 1)
        .await;

    let response = app.apply(&student, project_id, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn full_lifecycle_scenario() {
    let app = TestApp::spawn().await;

    // Alumni with graduation context creates a one-seat project; a student
    // applies; the owner accepts.
    let alumni = app
        .register_user(&json!({
            "name": "Alumni A",
            "email": "a@example.com",
            "password": TEST_PASSWORD,
            "role": "alumni",
            "graduation_year": 2010,
            "department": "CS"
        }))
        .await;
    let (project_id, position_id) = app
        .create_project_with_position(&alumni, "Project P", 1)
        .await;
    let student = app.register_student("s@example.com").await;

    let response = app.apply(&student, project_id, Some(position_id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let applications = app.applications_for(&alumni).await;
    let application_id = applications[0]["id"].as_i64().unwrap();

    app.client
        .post(format!("{}/api/applications/{}/accept", app.address, application_id))
        .bearer_auth(&alumni.token)
        .send()
        .await
        .unwrap();

    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["positions"][0]["filled_count"], 1);
    assert_eq!(detail["positions"][0]["is_active"], false);

    let applications: Value = app.applications_for(&student).await;
    assert_eq!(applications[0]["status"], "accepted");
}
