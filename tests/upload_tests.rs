
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

// Enough of a PNG header for content sniffing.
const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
];

const PDF_BYTES: &[u8] = b"%PDF-1.4\n%minimal test document\n";

fn file_form(field_name: &str, filename: &str, bytes: &'static [u8]) -> Form {
    Form::new().part(
        field_name.to_string(),
        Part::bytes(bytes).file_name(filename.to_string()),
    )
}

#[actix_rt::test]
async fn avatar_upload_stores_and_serves_the_file() {
    let app = TestApp::spawn().await;
    let student = app.register_student("pic@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/uploads/avatar", app.address))
        .bearer_auth(&student.token)
        .multipart(file_form("file", "me.png", PNG_BYTES))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    let url = body["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));

    // The profile now references the stored path.
    let profile: Value = app
        .client
        .get(format!("{}/api/profile", app.address))
        .bearer_auth(&student.token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(profile["avatar_path"], body["path"]);

    // And the file serves back anonymously with its content type.
    let served = app
        .client
        .get(format!("{}{}", app.address, url))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(
        served.headers()["content-type"].to_str().unwrap(),
        "image/png"
    );
    assert_eq!(served.bytes().await.unwrap().as_ref(), PNG_BYTES);
}

#[actix_rt::test]
async fn disallowed_extensions_are_rejected() {
    let app = TestApp::spawn().await;
    let student = app.register_student("bad@example.com").await;

    let response = app
        .client
        .post(format!("{}/api/uploads/avatar", app.address))
        .bearer_auth(&student.token)
        .multipart(file_form("file", "script.sh", b"#!/bin/sh\n"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn mismatched_content_is_rejected() {
    let app = TestApp::spawn().await;
    let student = app.register_student("liar@example.com").await;

    // PDF bytes wearing a .png name must not land on disk.
    let response = app
        .client
        .post(format!("{}/api/uploads/avatar", app.address))
        .bearer_auth(&student.token)
        .multipart(file_form("file", "fake.png", PDF_BYTES))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn project_image_appends_to_the_image_list() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Gallery", 1)
        .await;

    for filename in ["one.png", "two.png"] {
        let response = app
            .client
            .post(format!("{}/api/projects/{}/images", app.address, project_id))
            .bearer_auth(&alumni.token)
            .multipart(file_form("file", filename, PNG_BYTES))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let detail = app.project_detail(project_id).await;
    assert_eq!(detail["images"].as_array().unwrap().len(), 2);
}

#[actix_rt::test]
async fn only_the_owner_uploads_project_files() {
    let app = TestApp::spawn().await;
    let alumni = app.register_alumni("owner@example.com").await;
    let outsider = app.register_alumni("outsider@example.com").await;
    let (project_id, _) = app
        .create_project_with_position(&alumni, "Protected", 1)
        .await;

    let response = app
        .client
        .post(format!("{}/api/projects/{}/document", app.address, project_id))
        .bearer_auth(&outsider.token)
        .multipart(file_form("file", "jd.pdf", PDF_BYTES))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn path_traversal_reads_are_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(format!("{}/uploads/../Cargo.toml", app.address))
        .send()
        .await
        .unwrap();

    assert_ne!(response.status(), StatusCode::OK);
}
