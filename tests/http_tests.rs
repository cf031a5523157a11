use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use plaints::config::PlaintsConfig;
use plaints::server::{AppState, build_router, prepare_option_store};
use plaints::storage::{ComplaintRepository, ComplaintStore, OptionRepository};

const BOUNDARY: &str = "plaints-test-boundary";
const STAFF_TOKEN: &str = "letmein";

struct TestApp {
    _dir: TempDir,
    router: Router,
    complaints: ComplaintRepository,
}

fn app(seeded: bool, staff_token: Option<&str>) -> TestApp {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join(".plaints");

    let options = OptionRepository::at(&data);
    if seeded {
        options.seed().unwrap();
    }
    let complaints = ComplaintRepository::at(&data);

    let mut config = PlaintsConfig::default();
    config.server.staff_token = staff_token.map(str::to_string);

    let state = AppState::new(Arc::new(options), Arc::new(complaints.clone()), &config);
    TestApp {
        _dir: dir,
        router: build_router(state),
        complaints,
    }
}

fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (file_name, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn submit_request(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Request<Body> {
    submit_request_with_files(fields, file.as_slice())
}

fn submit_request_with_files(fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/complaints")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(fields, files)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn sample_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("email", "s@x.com"),
        ("department", "Computer Science"),
        ("category", "hostel"),
        ("subCategory", "electricity"),
        ("description", "No power in block C since morning"),
    ]
}

// =============================================================================
// Health and taxonomy
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app(true, None);

    let (status, body) = send(&app.router, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_options_report_store_origin() {
    let app = app(true, None);

    let response = app
        .router
        .clone()
        .oneshot(get("/options?type=category"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-options-source"], "store");
}

#[tokio::test]
async fn test_options_fall_back_when_store_unseeded() {
    let app = app(false, None);

    let response = app
        .router
        .clone()
        .oneshot(get("/options?type=category"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-options-source"], "builtin");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["facility", "request", "hostel"]);
}

#[tokio::test]
async fn test_subcategories_filtered_by_parent() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        get("/options?type=subCategory&parentCategory=FACILITY"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();
    assert_eq!(values.len(), 6);
    assert!(values.contains(&"washroom"));
    assert!(!values.contains(&"electricity"));
}

#[tokio::test]
async fn test_subcategories_require_parent() {
    let app = app(true, None);

    let (status, body) = send(&app.router, get("/options?type=subCategory")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("parentCategory"));
}

#[tokio::test]
async fn test_departments_carry_codes() {
    let app = app(true, None);

    let (status, body) = send(&app.router, get("/options?type=department")).await;

    assert_eq!(status, StatusCode::OK);
    let departments = body.as_array().unwrap();
    assert!(
        departments
            .iter()
            .any(|d| d["value"] == "Electrical Engineering" && d["code"] == "29310")
    );
}

#[tokio::test]
async fn test_priority_preview() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        get("/priority?category=request&subCategory=wheelchair"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority"], "urgent");
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_submit_end_to_end() {
    let app = app(true, None);

    let (status, body) = send(&app.router, submit_request(&sample_fields(), None)).await;

    assert_eq!(status, StatusCode::CREATED);
    let tracking_id = body["trackingId"].as_str().unwrap();
    assert!(tracking_id.starts_with("CMP-"));
    assert!(body["message"].as_str().unwrap().contains(tracking_id));

    let (status, complaint) = send(
        &app.router,
        get(&format!("/complaints/by-tracking/{tracking_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(complaint["priority"], "urgent");
    assert_eq!(complaint["status"], "open");
    assert_eq!(complaint["email"], "s@x.com");
}

#[tokio::test]
async fn test_client_priority_is_overridden() {
    let app = app(true, None);
    let mut fields = sample_fields();
    fields.push(("priority", "low"));

    let (status, body) = send(&app.router, submit_request(&fields, None)).await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = app
        .complaints
        .find_by_tracking_id(body["trackingId"].as_str().unwrap())
        .unwrap();
    assert_eq!(stored.priority.to_string(), "urgent");
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let app = app(true, None);
    let fields: Vec<_> = sample_fields()
        .into_iter()
        .filter(|(name, _)| *name != "email")
        .collect();

    let (status, body) = send(&app.router, submit_request(&fields, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
    assert!(app.complaints.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_subcategory_is_rejected() {
    let app = app(true, None);
    let fields = vec![
        ("email", "s@x.com"),
        ("department", "Computer Science"),
        ("category", "hostel"),
        ("subCategory", "washroom"),
        ("description", "Dirty"),
    ];

    let (status, _) = send(&app.router, submit_request(&fields, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.complaints.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_oversized_attachment_is_rejected() {
    let app = app(true, None);
    let six_mb = vec![b'x'; 6 * 1024 * 1024];

    let (status, body) = send(
        &app.router,
        submit_request(&sample_fields(), Some(("scan.pdf", &six_mb))),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("maximum size"));
    assert!(app.complaints.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_attachment_is_rejected() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        submit_request(&sample_fields(), Some(("setup.exe", b"MZ"))),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].as_str().unwrap().contains(".exe"));
}

#[tokio::test]
async fn test_attachment_is_stored() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        submit_request(&sample_fields(), Some(("Fuse Box.PNG", b"\x89PNG fake"))),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = app
        .complaints
        .find_by_tracking_id(body["trackingId"].as_str().unwrap())
        .unwrap();
    let attachment = stored.attachment.as_ref().unwrap();
    assert_eq!(attachment.file_name, "Fuse Box.PNG");
    assert_eq!(attachment.stored_as, "fuse-box.png");
    assert!(app.complaints.attachment_path(&stored).unwrap().exists());
}

#[tokio::test]
async fn test_submit_against_unseeded_store_is_unavailable() {
    let app = app(false, None);

    let (status, body) = send(&app.router, submit_request(&sample_fields(), None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("unavailable"));
    assert!(!message.contains("options.yml"));
}

#[tokio::test]
async fn test_trailing_empty_file_part_is_ignored() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        submit_request_with_files(
            &sample_fields(),
            &[("meter.pdf", &b"%PDF-1.4"[..]), ("", &b""[..])],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let stored = app
        .complaints
        .find_by_tracking_id(body["trackingId"].as_str().unwrap())
        .unwrap();
    assert_eq!(stored.attachment.unwrap().file_name, "meter.pdf");
}

#[tokio::test]
async fn test_two_attachments_are_rejected() {
    let app = app(true, None);

    let (status, body) = send(
        &app.router,
        submit_request_with_files(
            &sample_fields(),
            &[("meter.pdf", &b"%PDF-1.4"[..]), ("photo.jpg", &b"\xff\xd8"[..])],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("one attachment"));
    assert!(app.complaints.list().unwrap().is_empty());
}

#[tokio::test]
async fn test_corrupt_option_store_degrades_at_startup() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join(".plaints");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("options.yml"), "{{ not yaml").unwrap();

    let options = OptionRepository::at(&data);
    prepare_option_store(&options);

    let state = AppState::new(
        Arc::new(options),
        Arc::new(ComplaintRepository::at(&data)),
        &PlaintsConfig::default(),
    );
    let router = build_router(state);

    let response = router
        .clone()
        .oneshot(get("/options?type=category"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-options-source"], "builtin");

    let (status, _) = send(&router, submit_request(&sample_fields(), None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_non_multipart_submit_is_bad_request() {
    let app = app(true, None);
    let request = Request::builder()
        .method("POST")
        .uri("/complaints")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let (status, _) = send(&app.router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Lookup and status
// =============================================================================

#[tokio::test]
async fn test_unknown_complaint_is_not_found() {
    let app = app(true, None);

    let (status, _) = send(&app.router, get("/complaints/by-tracking/CMP-00000000")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app.router, get("/complaints/abcdefghijkl")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_by_email() {
    let app = app(true, None);
    send(&app.router, submit_request(&sample_fields(), None)).await;
    let other = vec![
        ("email", "t@x.com"),
        ("department", "Civil Engineering"),
        ("category", "facility"),
        ("subCategory", "Fan"),
        ("description", "Fan makes noise"),
    ];
    send(&app.router, submit_request(&other, None)).await;

    let (status, body) = send(&app.router, get("/complaints?email=t@x.com")).await;
    assert_eq!(status, StatusCode::OK);
    let mine = body.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["subCategory"], "Fan");
    assert_eq!(mine[0]["priority"], "medium");

    let (_, body) = send(&app.router, get("/complaints")).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

fn status_request(id: &str, status: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(format!("/complaints/{id}/status"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::json!({ "status": status }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_status_update_requires_staff_token() {
    let app = app(true, Some(STAFF_TOKEN));
    let (_, body) = send(&app.router, submit_request(&sample_fields(), None)).await;
    let id = app
        .complaints
        .find_by_tracking_id(body["trackingId"].as_str().unwrap())
        .unwrap()
        .id;

    let (status, _) = send(&app.router, status_request(&id, "resolved", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, status_request(&id, "resolved", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app.router,
        status_request(&id, "resolved", Some(STAFF_TOKEN)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "resolved");
    assert_eq!(app.complaints.get(&id).unwrap().status.to_string(), "resolved");
}

#[tokio::test]
async fn test_status_update_validation() {
    let app = app(true, None);
    let (_, body) = send(&app.router, submit_request(&sample_fields(), None)).await;
    let id = app
        .complaints
        .find_by_tracking_id(body["trackingId"].as_str().unwrap())
        .unwrap()
        .id;

    let (status, _) = send(&app.router, status_request(&id, "archived", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app.router,
        status_request("abcdefghijkl", "resolved", None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Aliases are accepted
    let (status, body) = send(&app.router, status_request(&id, "closed", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "resolved");
}
