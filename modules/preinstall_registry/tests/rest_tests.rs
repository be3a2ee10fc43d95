//! HTTP surface tests driving the router in-process
#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{body::Body, Router};
use http::{header, Method, Request, StatusCode};
use preinstall_registry::api::rest::routes::register_routes;
use preinstall_registry::domain::{FileIntake, Service};
use preinstall_registry::infra::uploads::LocalFileIntake;
use preinstall_registry::{Config, RegistryModule};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

mod common;

// Collaborators that fail on purpose
mod failing {
    use async_trait::async_trait;
    use bytes::Bytes;
    use preinstall_registry::contract::{FilterColumn, NewSubmission, Submission, SubmissionFilter};
    use preinstall_registry::domain::{FileIntake, SubmissionRepository};
    use preinstall_registry::infra::uploads::LocalFileIntake;

    /// Store that rejects every insert
    pub struct ReadOnlyRepo;

    #[async_trait]
    impl SubmissionRepository for ReadOnlyRepo {
        async fn insert(&self, _submission: &NewSubmission) -> anyhow::Result<Submission> {
            anyhow::bail!("attempt to write a readonly database")
        }

        async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<Submission>> {
            Ok(None)
        }

        async fn delete_by_id(&self, _id: i32) -> anyhow::Result<u64> {
            Ok(0)
        }

        async fn list(
            &self,
            _filter: &SubmissionFilter,
            _limit: u64,
            _offset: u64,
        ) -> anyhow::Result<Vec<Submission>> {
            Ok(Vec::new())
        }

        async fn count(&self, _filter: &SubmissionFilter) -> anyhow::Result<u64> {
            Ok(0)
        }

        async fn distinct_values(&self, _column: FilterColumn) -> anyhow::Result<Vec<String>> {
            Ok(Vec::new())
        }
    }

    /// Writes uploads to disk except for one form field
    pub struct RefusingIntake {
        pub inner: LocalFileIntake,
        pub refused_field: &'static str,
    }

    #[async_trait]
    impl FileIntake for RefusingIntake {
        async fn store(&self, field: &str, original_name: &str, content: Bytes) -> anyhow::Result<String> {
            if field == self.refused_field {
                anyhow::bail!("No space left on device");
            }
            self.inner.store(field, original_name, content).await
        }

        async fn discard(&self, stored_name: &str) -> anyhow::Result<()> {
            self.inner.discard(stored_name).await
        }
    }
}

fn router_over(service: Arc<Service>, intake: Arc<dyn FileIntake>) -> Router {
    register_routes(
        Router::new(),
        service,
        intake,
        Config::default().max_upload_bytes,
    )
}

fn upload_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

const BOUNDARY: &str = "preinstall-test-boundary";

async fn app_with(config: impl FnOnce(Config) -> Config) -> (TempDir, RegistryModule, Router) {
    let (dir, module) = common::temp_module(config).await;
    let router = module.register_rest(Router::new());
    (dir, module, router)
}

async fn app() -> (TempDir, RegistryModule, Router) {
    app_with(|c| c).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn submit_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_fields(intersection: &str, city: &str) -> Value {
    json!({
        "intersectionName": intersection,
        "city": city,
        "state": "IL",
        "endUser": "City Traffic Department",
        "distributor": "Orange Traffic",
        "cabinetType": "TS2 Type 1",
        "tlsConnection": "Fiber",
        "detectionIO": "Loops"
    })
}

fn submit_multipart(fields: &Value, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields.as_object().unwrap() {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{}\r\n",
                value.as_str().unwrap()
            )
            .as_bytes(),
        );
    }
    for (name, file_name, content) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn submit_ok(app: &Router, intersection: &str, city: &str) -> i64 {
    let (status, body) = send(app, submit_json(form_fields(intersection, city))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

// ===== Submit =====

#[tokio::test]
async fn test_submit_json_then_fetch() {
    let (_dir, _module, app) = app().await;

    let (status, body) = send(&app, submit_json(form_fields("Main St & 1st Ave", "Springfield"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Form submitted successfully!"));
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/api/submissions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["intersection_name"], json!("Main St & 1st Ave"));
    assert_eq!(body["cabinet_type"], json!("TS2 Type 1"));
    assert_eq!(body["detection_io"], json!("Loops"));
    assert_eq!(body["phasing"], Value::Null);
    assert!(body["submitted_at"].is_string());
}

#[tokio::test]
async fn test_submit_missing_fields_is_bad_request() {
    let (_dir, _module, app) = app().await;

    let mut fields = form_fields("Main St & 1st Ave", "Springfield");
    fields.as_object_mut().unwrap().remove("city");

    let (status, body) = send(&app, submit_json(fields)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing required fields: city" }));

    let (_, list) = send(&app, get("/api/submissions")).await;
    assert_eq!(list["total"], json!(0));
}

#[tokio::test]
async fn test_submit_urlencoded_resolves_other() {
    let (_dir, _module, app) = app().await;

    let form = "intersectionName=Oak+%26+3rd&city=Shelbyville&state=IL&endUser=County\
                &distributor=Other&otherDistributor=Local+Supply&cabinetType=TS1\
                &tlsConnection=Fiber&phasingText=8+phase";
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, stored) = send(&app, get(&format!("/api/submissions/{}", body["id"]))).await;
    assert_eq!(stored["intersection_name"], json!("Oak & 3rd"));
    assert_eq!(stored["distributor"], json!("Local Supply"));
    assert_eq!(stored["phasing"], json!("8 phase"));
    assert_eq!(stored["detection_io"], Value::Null);
}

#[tokio::test]
async fn test_submit_multipart_stores_files() {
    let (dir, _module, app) = app().await;

    let mut fields = form_fields("Main St & 1st Ave", "Springfield");
    fields["phasingText"] = json!("8 phase dual ring");
    let request = submit_multipart(
        &fields,
        &[
            ("phasingFile", "phasing.pdf", b"%PDF-1.4 phasing"),
            ("timingPlans", "plans.xlsx", b"timing plan bytes"),
        ],
    );

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, stored) = send(&app, get(&format!("/api/submissions/{}", body["id"]))).await;

    let phasing = stored["phasing"].as_str().unwrap();
    let (text, phasing_ref) = phasing.split_once(" | File: ").unwrap();
    assert_eq!(text, "8 phase dual ring");
    assert!(phasing_ref.starts_with("phasingFile-"));
    assert!(phasing_ref.ends_with(".pdf"));

    let timing_ref = stored["timing_plans"]
        .as_str()
        .unwrap()
        .strip_prefix("File: ")
        .unwrap();
    assert!(timing_ref.starts_with("timingPlans-"));

    let uploads = dir.path().join("uploads");
    assert_eq!(
        std::fs::read(uploads.join(phasing_ref)).unwrap(),
        b"%PDF-1.4 phasing"
    );
    assert_eq!(
        std::fs::read(uploads.join(timing_ref)).unwrap(),
        b"timing plan bytes"
    );
}

#[tokio::test]
async fn test_submit_multipart_ignores_empty_file_part() {
    let (_dir, _module, app) = app().await;

    let request = submit_multipart(
        &form_fields("Main St & 1st Ave", "Springfield"),
        &[("phasingFile", "", b"")],
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, stored) = send(&app, get(&format!("/api/submissions/{}", body["id"]))).await;
    assert_eq!(stored["phasing"], Value::Null);
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let (dir, _module, app) = app_with(|c| Config {
        max_upload_bytes: 16,
        ..c
    })
    .await;

    let request = submit_multipart(
        &form_fields("Main St & 1st Ave", "Springfield"),
        &[("phasingFile", "big.pdf", &[b'x'; 64])],
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].as_str().unwrap().contains("phasingFile"));

    let (_, list) = send(&app, get("/api/submissions")).await;
    assert_eq!(list["total"], json!(0));
    assert_eq!(
        std::fs::read_dir(dir.path().join("uploads")).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_invalid_submit_leaves_no_upload_behind() {
    let (dir, _module, app) = app().await;

    let mut fields = form_fields("Main St & 1st Ave", "Springfield");
    fields.as_object_mut().unwrap().remove("tlsConnection");
    let request = submit_multipart(&fields, &[("phasingFile", "phasing.pdf", b"data")]);

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        std::fs::read_dir(dir.path().join("uploads")).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_mistyped_json_is_bad_request() {
    let (_dir, _module, app) = app().await;

    let mut fields = form_fields("Main St & 1st Ave", "Springfield");
    fields["city"] = json!(5);

    let (status, body) = send(&app, submit_json(fields)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"city\": "))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsupported_body_type_is_bad_request() {
    let (_dir, _module, app) = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/submit")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("intersectionName=Main"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_failed_insert_discards_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let uploads = dir.path().join("uploads");
    let intake = LocalFileIntake::open(&uploads).await.unwrap();
    let service = Arc::new(Service::new(Arc::new(failing::ReadOnlyRepo), Config::default()));
    let app = router_over(service, Arc::new(intake));

    let request = submit_multipart(
        &form_fields("Main St & 1st Ave", "Springfield"),
        &[
            ("phasingFile", "phasing.pdf", b"%PDF-1.4 phasing"),
            ("timingPlans", "plans.xlsx", b"timing plan bytes"),
        ],
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to save submission" }));
    assert_eq!(upload_count(&uploads), 0);
}

#[tokio::test]
async fn test_failed_second_upload_discards_first() {
    let (dir, module) = common::temp_module(|c| c).await;
    let uploads = dir.path().join("uploads");
    let intake = failing::RefusingIntake {
        inner: LocalFileIntake::open(&uploads).await.unwrap(),
        refused_field: "timingPlans",
    };
    let app = router_over(module.service(), Arc::new(intake));

    let request = submit_multipart(
        &form_fields("Main St & 1st Ave", "Springfield"),
        &[
            ("phasingFile", "phasing.pdf", b"%PDF-1.4 phasing"),
            ("timingPlans", "plans.xlsx", b"timing plan bytes"),
        ],
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to store uploaded file" }));
    assert_eq!(upload_count(&uploads), 0);

    let (_, list) = send(&app, get("/api/submissions")).await;
    assert_eq!(list["total"], json!(0));
}

// ===== Get / Delete =====

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let (_dir, _module, app) = app().await;

    for uri in ["/api/submissions/999", "/api/submissions/abc"] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body, json!({ "error": "Submission not found" }));
    }
}

#[tokio::test]
async fn test_delete_then_not_found() {
    let (_dir, _module, app) = app().await;
    let id = submit_ok(&app, "Main St & 1st Ave", "Springfield").await;
    let uri = format!("/api/submissions/{id}");

    let (status, body) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Submission deleted successfully" })
    );

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Submission not found" }));
}

// ===== Listing =====

#[tokio::test]
async fn test_list_filters_and_paginates() {
    let (_dir, _module, app) = app().await;
    submit_ok(&app, "Main St & 1st Ave", "Springfield").await;
    submit_ok(&app, "Oak & 3rd", "Shelbyville").await;
    submit_ok(&app, "Elm & 5th", "Springfield").await;

    let (status, body) = send(&app, get("/api/submissions?city=Springfield&page=2&limit=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["page"], json!(2));
    assert_eq!(body["limit"], json!(1));
    assert_eq!(body["totalPages"], json!(2));
    let rows = body["submissions"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["intersection_name"], json!("Main St & 1st Ave"));

    let (_, body) = send(&app, get("/api/submissions?search=Oak")).await;
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["submissions"][0]["city"], json!("Shelbyville"));

    let (_, body) = send(&app, get("/api/submissions?search=oak")).await;
    assert_eq!(body["total"], json!(0));
}

#[tokio::test]
async fn test_list_bad_paging_falls_back_to_defaults() {
    let (_dir, _module, app) = app().await;
    submit_ok(&app, "Main St & 1st Ave", "Springfield").await;

    let (status, body) = send(&app, get("/api/submissions?page=abc&limit=&city=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], json!(1));
    assert_eq!(body["limit"], json!(50));
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["totalPages"], json!(1));
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let (_dir, _module, app) = app().await;
    submit_ok(&app, "Main St & 1st Ave", "Springfield").await;

    for uri in [
        "/api/submissions?page=10",
        "/api/submissions?page=2305843009213693952&limit=4",
        "/api/submissions?page=9223372036854775807&limit=500",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["submissions"], json!([]), "{uri}");
        assert_eq!(body["total"], json!(1), "{uri}");
        assert_eq!(body["totalPages"], json!(1), "{uri}");
    }
}

// ===== Filters / docs =====

#[tokio::test]
async fn test_filters_list_distinct_values() {
    let (_dir, _module, app) = app().await;

    let (status, body) = send(&app, get("/api/filters")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cities": [], "states": [], "cabinetTypes": [] }));

    submit_ok(&app, "A", "b").await;
    submit_ok(&app, "B", "a").await;
    submit_ok(&app, "C", "a").await;

    let (_, body) = send(&app, get("/api/filters")).await;
    assert_eq!(body["cities"], json!(["a", "b"]));
    assert_eq!(body["states"], json!(["IL"]));
    assert_eq!(body["cabinetTypes"], json!(["TS2 Type 1"]));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (_dir, _module, app) = app().await;

    let (status, body) = send(&app, get("/api/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["openapi"].is_string());
    assert!(body["components"]["schemas"]["SubmissionDto"].is_object());
}
