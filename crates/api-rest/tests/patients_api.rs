use std::sync::Arc;

use api_rest::{router, AppState, NOT_FOUND_DETAIL};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use patients_core::{CoreConfig, PatientService};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    // Held so the database file outlives the router.
    _temp_dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let cfg = CoreConfig::new(temp_dir.path().join("patients.db"))
            .expect("CoreConfig::new should succeed");
        let service = PatientService::new(Arc::new(cfg));
        service
            .initialise_database()
            .expect("schema creation should succeed");

        Self {
            router: router(AppState::new(service)),
            _temp_dir: temp_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|err| panic!("router request failed: {err}"));
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read response body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
    }

    async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, &body.to_string()).await
    }

    async fn create(&self, name: &str) -> Value {
        let (status, body) = self
            .post(
                "/patients",
                json!({"name": name, "age": 30, "symptoms": ["tos"]}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected body: {body}");
        body
    }

    async fn patient_count(&self) -> usize {
        let (status, body) = self.get("/patients").await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().expect("list should be an array").len()
    }
}

fn detail_locs(body: &Value) -> Vec<Value> {
    body["detail"]
        .as_array()
        .expect("detail should be an array")
        .iter()
        .map(|item| item["loc"].clone())
        .collect()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = TestApp::new();

    for uri in ["/", "/health"] {
        let (status, body) = app.get(uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "message": "Patients API up"}));
    }
}

#[tokio::test]
async fn create_then_get_returns_identical_record() {
    let app = TestApp::new();

    let (status, created) = app
        .post(
            "/patients",
            json!({"name": "Juan Pérez", "age": 28, "symptoms": ["fiebre", "tos"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Juan Pérez");
    assert_eq!(created["age"], 28);
    assert_eq!(created["symptoms"], json!(["fiebre", "tos"]));
    assert!(created["id"].is_i64());
    assert!(created["created_at"].is_string());

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = app.get(&format!("/patients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_accepts_single_string_symptoms() {
    let app = TestApp::new();

    let (status, created) = app
        .post(
            "/patients",
            json!({"name": "Ana", "age": 7, "symptoms": "  fiebre, dolor de cabeza "}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["symptoms"], json!(["fiebre", "dolor de cabeza"]));
}

#[tokio::test]
async fn create_drops_blank_list_entries() {
    let app = TestApp::new();

    let (status, created) = app
        .post(
            "/patients",
            json!({"name": "Ana", "age": 7, "symptoms": [" fiebre ", "  ", "tos"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["symptoms"], json!(["fiebre", "tos"]));
}

#[tokio::test]
async fn sequential_creates_get_increasing_ids() {
    let app = TestApp::new();

    let mut last = 0;
    for name in ["Ana", "Luis", "Marta", "Juan"] {
        let id = app.create(name).await["id"].as_i64().unwrap();
        assert!(id > last, "id {id} should be greater than {last}");
        last = id;
    }
}

#[tokio::test]
async fn out_of_range_age_is_rejected_and_nothing_stored() {
    let app = TestApp::new();
    app.create("Ana").await;

    for age in [-1, 131, 1000] {
        let (status, body) = app
            .post(
                "/patients",
                json!({"name": "Luis", "age": age, "symptoms": ["tos"]}),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail_locs(&body), vec![json!(["body", "age"])]);
    }

    assert_eq!(app.patient_count().await, 1);
}

#[tokio::test]
async fn invalid_name_is_rejected_and_nothing_stored() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/patients", json!({"name": "", "age": 20, "symptoms": "tos"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_short");

    let (status, body) = app
        .post(
            "/patients",
            json!({"name": "x".repeat(121), "age": 20, "symptoms": "tos"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_long");

    let (status, _) = app
        .post(
            "/patients",
            json!({"name": "x".repeat(120), "age": 20, "symptoms": "tos"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(app.patient_count().await, 1);
}

#[tokio::test]
async fn invalid_symptoms_are_rejected() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/patients", json!({"name": "Ana", "age": 20, "symptoms": []}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "symptoms"])]);

    let (status, body) = app
        .post(
            "/patients",
            json!({"name": "Ana", "age": 20, "symptoms": ["tos", ""]}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "symptoms", 1])]);

    let (status, _) = app
        .post("/patients", json!({"name": "Ana", "age": 20, "symptoms": ""}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    assert_eq!(app.patient_count().await, 0);
}

#[tokio::test]
async fn every_invalid_field_is_reported() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/patients", json!({"name": "", "age": 500, "symptoms": []}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        detail_locs(&body),
        vec![
            json!(["body", "name"]),
            json!(["body", "age"]),
            json!(["body", "symptoms"])
        ]
    );
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/patients",
            json!({"name": "Ana", "age": "veinte", "symptoms": ["tos"]}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "age"])]);
    assert_eq!(body["detail"][0]["type"], "int_parsing");

    let (status, body) = app
        .post("/patients", json!({"name": "Ana", "age": 20.5, "symptoms": "tos"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "int_from_float");

    let (status, body) = app.post_raw("/patients", "{not json").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "json_invalid");

    let (status, body) = app.post("/patients", json!(["Ana", 20, "tos"])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body"])]);

    assert_eq!(app.patient_count().await, 0);
}

#[tokio::test]
async fn missing_field_is_located() {
    let app = TestApp::new();

    let (status, body) = app.post("/patients", json!({"name": "Ana", "age": 20})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "symptoms"])]);
    assert_eq!(body["detail"][0]["type"], "missing");
    assert_eq!(body["detail"][0]["msg"], "Field required");
}

#[tokio::test]
async fn wrongly_typed_fields_are_each_located() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/patients", json!({"name": 42, "age": 20, "symptoms": "tos"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "name"])]);
    assert_eq!(body["detail"][0]["type"], "string_type");

    let (status, body) = app
        .post("/patients", json!({"name": "", "age": "x", "symptoms": []}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        detail_locs(&body),
        vec![
            json!(["body", "name"]),
            json!(["body", "age"]),
            json!(["body", "symptoms"])
        ]
    );

    let (status, body) = app
        .post(
            "/patients",
            json!({"name": "Ana", "age": 20, "symptoms": ["tos", 7]}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["body", "symptoms", 1])]);

    assert_eq!(app.patient_count().await, 0);
}

#[tokio::test]
async fn integral_float_age_is_accepted() {
    let app = TestApp::new();

    let (status, created) = app
        .post("/patients", json!({"name": "Ana", "age": 28.0, "symptoms": "tos"}))
        .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {created}");
    assert_eq!(created["age"], 28);
}

#[tokio::test]
async fn missing_content_type_is_unsupported() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Request::builder()
                .uri("/patients")
                .method("POST")
                .body(Body::from(
                    json!({"name": "Ana", "age": 20, "symptoms": "tos"}).to_string(),
                ))
                .expect("failed to build request"),
        )
        .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = TestApp::new();

    let (status, body) = app.get("/patients/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": NOT_FOUND_DETAIL}));

    app.create("Ana").await;
    app.create("Luis").await;

    let (status, body) = app.get("/patients/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Paciente no encontrado"}));
}

#[tokio::test]
async fn non_integer_id_is_unprocessable() {
    let app = TestApp::new();

    let (status, body) = app.get("/patients/abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(detail_locs(&body), vec![json!(["path", "patient_id"])]);
}

#[tokio::test]
async fn list_is_empty_without_patients() {
    let app = TestApp::new();

    let (status, body) = app.get("/patients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_filters_by_name_newest_first() {
    let app = TestApp::new();
    let ana = app.create("Ana").await;
    app.create("Luis").await;
    let juan = app.create("JUAN").await;
    let fernanda = app.create("Fernanda").await;

    let (status, body) = app.get("/patients?name=an").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([fernanda, juan, ana]));

    let (status, body) = app.get("/patients?name=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_without_filter_returns_all_newest_first() {
    let app = TestApp::new();
    let first = app.create("Ana").await;
    let second = app.create("Luis").await;

    let (status, body) = app.get("/patients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([second, first]));

    let (status, body) = app.get("/patients?name=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn repeated_name_filter_uses_last_value() {
    let app = TestApp::new();
    let ana = app.create("Ana").await;
    app.create("Luis").await;

    let (status, body) = app.get("/patients?name=luis&name=an").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([ana]));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new();

    let (status, body) = app.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Patients API");
    assert!(body["paths"]["/patients"].is_object());
    assert!(body["paths"]["/patients/{id}"].is_object());
}
