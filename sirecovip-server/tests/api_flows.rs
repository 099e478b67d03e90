//! End-to-end API flows against a stubbed provider
//!
//! A small axum app emulates the provider's auth, table and storage
//! endpoints on an ephemeral port; the real router is driven with
//! `tower::ServiceExt::oneshot` on top of it.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, Request, StatusCode, header},
    response::IntoResponse,
    routing::{any, get, post},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use sirecovip_server::{Config, ServerState, build_router};

const VALID_TOKEN: &str = "valid-token";
const TEST_EMAIL: &str = "ana@municipio.gob.mx";
const TEST_PASSWORD: &str = "secreta123";

// ========== Stub provider ==========

/// Counts table and storage calls, so tests can assert a rejected
/// request never reached the data plane
#[derive(Clone, Default)]
struct ProviderHits(Arc<AtomicUsize>);

impl ProviderHits {
    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

fn merchant_row(id: &str) -> Value {
    json!({
        "id": id,
        "name": "María García",
        "business": "Antojitos",
        "address": "Av. Corregidora 12",
        "delegation": "Centro Historico",
        "latitude": 20.588793,
        "longitude": -100.389888,
        "schedule_start": "08:00",
        "schedule_end": "16:00",
        "operating_days": ["lunes", "viernes"],
        "stand_type": "semifijo",
        "status": "en-observacion",
        "registered_by": "user-1",
        "created_at": "2025-03-10T12:00:00Z"
    })
}

async fn stub_token(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == TEST_EMAIL && body["password"] == TEST_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": VALID_TOKEN,
                "user": { "id": "user-1", "email": TEST_EMAIL }
            })),
        )
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "Invalid login credentials" })),
        )
    }
}

async fn stub_user(headers: HeaderMap) -> impl IntoResponse {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if bearer == Some(VALID_TOKEN) {
        (
            StatusCode::OK,
            Json(json!({ "id": "user-1", "email": TEST_EMAIL })),
        )
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "invalid JWT" })))
    }
}

async fn stub_rest(
    State(hits): State<ProviderHits>,
    Path(table): Path<String>,
    method: Method,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> impl IntoResponse {
    hits.bump();
    let query = query.unwrap_or_default();
    let missing = query.contains("id=eq.m-404");

    let rows: Value = match (table.as_str(), method.as_str()) {
        ("users", "GET") => json!([{ "role": "inspector", "name": "Ana Torres" }]),
        ("organizations", "GET") => json!([
            { "id": "org-1", "name": "Unión de Comerciantes 5 de Febrero" },
            { "id": "org-2", "name": "Tianguis de La Cruz" }
        ]),
        ("merchants", "GET") if missing => json!([]),
        ("merchants", "GET") if query.contains("id=eq.") => {
            let mut row = merchant_row("m1");
            if query.contains("documents") {
                row["documents"] = json!([{
                    "id": "d1",
                    "merchant_id": "m1",
                    "name": "licencia.pdf",
                    "file_url": "https://stub/storage/v1/object/public/evidence/documentos/1_a.pdf",
                    "document_type": "pdf",
                    "file_size": 1024
                }]);
            }
            json!([row])
        }
        ("merchants", "GET") => json!([merchant_row("m1"), merchant_row("m2")]),
        ("merchants", "POST") => {
            // Echo the inserted row back with generated columns filled in
            let sent: Value = serde_json::from_slice(&body).unwrap_or(json!([{}]));
            let mut row = merchant_row("m-new");
            if let Some(obj) = sent.as_array().and_then(|a| a.first()) {
                for (k, v) in obj.as_object().into_iter().flatten() {
                    row[k] = v.clone();
                }
            }
            row["id"] = json!("m-new");
            json!([row])
        }
        ("merchants", "PATCH") if missing => json!([]),
        ("merchants", "PATCH") => {
            let sent: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
            let mut row = merchant_row("m1");
            for (k, v) in sent.as_object().into_iter().flatten() {
                row[k] = v.clone();
            }
            json!([row])
        }
        ("merchants", "DELETE") if missing => json!([]),
        ("merchants", "DELETE") => json!([merchant_row("m1")]),
        ("documents", "POST") => {
            let sent: Value = serde_json::from_slice(&body).unwrap_or(json!([{}]));
            let row = sent.as_array().map(|a| a[0].clone()).unwrap_or(json!({}));
            json!([{
                "id": "d-new",
                "merchant_id": row["merchant_id"],
                "name": row["name"],
                "file_url": row["file_url"],
                "document_type": row["document_type"],
                "file_size": row["file_size"]
            }])
        }
        _ => return (StatusCode::NOT_FOUND, Json(json!({ "message": "no such table" }))),
    };

    (StatusCode::OK, Json(rows))
}

async fn stub_upload(
    State(hits): State<ProviderHits>,
    Path((bucket, path)): Path<(String, String)>,
) -> impl IntoResponse {
    hits.bump();
    Json(json!({ "Key": format!("{bucket}/{path}") }))
}

fn stub_provider(hits: ProviderHits) -> Router {
    Router::new()
        .route("/auth/v1/token", post(stub_token))
        .route("/auth/v1/user", get(stub_user))
        .route("/rest/v1/{table}", any(stub_rest))
        .route("/storage/v1/object/{bucket}/{*path}", post(stub_upload))
        .with_state(hits)
}

/// Spin up the stub provider and build the app router pointed at it
async fn test_app() -> (Router, ProviderHits) {
    let hits = ProviderHits::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let stub = stub_provider(hits.clone());
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });

    let config = Config::with_overrides(base_url, "test-service-key", 0);
    let state = ServerState::initialize(&config).unwrap();
    (build_router(state), hits)
}

// ========== Request helpers ==========

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn authed(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {VALID_TOKEN}"))
}

/// Hand-built multipart/form-data body
fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    files: &[(&str, &str, &str, &[u8])],
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    for (name, filename, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

fn merchant_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "María García"),
        ("business", "Antojitos"),
        ("address", "Av. Corregidora 12"),
        ("delegation", "Centro Historico"),
        ("latitude", "20.58879312"),
        ("longitude", "-100.38988801"),
        ("schedule_start", "08:00"),
        ("schedule_end", "16:00"),
        ("operating_days", r#"["lunes","viernes"]"#),
    ]
}

// ========== Open endpoints ==========

#[tokio::test]
async fn root_and_health_need_no_token() {
    let (app, _) = test_app().await;

    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "API SIRECOVIP Online 🚀");

    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ========== Login ==========

#[tokio::test]
async fn login_returns_token_and_enriched_user() {
    let (app, _) = test_app().await;

    let req = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": TEST_EMAIL, "password": TEST_PASSWORD }).to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "✅ Login exitoso");
    assert_eq!(body["token"], VALID_TOKEN);
    assert_eq!(body["user"]["role"], "inspector");
    assert_eq!(body["user"]["name"], "Ana Torres");
    assert_eq!(body["user"]["email"], TEST_EMAIL);
}

#[tokio::test]
async fn login_rejects_missing_fields() {
    let (app, _) = test_app().await;

    let req = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "email": "", "password": "" }).to_string()))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email y contraseña son obligatorios");
}

#[tokio::test]
async fn login_surfaces_provider_rejection_as_401() {
    let (app, _) = test_app().await;

    let req = Request::post("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": TEST_EMAIL, "password": "wrong" }).to_string(),
        ))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Invalid login credentials"), "got: {message}");
}

// ========== Auth middleware ==========

#[tokio::test]
async fn protected_routes_reject_missing_token() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, Request::get("/api/merchants").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "⛔ Acceso denegado: Falta el token de autenticación");
}

#[tokio::test]
async fn protected_routes_reject_bad_token() {
    let (app, _) = test_app().await;

    let req = Request::get("/api/merchants")
        .header(header::AUTHORIZATION, "Bearer forged")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "⛔ Token inválido o expirado");
}

// ========== Merchants ==========

#[tokio::test]
async fn list_merchants_returns_plain_array() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, authed("GET", "/api/merchants").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "m1");
    assert_eq!(rows[0]["status"], "en-observacion");
}

#[tokio::test]
async fn get_merchant_embeds_documents() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, authed("GET", "/api/merchants/m1").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "m1");
    assert_eq!(body["documents"][0]["document_type"], "pdf");
}

#[tokio::test]
async fn get_missing_merchant_is_404() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, authed("GET", "/api/merchants/m-404").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comerciante no encontrado");
}

#[tokio::test]
async fn create_merchant_uploads_photo_and_inserts() {
    let (app, _) = test_app().await;
    let boundary = "XDELIMITERX";

    let body = multipart_body(
        boundary,
        &merchant_fields(),
        &[
            ("image", "puesto.jpg", "image/jpeg", b"\xFF\xD8fakejpeg"),
            ("documents", "licencia.pdf", "application/pdf", b"%PDF-fake"),
        ],
    );

    let req = authed("POST", "/api/merchants")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::CREATED, "body: {body}");
    assert_eq!(body["message"], "✅ Comerciante registrado");
    assert_eq!(body["merchant"]["id"], "m-new");
    assert_eq!(body["merchant"]["status"], "en-observacion");
    assert_eq!(body["merchant"]["registered_by"], "user-1");
    // Coordinates rounded to the 6-decimal convention
    assert_eq!(body["merchant"]["latitude"], 20.588793);

    let photo_url = body["merchant"]["stall_photo_url"].as_str().unwrap();
    assert!(photo_url.contains("/storage/v1/object/public/evidence/puestos/"));
    assert!(photo_url.ends_with(".jpg"));
}

#[tokio::test]
async fn create_merchant_rejects_non_image_photo() {
    let (app, hits) = test_app().await;
    let boundary = "XDELIMITERX";

    let body = multipart_body(
        boundary,
        &merchant_fields(),
        &[("image", "malware.exe", "application/octet-stream", b"MZ")],
    );

    let req = authed("POST", "/api/merchants")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "⛔ Solo se permiten imágenes (JPG, PNG)");
    assert_eq!(hits.count(), 0, "rejected create must not touch the provider");
}

#[tokio::test]
async fn create_merchant_rejects_missing_required_field() {
    let (app, hits) = test_app().await;
    let boundary = "XDELIMITERX";

    let fields: Vec<_> = merchant_fields()
        .into_iter()
        .filter(|(name, _)| *name != "delegation")
        .collect();
    let body = multipart_body(boundary, &fields, &[]);

    let req = authed("POST", "/api/merchants")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("La delegación"), "got: {message}");
    assert_eq!(hits.count(), 0, "rejected create must not touch the provider");
}

#[tokio::test]
async fn update_merchant_patches_sent_fields_only() {
    let (app, _) = test_app().await;
    let boundary = "XDELIMITERX";

    let body = multipart_body(boundary, &[("notes", "Cambio de horario")], &[]);

    let req = authed("PUT", "/api/merchants/m1")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "body: {body}");
    assert_eq!(body["message"], "✅ Comerciante actualizado");
    assert_eq!(body["merchant"]["notes"], "Cambio de horario");
    // Untouched columns keep their stored values
    assert_eq!(body["merchant"]["name"], "María García");
}

#[tokio::test]
async fn update_rejects_blanked_required_field() {
    let (app, hits) = test_app().await;
    let boundary = "XDELIMITERX";

    let body = multipart_body(boundary, &[("name", "")], &[]);

    let req = authed("PUT", "/api/merchants/m1")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("El nombre del comerciante"), "got: {message}");
    assert_eq!(hits.count(), 0, "rejected update must not touch the provider");
}

#[tokio::test]
async fn update_missing_merchant_is_404() {
    let (app, _) = test_app().await;
    let boundary = "XDELIMITERX";

    let body = multipart_body(boundary, &[("notes", "x")], &[]);

    let req = authed("PUT", "/api/merchants/m-404")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comerciante no encontrado");
}

#[tokio::test]
async fn delete_merchant_and_missing_variant() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, authed("DELETE", "/api/merchants/m1").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "✅ Comerciante eliminado");

    let (status, body) =
        send(&app, authed("DELETE", "/api/merchants/m-404").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comerciante no encontrado");
}

// ========== Organizations ==========

#[tokio::test]
async fn organizations_catalog_is_listed() {
    let (app, _) = test_app().await;

    let (status, body) =
        send(&app, authed("GET", "/api/organizations").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Unión de Comerciantes 5 de Febrero");
}
