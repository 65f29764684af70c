//! In-process mock of the content backend
//!
//! Serves the REST surface the dashboard talks to over a real socket,
//! records every request it receives and enforces the bearer token.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub const TOKEN: &str = "secret-token";

/// One request as seen by the backend
#[derive(Debug, Clone, Default)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub text: Vec<(String, String)>,
    pub files: Vec<FilePart>,
    pub json: Option<Value>,
}

impl Recorded {
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.text
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Clone, Default)]
pub struct Backend {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
    requests: Arc<RwLock<Vec<Recorded>>>,
    fail_lists: Arc<AtomicBool>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection served at `list_path`
    pub fn seed(&self, list_path: &str, records: Vec<Value>) {
        self.collections
            .write()
            .unwrap()
            .insert(list_path.to_string(), records);
    }

    pub fn records(&self, list_path: &str) -> Vec<Value> {
        self.collections
            .read()
            .unwrap()
            .get(list_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.read().unwrap().clone()
    }

    /// Make every list endpoint answer 500 without a JSON body
    pub fn fail_lists(&self, on: bool) {
        self.fail_lists.store(on, Ordering::SeqCst);
    }

    /// Serve on an ephemeral port and return the base URL
    pub async fn spawn(&self) -> String {
        let app = router().with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn record(&self, request: Recorded) {
        self.requests.write().unwrap().push(request);
    }
}

fn router() -> Router<Backend> {
    let router = Router::new().route(
        "/auth/users",
        get(|State(b): State<Backend>, headers: HeaderMap| list(b, headers, "/auth/users")),
    );
    let router = multipart_routes(router, "/episode");
    let router = multipart_routes(router, "/poochaPolice");
    let router = multipart_routes(router, "/singleStory");

    router
        .route(
            "/forceUpdate",
            get(|State(b): State<Backend>, headers: HeaderMap| list(b, headers, "/forceUpdate")),
        )
        .route(
            "/force-update",
            post(
                |State(b): State<Backend>, headers: HeaderMap, Json(body): Json<Value>| {
                    save_json(b, headers, None, body)
                },
            ),
        )
        .route(
            "/force-update/{id}",
            put(
                |State(b): State<Backend>,
                 Path(id): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<Value>| save_json(b, headers, Some(id), body),
            ),
        )
}

fn multipart_routes(router: Router<Backend>, base: &'static str) -> Router<Backend> {
    router
        .route(
            base,
            get(move |State(b): State<Backend>, headers: HeaderMap| list(b, headers, base)).post(
                move |State(b): State<Backend>, headers: HeaderMap, multipart: Multipart| {
                    save_multipart(b, headers, base, None, multipart)
                },
            ),
        )
        .route(
            &format!("{}/{{id}}", base),
            put(
                move |State(b): State<Backend>,
                      Path(id): Path<String>,
                      headers: HeaderMap,
                      multipart: Multipart| {
                    save_multipart(b, headers, base, Some(id), multipart)
                },
            )
            .delete(
                move |State(b): State<Backend>, Path(id): Path<String>, headers: HeaderMap| {
                    delete_record(b, headers, base, id)
                },
            ),
        )
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn recorded(method: &str, path: String, headers: &HeaderMap) -> Recorded {
    Recorded {
        method: method.to_string(),
        path,
        authorization: header_value(headers, header::AUTHORIZATION),
        content_type: header_value(headers, header::CONTENT_TYPE),
        ..Default::default()
    }
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", TOKEN);
    if header_value(headers, header::AUTHORIZATION).as_deref() == Some(expected.as_str()) {
        Ok(())
    } else {
        Err((StatusCode::FORBIDDEN, Json(json!({ "message": "Invalid token" }))).into_response())
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn list(b: Backend, headers: HeaderMap, list_path: &'static str) -> Response {
    b.record(recorded("GET", list_path.to_string(), &headers));
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    if b.fail_lists.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(Value::Array(b.records(list_path))).into_response()
}

async fn save_multipart(
    b: Backend,
    headers: HeaderMap,
    base: &'static str,
    id: Option<String>,
    mut multipart: Multipart,
) -> Response {
    let (method, path) = match &id {
        Some(id) => ("PUT", format!("{}/{}", base, id)),
        None => ("POST", base.to_string()),
    };
    let mut request = recorded(method, path, &headers);
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();

        match file_name {
            Some(file_name) => {
                fields.insert(name.clone(), json!(format!("https://cdn.test/{}", file_name)));
                request.files.push(FilePart {
                    name,
                    file_name: Some(file_name),
                    content_type,
                    size: bytes.len(),
                });
            }
            None => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                fields.insert(name.clone(), json!(text));
                request.text.push((name, text));
            }
        }
    }
    b.record(request);

    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    upsert(&b, base, id, fields)
}

async fn save_json(b: Backend, headers: HeaderMap, id: Option<String>, body: Value) -> Response {
    let (method, path) = match &id {
        Some(id) => ("PUT", format!("/force-update/{}", id)),
        None => ("POST", "/force-update".to_string()),
    };
    let mut request = recorded(method, path, &headers);
    request.json = Some(body.clone());
    b.record(request);

    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let mut fields = body.as_object().cloned().unwrap_or_default();
    fields.insert("updatedAt".to_string(), json!(chrono::Utc::now().to_rfc3339()));
    upsert(&b, "/forceUpdate", id, fields)
}

fn upsert(b: &Backend, list_path: &str, id: Option<String>, fields: Map<String, Value>) -> Response {
    let mut collections = b.collections.write().unwrap();
    let records = collections.entry(list_path.to_string()).or_default();

    if list_path == "/episode" {
        if let Some(number) = fields.get("storyNumber").map(display) {
            let clash = records.iter().any(|r| {
                r.get("storyNumber").map(display).as_deref() == Some(number.as_str())
                    && r.get("_id").and_then(Value::as_str) != id.as_deref()
            });
            if clash {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Story number already exists" })),
                )
                    .into_response();
            }
        }
    }

    match id {
        None => {
            let mut record = fields;
            record.insert("_id".to_string(), json!(Uuid::new_v4().to_string()));
            let record = Value::Object(record);
            records.push(record.clone());
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Some(id) => {
            let Some(existing) = records
                .iter_mut()
                .find(|r| r.get("_id").and_then(Value::as_str) == Some(id.as_str()))
            else {
                return (StatusCode::NOT_FOUND, Json(json!({ "message": "Record not found" })))
                    .into_response();
            };
            if let Some(object) = existing.as_object_mut() {
                object.extend(fields);
            }
            Json(existing.clone()).into_response()
        }
    }
}

async fn delete_record(b: Backend, headers: HeaderMap, base: &'static str, id: String) -> Response {
    b.record(recorded("DELETE", format!("{}/{}", base, id), &headers));
    if let Err(denied) = authorized(&headers) {
        return denied;
    }

    let mut collections = b.collections.write().unwrap();
    let records = collections.entry(base.to_string()).or_default();
    let before = records.len();
    records.retain(|r| r.get("_id").and_then(Value::as_str) != Some(id.as_str()));

    if records.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({ "message": "Record not found" }))).into_response()
    } else {
        Json(json!({ "message": "Deleted" })).into_response()
    }
}
