//! In-process stand-in for the Face API
//!
//! Serves scripted answers for detect, identify and person lookup on an
//! ephemeral localhost port and records every request it receives.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use facewho_id::config::{CliArgs, ServiceConfig, TomlConfig};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const TEST_KEY: &str = "test-subscription-key";
pub const TEST_GROUP: &str = "family";

type Reply = (u16, Value);

/// Scripted Face API answers
#[derive(Default, Clone)]
pub struct StubFaceApi {
    detect: Option<Reply>,
    identify: HashMap<String, Reply>,
    persons: HashMap<String, Reply>,
}

/// Requests seen by the stub
#[derive(Default, Debug, Clone)]
pub struct Recorded {
    pub detect_bodies: Vec<Vec<u8>>,
    pub detect_headers: Vec<HeaderMap>,
    pub detect_queries: Vec<HashMap<String, String>>,
    pub identify_bodies: Vec<Value>,
    pub identify_headers: Vec<HeaderMap>,
    pub person_lookups: Vec<(String, String)>,
    pub person_headers: Vec<HeaderMap>,
}

struct StubInner {
    script: StubFaceApi,
    recorded: Mutex<Recorded>,
}

/// Running stub
pub struct StubHandle {
    pub base_url: String,
    inner: Arc<StubInner>,
}

impl StubHandle {
    pub fn recorded(&self) -> Recorded {
        self.inner.recorded.lock().unwrap().clone()
    }
}

impl StubFaceApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detect(mut self, status: u16, body: Value) -> Self {
        self.detect = Some((status, body));
        self
    }

    pub fn identify(mut self, face_id: &str, status: u16, body: Value) -> Self {
        self.identify.insert(face_id.to_string(), (status, body));
        self
    }

    pub fn person(mut self, person_id: &str, status: u16, body: Value) -> Self {
        self.persons.insert(person_id.to_string(), (status, body));
        self
    }

    pub async fn start(self) -> StubHandle {
        let inner = Arc::new(StubInner {
            script: self,
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/face/v1.0/detect", post(detect))
            .route("/face/v1.0/identify", post(identify))
            .route(
                "/face/v1.0/persongroups/:group/persons/:person",
                get(get_person),
            )
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubHandle {
            base_url: format!("http://{}", addr),
            inner,
        }
    }
}

fn reply(reply: Option<&Reply>, missing: Reply) -> Response {
    let (status, body) = reply.cloned().unwrap_or(missing);
    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
}

fn provider_error(code: &str) -> Value {
    json!({ "error": { "code": code, "message": "scripted failure" } })
}

async fn detect(
    State(inner): State<Arc<StubInner>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    {
        let mut recorded = inner.recorded.lock().unwrap();
        recorded.detect_bodies.push(body.to_vec());
        recorded.detect_headers.push(headers);
        recorded.detect_queries.push(query);
    }
    reply(inner.script.detect.as_ref(), (200, json!([])))
}

async fn identify(
    State(inner): State<Arc<StubInner>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let face_id = body["faceIds"][0].as_str().unwrap_or_default().to_string();
    {
        let mut recorded = inner.recorded.lock().unwrap();
        recorded.identify_bodies.push(body);
        recorded.identify_headers.push(headers);
    }
    reply(
        inner.script.identify.get(&face_id),
        (400, provider_error("FaceNotFound")),
    )
}

async fn get_person(
    State(inner): State<Arc<StubInner>>,
    Path((group, person)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    {
        let mut recorded = inner.recorded.lock().unwrap();
        recorded.person_lookups.push((group, person.clone()));
        recorded.person_headers.push(headers);
    }
    reply(
        inner.script.persons.get(&person),
        (404, provider_error("PersonNotFound")),
    )
}

/// Detect response entry
pub fn face_json(face_id: &str) -> Value {
    json!({
        "faceId": face_id,
        "faceRectangle": { "top": 10, "left": 20, "width": 64, "height": 64 }
    })
}

/// Identify response with one result carrying `person_ids` as candidates
pub fn identified(face_id: &str, person_ids: &[&str]) -> Value {
    let candidates: Vec<Value> = person_ids
        .iter()
        .map(|p| json!({ "personId": p, "confidence": 0.87 }))
        .collect();
    json!([{ "faceId": face_id, "candidates": candidates }])
}

/// Person lookup response
pub fn person_json(person_id: &str, name: &str) -> Value {
    json!({
        "personId": person_id,
        "persistedFaceIds": ["015839fb-fbd9-4f79-ace9-7675fc2f1dd9"],
        "name": name,
        "userData": null
    })
}

/// Service configuration pointing at the stub
pub fn test_toml(stub: &StubHandle) -> TomlConfig {
    TomlConfig {
        endpoint: Some(stub.base_url.clone()),
        subscription_key: Some(TEST_KEY.to_string()),
        person_group_id: Some(TEST_GROUP.to_string()),
        request_timeout_secs: Some(5),
        ..Default::default()
    }
}

pub fn test_config(toml: &TomlConfig) -> ServiceConfig {
    ServiceConfig::resolve(&CliArgs::default(), toml).unwrap()
}
