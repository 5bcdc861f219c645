//! In-process tRPC backend for integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Canned answer of a procedure
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with `{ "result": { "data": .. } }`
    Data(Value),
    /// Bare status with a text body
    Status(u16),
    /// 200 with an arbitrary body
    Raw(&'static str),
}

/// A request received by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub procedure: String,
    pub raw_query: Option<String>,
    pub input: Option<Value>,
    pub body: Option<Value>,
    /// Body bytes exactly as received
    pub raw_body: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct MockState {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<RecordedCall>>,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Start a backend answering `replies`; other procedures get a 404
    pub async fn spawn(replies: impl IntoIterator<Item = (&'static str, Reply)>) -> Self {
        let state = Arc::new(MockState {
            replies: replies
                .into_iter()
                .map(|(name, reply)| (name.to_string(), reply))
                .collect(),
            calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/trpc/{procedure}", get(handle_query).post(handle_mutation))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, procedure: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.procedure == procedure)
            .collect()
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn reply(state: &MockState, procedure: &str) -> Response {
    match state.replies.get(procedure) {
        Some(Reply::Data(data)) => Json(json!({ "result": { "data": data } })).into_response(),
        Some(Reply::Status(code)) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, "mock failure").into_response()
        }
        Some(Reply::Raw(body)) => (StatusCode::OK, *body).into_response(),
        None => (StatusCode::NOT_FOUND, "no such procedure").into_response(),
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle_query(
    State(state): State<Arc<MockState>>,
    Path(procedure): Path<String>,
    RawQuery(raw_query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let input = raw_query
        .as_deref()
        .and_then(|q| q.strip_prefix("input="))
        .and_then(|encoded| urlencoding::decode(encoded).ok())
        .and_then(|decoded| serde_json::from_str(&decoded).ok());

    state.calls.lock().unwrap().push(RecordedCall {
        method: "GET",
        procedure: procedure.clone(),
        raw_query,
        input,
        body: None,
        raw_body: None,
        authorization: authorization(&headers),
    });
    reply(&state, &procedure)
}

async fn handle_mutation(
    State(state): State<Arc<MockState>>,
    Path(procedure): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let raw_body = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());
    let body = raw_body
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok());

    state.calls.lock().unwrap().push(RecordedCall {
        method: "POST",
        procedure: procedure.clone(),
        raw_query: None,
        input: None,
        body,
        raw_body,
        authorization: authorization(&headers),
    });
    reply(&state, &procedure)
}

pub fn sales_rep_json(id: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "firstName": format!("Rep{id}"),
        "lastName": "Durand",
        "email": format!("rep{id}@capistars.fr"),
        "phone": "0600000000",
        "code": format!("COM-{id:03}"),
        "territories": "[\"Paris\",\"Lyon\"]",
        "isActive": is_active,
        "createdAt": "2025-02-01T10:00:00.000Z",
        "updatedAt": "2025-02-01T10:00:00.000Z"
    })
}

pub fn establishment_json(id: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "name": format!("Salon {id}"),
        "email": format!("salon{id}@example.fr"),
        "phone": "0100000000",
        "address": "1 rue de la Paix",
        "city": "Paris",
        "postalCode": "75002",
        "isActive": is_active,
        "salesRepId": 1,
        "createdAt": "2025-02-01T10:00:00.000Z",
        "updatedAt": "2025-02-01T10:00:00.000Z"
    })
}

pub fn client_json(id: i64, is_active: bool) -> Value {
    json!({
        "id": id,
        "userId": 100 + id,
        "firstName": "Léa",
        "lastName": format!("Client{id}"),
        "email": null,
        "phone": "0612345678",
        "capimilesPoints": 250,
        "isActive": is_active,
        "createdAt": "2025-02-01T10:00:00.000Z",
        "updatedAt": "2025-02-01T10:00:00.000Z"
    })
}
