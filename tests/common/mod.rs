//! In-process backend fixture for whole-console integration tests.
//!
//! A stateful axum server with cookie-based sessions and an in-memory
//! device store, mirroring the real backend's endpoint surface closely
//! enough to drive the full login → browse → mutate flows.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const SESSION_COOKIE: &str = "NMSSESSION=ok";

pub struct Backend {
    pub devices: Mutex<Vec<Value>>,
    /// When set, every protected endpoint demands the session cookie.
    pub require_session: AtomicBool,
    next_id: AtomicI64,
}

impl Backend {
    fn new() -> Self {
        Self {
            devices: Mutex::new(Vec::new()),
            require_session: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn seed_device(&self, name: &str, kind: &str, ip: &str, place: &str) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.devices.lock().unwrap().push(json!({
            "id": id,
            "name": name,
            "type": kind,
            "ipAddress": ip,
            "place": place,
            "reachable": true,
        }));
        id
    }

    /// Mutate a stored device in place, as backend SNMP polling would.
    pub fn patch_device(&self, id: i64, field: &str, value: Value) {
        let mut devices = self.devices.lock().unwrap();
        for device in devices.iter_mut() {
            if device["id"] == json!(id) {
                device[field] = value.clone();
            }
        }
    }

    fn session_ok(&self, headers: &HeaderMap) -> bool {
        if !self.require_session.load(Ordering::SeqCst) {
            return true;
        }
        headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(|cookies| cookies.contains(SESSION_COOKIE))
            .unwrap_or(false)
    }
}

pub struct BackendServer {
    pub state: Arc<Backend>,
    pub base_url: String,
}

pub async fn spawn() -> BackendServer {
    let state = Arc::new(Backend::new());

    let app = Router::new()
        .route("/api/auth/check", get(auth_check))
        .route("/api/auth/login", post(auth_login))
        .route("/api/auth/logout", get(auth_logout))
        .route("/api/device/getDevices", get(get_devices))
        .route("/api/device/uploadDevice", post(upload_device))
        .route("/api/device/deleteDevice", delete(delete_device))
        .route("/api/device/getDataSize", get(get_data_size))
        .route("/api/device/getUptimeSystem", get(get_uptime))
        .route(
            "/api/device/checkDeviceConnectivity/{ip}",
            get(check_connectivity),
        )
        .route("/api/device/getVendorByIp", get(get_vendor))
        .route("/api/device/obtainAnsibleLog", get(get_ansible_log))
        .route("/api/scheduler/create", post(scheduler_create))
        .route("/api/scheduler/exists", get(scheduler_exists))
        .route("/api/scheduler/delete", delete(scheduler_delete))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr: SocketAddr = listener.local_addr().expect("fixture local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fixture");
    });

    BackendServer {
        state,
        base_url: format!("http://{addr}"),
    }
}

async fn auth_check(headers: HeaderMap) -> Response {
    let has_session = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookies| cookies.contains(SESSION_COOKIE))
        .unwrap_or(false);
    if has_session {
        (StatusCode::OK, "Authenticated").into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response()
    }
}

async fn auth_login(Json(body): Json<Value>) -> Response {
    if body["username"] == "admin" && body["password"] == "secret" {
        (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/"))],
            "admin",
        )
            .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response()
    }
}

async fn auth_logout() -> Response {
    (StatusCode::OK, "Logged out").into_response()
}

async fn get_devices(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !state.session_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response();
    }
    let devices = state.devices.lock().unwrap();
    if let Some(id) = params.get("id").and_then(|v| v.parse::<i64>().ok()) {
        let hits: Vec<Value> = devices
            .iter()
            .filter(|d| d["id"] == json!(id))
            .cloned()
            .collect();
        return Json(hits).into_response();
    }
    Json(devices.clone()).into_response()
}

async fn upload_device(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !state.session_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response();
    }
    for field in ["name", "type", "ipAddress", "place"] {
        if body.get(field).and_then(Value::as_str).is_none() {
            return (StatusCode::BAD_REQUEST, format!("missing {field}")).into_response();
        }
    }
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let mut stored = body.clone();
    stored["id"] = json!(id);
    stored["reachable"] = json!(false);
    state.devices.lock().unwrap().push(stored);
    Json(body).into_response()
}

async fn delete_device(
    State(state): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !state.session_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response();
    }
    for field in ["id", "ipAddress", "type"] {
        if !params.contains_key(field) {
            return (StatusCode::BAD_REQUEST, format!("missing {field}")).into_response();
        }
    }
    let id: i64 = match params["id"].parse() {
        Ok(id) => id,
        Err(_) => return (StatusCode::BAD_REQUEST, "bad id").into_response(),
    };
    state
        .devices
        .lock()
        .unwrap()
        .retain(|d| d["id"] != json!(id));
    (StatusCode::OK, "deleted").into_response()
}

async fn get_data_size(State(state): State<Arc<Backend>>) -> Response {
    let size = state.devices.lock().unwrap().len();
    Json(json!({ "size": size })).into_response()
}

async fn get_uptime() -> Response {
    (StatusCode::OK, "987654").into_response()
}

async fn check_connectivity(
    Path(ip): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("type").map(String::as_str) {
        Some("ping") => (StatusCode::OK, format!("PING {ip}: 3 packets, 0% loss")).into_response(),
        Some("tcp") => match params.get("port") {
            Some(port) => (StatusCode::OK, format!("TCP {ip}:{port} open")).into_response(),
            None => (StatusCode::BAD_REQUEST, "missing port").into_response(),
        },
        _ => (StatusCode::BAD_REQUEST, "Invalid parameters!").into_response(),
    }
}

async fn get_vendor(Query(params): Query<HashMap<String, String>>) -> Response {
    if !params.contains_key("ip") {
        return (StatusCode::BAD_REQUEST, "Invalid parameters!").into_response();
    }
    (StatusCode::OK, "UNDEFINED_VENDOR").into_response()
}

async fn get_ansible_log() -> Response {
    Json(json!([
        "\u{1b}[0;32mok: [core-sw-1]\u{1b}[0m",
        "PLAY RECAP"
    ]))
    .into_response()
}

async fn scheduler_create(Json(body): Json<Value>) -> Response {
    match body.get("jobName").and_then(Value::as_str) {
        Some(job_name) => {
            (StatusCode::OK, format!("Job created with name: {job_name}")).into_response()
        }
        None => (StatusCode::BAD_REQUEST, "missing jobName").into_response(),
    }
}

async fn scheduler_exists() -> Response {
    (StatusCode::OK, "").into_response()
}

async fn scheduler_delete() -> Response {
    (StatusCode::OK, "Job deleted: backup").into_response()
}
