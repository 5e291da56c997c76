//! In-process backend fixture for wire-level client tests.
//!
//! Stands up a real axum server on an ephemeral port with the same
//! endpoint surface as the NMS backend, a tiny in-memory device store,
//! and a request journal the tests can assert against.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

const SESSION_COOKIE: &str = "NMSSESSION=ok";

/// Shared fixture state: device store, request journal, behavior knobs.
pub struct Fixture {
    pub devices: Mutex<Vec<Value>>,
    /// Every request as `"METHOD path?query"`, in arrival order.
    pub journal: Mutex<Vec<String>>,
    /// Body served by the vendor lookup endpoint.
    pub vendor_body: Mutex<String>,
    /// Body served by the scheduler exists endpoint.
    pub schedule_body: Mutex<String>,
    /// When set, device list requests answer 500.
    pub fail_device_list: AtomicBool,
    /// When set, device list answers 200 with a non-JSON body.
    pub garble_device_list: AtomicBool,
    /// When set, device/scheduler endpoints demand the session cookie.
    pub require_session: AtomicBool,
    next_id: AtomicI64,
}

impl Fixture {
    fn new() -> Self {
        Self {
            devices: Mutex::new(Vec::new()),
            journal: Mutex::new(Vec::new()),
            vendor_body: Mutex::new("UNDEFINED_VENDOR".to_string()),
            schedule_body: Mutex::new(String::new()),
            fail_device_list: AtomicBool::new(false),
            garble_device_list: AtomicBool::new(false),
            require_session: AtomicBool::new(false),
            next_id: AtomicI64::new(1),
        }
    }

    /// Requests whose path contains `fragment`, in arrival order.
    pub fn requests_matching(&self, fragment: &str) -> Vec<String> {
        self.journal
            .lock()
            .unwrap()
            .iter()
            .filter(|line| line.contains(fragment))
            .cloned()
            .collect()
    }

    /// Seed a device directly into the store, returning its id.
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

/// A running fixture server.
pub struct FixtureServer {
    pub state: Arc<Fixture>,
    pub base_url: String,
}

/// Start the fixture on an ephemeral port.
pub async fn spawn() -> FixtureServer {
    let state = Arc::new(Fixture::new());

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

    FixtureServer {
        state,
        base_url: format!("http://{addr}"),
    }
}

fn record(state: &Fixture, method: &Method, uri: &Uri) {
    state.journal.lock().unwrap().push(format!("{method} {uri}"));
}

async fn auth_check(State(state): State<Arc<Fixture>>, headers: HeaderMap) -> Response {
    let has_session = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookies| cookies.contains(SESSION_COOKIE))
        .unwrap_or(false);
    let _ = &state;
    if has_session {
        (StatusCode::OK, "Authenticated").into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response()
    }
}

async fn auth_login(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri);
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
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri);
    if !state.session_ok(&headers) {
        return (StatusCode::UNAUTHORIZED, "Not Authenticated").into_response();
    }
    if state.fail_device_list.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if state.garble_device_list.load(Ordering::SeqCst) {
        return (StatusCode::OK, "this is not a device array").into_response();
    }

    let devices = state.devices.lock().unwrap();
    // id takes precedence over paging, mirroring the real backend
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
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri);
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

    // The echo carries no id, like the real backend's happy path.
    Json(body).into_response()
}

async fn delete_device(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri);
    // The backend's delete contract takes the full composite key.
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

async fn get_data_size(State(state): State<Arc<Fixture>>) -> Response {
    let size = state.devices.lock().unwrap().len();
    Json(json!({ "size": size })).into_response()
}

async fn get_uptime() -> Response {
    (StatusCode::OK, "123456").into_response()
}

async fn check_connectivity(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Path(ip): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri);
    match params.get("type").map(String::as_str) {
        Some("ping") => (StatusCode::OK, format!("PING {ip}: 3 packets, 0% loss")).into_response(),
        Some("tcp") => {
            let Some(port) = params.get("port") else {
                return (StatusCode::BAD_REQUEST, "missing port").into_response();
            };
            (StatusCode::OK, format!("TCP {ip}:{port} open")).into_response()
        }
        _ => (StatusCode::BAD_REQUEST, "Invalid parameters!").into_response(),
    }
}

async fn get_vendor(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri);
    if !params.contains_key("ip") {
        return (StatusCode::BAD_REQUEST, "Invalid parameters!").into_response();
    }
    let body = state.vendor_body.lock().unwrap().clone();
    if body == "__fail__" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    (StatusCode::OK, body).into_response()
}

async fn get_ansible_log() -> Response {
    Json(json!([
        "\u{1b}[0;32mok: [core-sw-1]\u{1b}[0m",
        "\u{1b}[0;33mchanged: [edge-fw]\u{1b}[0m",
        "PLAY RECAP"
    ]))
    .into_response()
}

async fn scheduler_create(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    record(&state, &method, &uri);
    for field in ["day", "hour", "minute"] {
        if body.get(field).and_then(Value::as_u64).is_none() {
            return (StatusCode::BAD_REQUEST, format!("missing {field}")).into_response();
        }
    }
    let Some(job_name) = body.get("jobName").and_then(Value::as_str) else {
        return (StatusCode::BAD_REQUEST, "missing jobName").into_response();
    };
    *state.schedule_body.lock().unwrap() = format!(
        "Job {job_name}: day {} at {:02}:{:02}",
        body["day"], body["hour"], body["minute"]
    );
    (StatusCode::OK, format!("Job created with name: {job_name}")).into_response()
}

async fn scheduler_exists(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
) -> Response {
    record(&state, &method, &uri);
    let body = state.schedule_body.lock().unwrap().clone();
    (StatusCode::OK, body).into_response()
}

async fn scheduler_delete(
    State(state): State<Arc<Fixture>>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &method, &uri);
    let Some(job_name) = params.get("jobName") else {
        return (StatusCode::BAD_REQUEST, "missing jobName").into_response();
    };
    state.schedule_body.lock().unwrap().clear();
    (StatusCode::OK, format!("Job deleted: {job_name}")).into_response()
}
