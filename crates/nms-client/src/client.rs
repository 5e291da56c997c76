//! Async HTTP client for the NMS backend REST API.
//!
//! One [`ApiClient`] is built at startup and shared (via `Arc`) by every
//! controller; the underlying connection pool and the session cookie store
//! live for the whole process. Each public method corresponds to exactly
//! one backend endpoint and carries an explicit decoding contract: JSON,
//! plain text, or status-only. There is no "try JSON, fall back to text"
//! anywhere: a malformed body on a JSON endpoint is a [`Error::Decode`],
//! not silently coerced text.
//!
//! ## Failure policy
//!
//! Operations raise on failure, with two deliberate exceptions inherited
//! from the dashboard's behavior: [`ApiClient::list_devices`] and
//! [`ApiClient::vendor_lookup`] degrade to an empty result because their
//! callers render "nothing found" and "request failed" identically.
//! A 401/403 response maps to [`Error::Auth`] on every operation: the one
//! failure the UI must always be able to tell apart from "server
//! unreachable".

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use url::Url;

use nms_core::prelude::*;
use nms_core::{BackupSchedule, DeviceKey, DeviceRecord, NewDevice};

/// Backend sentinel meaning "vendor undetermined". Translated to `None`
/// by [`ApiClient::vendor_lookup`]; the literal never reaches a caller.
const UNDEFINED_VENDOR: &str = "UNDEFINED_VENDOR";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters that must be escaped when an address is embedded as a single
/// path segment (a CIDR-suffixed `10.0.0.1/24` must not split the path).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Selector for the device-list endpoint.
///
/// `ById` takes precedence over paging: when a device id is given the page
/// parameter is omitted entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceQuery {
    /// A page of the full inventory (1-indexed).
    Page(u32),
    /// A single device by its server-assigned id.
    ById(i64),
}

impl Default for DeviceQuery {
    fn default() -> Self {
        DeviceQuery::Page(1)
    }
}

/// Connection settings for [`ApiClient::new`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080`. A trailing slash is
    /// tolerated.
    pub base_url: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Shape of the `getDataSize` payload.
#[derive(Debug, Deserialize)]
struct SizePayload {
    size: u64,
}

/// Typed client for the backend REST API.
///
/// Cheap to share: wrap it in an `Arc` and hand clones of that to every
/// controller. All requests carry the session cookie automatically once
/// [`ApiClient::login`] has succeeded.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given backend origin.
    ///
    /// The cookie store is enabled so the backend's session cookie is
    /// captured at login and attached to every subsequent request.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| Error::config(format!("invalid base url {:?}: {e}", config.base_url)))?;

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build http client: {e}")))?;

        Ok(Self { http, base })
    }

    /// Absolute URL for an endpoint path under the backend origin.
    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base.as_str().trim_end_matches('/'))
    }

    // ─────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────

    /// `GET /api/auth/check`: true iff the session cookie is accepted.
    pub async fn check_authenticated(&self) -> Result<bool> {
        let resp = self
            .http
            .get(self.endpoint("/api/auth/check"))
            .send()
            .await
            .map_err(transport_error)?;
        Ok(resp.status().is_success())
    }

    /// `POST /api/auth/login`: returns the backend's user token string.
    ///
    /// Any non-2xx response is an authentication failure; the session
    /// cookie from a successful login is stored for all later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let resp = self
            .http
            .post(self.endpoint("/api/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::auth(format!("login rejected ({status}): {body}")));
        }
        resp.text().await.map_err(transport_error)
    }

    /// `GET /api/auth/logout`: best effort; `false` means the session was
    /// already gone.
    pub async fn logout(&self) -> Result<bool> {
        let resp = self
            .http
            .get(self.endpoint("/api/auth/logout"))
            .send()
            .await
            .map_err(transport_error)?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────
    // Device inventory
    // ─────────────────────────────────────────────────────────────

    /// `GET /api/device/getDevices`: a page of the inventory, or a single
    /// device when queried by id.
    ///
    /// Degrades to an empty list on backend or transport failure (the list
    /// view shows "0 devices" either way); only a session rejection is
    /// surfaced, as [`Error::Auth`].
    pub async fn list_devices(&self, query: DeviceQuery) -> Result<Vec<DeviceRecord>> {
        let mut req = self.http.get(self.endpoint("/api/device/getDevices"));
        req = match query {
            DeviceQuery::ById(id) => req.query(&[("id", id.to_string())]),
            DeviceQuery::Page(page) => req.query(&[("page", page.to_string())]),
        };

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("device list fetch failed, treating as empty: {e}");
                return Ok(Vec::new());
            }
        };

        if is_auth_rejection(resp.status()) {
            return Err(Error::auth("session rejected while listing devices"));
        }
        if !resp.status().is_success() {
            warn!(
                "device list returned HTTP {}, treating as empty",
                resp.status()
            );
            return Ok(Vec::new());
        }

        // 2xx with a body that is not a device array is a protocol
        // violation, not a "no data" case: surface it.
        resp.json::<Vec<DeviceRecord>>()
            .await
            .map_err(|e| Error::decode(format!("device list payload: {e}")))
    }

    /// Single-device convenience over [`ApiClient::list_devices`].
    pub async fn get_device(&self, id: i64) -> Result<Option<DeviceRecord>> {
        let mut devices = self.list_devices(DeviceQuery::ById(id)).await?;
        if devices.is_empty() {
            Ok(None)
        } else {
            Ok(Some(devices.swap_remove(0)))
        }
    }

    /// `POST /api/device/uploadDevice`: upload a new device.
    ///
    /// The happy path echoes the uploaded device back as JSON. The echo
    /// carries no id: the assigned id is only observable through a list
    /// reload.
    pub async fn add_device(&self, device: &NewDevice) -> Result<NewDevice> {
        device.validate()?;

        let resp = self
            .http
            .post(self.endpoint("/api/device/uploadDevice"))
            .json(device)
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "upload device").await?;
        resp.json::<NewDevice>()
            .await
            .map_err(|e| Error::decode(format!("upload echo payload: {e}")))
    }

    /// `DELETE /api/device/deleteDevice`: delete by the composite
    /// id/ipAddress/type key.
    ///
    /// All three key fields are required by the backend's contract; a
    /// blank ip address is rejected here, before any request is made.
    pub async fn delete_device(&self, key: &DeviceKey) -> Result<bool> {
        if key.ip_address.trim().is_empty() {
            return Err(Error::invalid_request(
                "delete requires the device ip address alongside id and type",
            ));
        }

        let resp = self
            .http
            .delete(self.endpoint("/api/device/deleteDevice"))
            .query(&[
                ("id", key.id.to_string()),
                ("ipAddress", key.ip_address.clone()),
                ("type", key.kind.as_str().to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        self.require_success(resp, "delete device").await?;
        Ok(true)
    }

    /// `GET /api/device/getDataSize`: total number of managed devices.
    /// Display-only; pagination math never uses it.
    pub async fn device_count(&self) -> Result<u64> {
        let resp = self
            .http
            .get(self.endpoint("/api/device/getDataSize"))
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "device count").await?;
        let payload: SizePayload = resp
            .json()
            .await
            .map_err(|e| Error::decode(format!("data size payload: {e}")))?;
        Ok(payload.size)
    }

    /// `GET /api/device/getUptimeSystem`: backend uptime. The body is a
    /// plain-text integer in milliseconds.
    pub async fn system_uptime(&self) -> Result<Duration> {
        let resp = self
            .http
            .get(self.endpoint("/api/device/getUptimeSystem"))
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "system uptime").await?;
        let body = resp.text().await.map_err(transport_error)?;
        let millis: u64 = body
            .trim()
            .parse()
            .map_err(|_| Error::decode(format!("uptime payload is not an integer: {body:?}")))?;
        Ok(Duration::from_millis(millis))
    }

    // ─────────────────────────────────────────────────────────────
    // Connectivity probes
    // ─────────────────────────────────────────────────────────────

    /// `GET /api/device/checkDeviceConnectivity/{ip}?type=ping`: raw
    /// backend-formatted ping transcript.
    pub async fn ping(&self, ip_address: &str) -> Result<String> {
        let path = format!(
            "/api/device/checkDeviceConnectivity/{}",
            utf8_percent_encode(ip_address, PATH_SEGMENT)
        );
        let resp = self
            .http
            .get(self.endpoint(&path))
            .query(&[("type", "ping")])
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "ping").await?;
        resp.text().await.map_err(transport_error)
    }

    /// `GET /api/device/checkDeviceConnectivity/{ip}?type=tcp&port=` -
    /// raw backend-formatted TCP probe transcript.
    ///
    /// The port range is validated before any request leaves the client:
    /// an out-of-range port never reaches the network.
    pub async fn tcp_test(&self, ip_address: &str, port: u32) -> Result<String> {
        if port == 0 || port > 65535 {
            return Err(Error::InvalidPort { port });
        }

        let path = format!(
            "/api/device/checkDeviceConnectivity/{}",
            utf8_percent_encode(ip_address, PATH_SEGMENT)
        );
        let resp = self
            .http
            .get(self.endpoint(&path))
            .query(&[("type", "tcp".to_string()), ("port", port.to_string())])
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "tcp test").await?;
        resp.text().await.map_err(transport_error)
    }

    /// `GET /api/device/getVendorByIp`: vendor name for an address.
    ///
    /// The backend signals "unknown vendor" with a sentinel string; that
    /// sentinel (and a blank body) becomes `None` here. Failures also
    /// degrade to `None`: the add-device form simply leaves the vendor
    /// field untouched.
    pub async fn vendor_lookup(&self, ip_address: &str) -> Result<Option<String>> {
        let resp = match self
            .http
            .get(self.endpoint("/api/device/getVendorByIp"))
            .query(&[("ip", ip_address)])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("vendor lookup failed, treating as unknown: {e}");
                return Ok(None);
            }
        };

        if is_auth_rejection(resp.status()) {
            return Err(Error::auth("session rejected during vendor lookup"));
        }
        if !resp.status().is_success() {
            warn!(
                "vendor lookup returned HTTP {}, treating as unknown",
                resp.status()
            );
            return Ok(None);
        }

        let body = resp.text().await.map_err(transport_error)?;
        let vendor = body.trim();
        if vendor.is_empty() || vendor == UNDEFINED_VENDOR {
            Ok(None)
        } else {
            Ok(Some(vendor.to_string()))
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Backup scheduling
    // ─────────────────────────────────────────────────────────────

    /// `POST /api/scheduler/create`: create (or replace) the weekly
    /// backup job.
    pub async fn schedule_backup(&self, schedule: &BackupSchedule, job_name: &str) -> Result<bool> {
        let resp = self
            .http
            .post(self.endpoint("/api/scheduler/create"))
            .json(&serde_json::json!({
                "day": schedule.day,
                "hour": schedule.hour,
                "minute": schedule.minute,
                "jobName": job_name,
            }))
            .send()
            .await
            .map_err(transport_error)?;

        self.require_success(resp, "create schedule").await?;
        Ok(true)
    }

    /// `GET /api/scheduler/exists`: human-readable description of the
    /// active schedule. An empty body is the "no schedule" sentinel, not
    /// an error.
    pub async fn schedule_status(&self, job_name: &str) -> Result<Option<String>> {
        let resp = self
            .http
            .get(self.endpoint("/api/scheduler/exists"))
            .query(&[("jobName", job_name)])
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "schedule status").await?;
        let body = resp.text().await.map_err(transport_error)?;
        let status = body.trim();
        if status.is_empty() {
            Ok(None)
        } else {
            Ok(Some(status.to_string()))
        }
    }

    /// `DELETE /api/scheduler/delete`: remove the named job.
    pub async fn delete_schedule(&self, job_name: &str) -> Result<bool> {
        let resp = self
            .http
            .delete(self.endpoint("/api/scheduler/delete"))
            .query(&[("jobName", job_name)])
            .send()
            .await
            .map_err(transport_error)?;

        self.require_success(resp, "delete schedule").await?;
        Ok(true)
    }

    // ─────────────────────────────────────────────────────────────
    // Logs
    // ─────────────────────────────────────────────────────────────

    /// `GET /api/device/obtainAnsibleLog`: raw (ANSI-colored) log lines
    /// of the latest backup run.
    pub async fn fetch_logs(&self) -> Result<Vec<String>> {
        let resp = self
            .http
            .get(self.endpoint("/api/device/obtainAnsibleLog"))
            .send()
            .await
            .map_err(transport_error)?;

        let resp = self.require_success(resp, "fetch logs").await?;
        resp.json::<Vec<String>>()
            .await
            .map_err(|e| Error::decode(format!("log payload: {e}")))
    }

    // ─────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────

    /// Map a non-2xx response to the raised-error taxonomy: session
    /// rejections become [`Error::Auth`], everything else [`Error::Http`].
    async fn require_success(
        &self,
        resp: reqwest::Response,
        operation: &str,
    ) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if is_auth_rejection(status) {
            return Err(Error::auth(format!("session rejected during {operation}")));
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Error::http(
            status.as_u16(),
            format!("{operation}: {}", body.trim()),
        ))
    }
}

/// True for the statuses the backend uses to reject a missing/expired
/// session.
fn is_auth_rejection(status: reqwest::StatusCode) -> bool {
    status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
}

/// Map transport-level reqwest failures into the error taxonomy.
fn transport_error(e: reqwest::Error) -> Error {
    if e.is_decode() {
        Error::decode(e.to_string())
    } else {
        Error::network(e.to_string())
    }
}
