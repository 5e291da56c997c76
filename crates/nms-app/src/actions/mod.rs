//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Each action is one network call against the shared [`ApiClient`],
//! executed on its own tokio task; the outcome comes back to the update
//! loop as a message. A 401/403 from any operation short-circuits into
//! [`Message::SessionRejected`] so the auth handler can bring the login
//! screen back.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use nms_client::{ApiClient, DeviceQuery};
use nms_core::{Error, BACKUP_JOB_NAME};

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action(action: UpdateAction, client: Arc<ApiClient>, msg_tx: mpsc::Sender<Message>) {
    match action {
        // ─────────────────────────────────────────────────────────
        // Session
        // ─────────────────────────────────────────────────────────
        UpdateAction::CheckSession => {
            tokio::spawn(async move {
                let msg = match client.check_authenticated().await {
                    Ok(authenticated) => Message::SessionChecked { authenticated },
                    Err(e) => Message::SessionCheckFailed {
                        error: e.to_string(),
                    },
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Login { username, password } => {
            tokio::spawn(async move {
                let msg = match client.login(&username, &password).await {
                    Ok(user) => Message::LoginSucceeded { user },
                    Err(e) => Message::LoginFailed {
                        error: e.to_string(),
                    },
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Logout => {
            tokio::spawn(async move {
                // Best effort: a failed logout still ends the local session.
                if let Err(e) = client.logout().await {
                    debug!("logout request failed: {e}");
                }
                send(&msg_tx, Message::LoggedOut).await;
            });
        }

        // ─────────────────────────────────────────────────────────
        // Inventory
        // ─────────────────────────────────────────────────────────
        UpdateAction::FetchDevices { seq, page } => {
            tokio::spawn(async move {
                let msg = match client.list_devices(DeviceQuery::Page(page)).await {
                    Ok(devices) => Message::DevicesLoaded { seq, devices },
                    Err(e) => failure(e, |error| Message::DeviceListFailed { seq, error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::UploadDevice(device) => {
            tokio::spawn(async move {
                let msg = match client.add_device(&device).await {
                    Ok(_echo) => Message::DeviceUploaded,
                    Err(e) => failure(e, |error| Message::DeviceUploadFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::LookupVendor { ip_address } => {
            tokio::spawn(async move {
                let msg = match client.vendor_lookup(&ip_address).await {
                    Ok(vendor) => Message::VendorDetected { vendor },
                    // The lookup degrades to None on everything except a
                    // session rejection.
                    Err(e) => failure(e, |_| Message::VendorDetected { vendor: None }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::FetchDeviceCount => {
            tokio::spawn(async move {
                match client.device_count().await {
                    Ok(count) => send(&msg_tx, Message::DeviceCountLoaded { count }).await,
                    // Display-only counter; a failure just leaves it blank.
                    Err(e) => debug!("device count fetch failed: {e}"),
                }
            });
        }

        UpdateAction::FetchSystemUptime => {
            tokio::spawn(async move {
                match client.system_uptime().await {
                    Ok(uptime) => send(&msg_tx, Message::SystemUptimeLoaded { uptime }).await,
                    Err(e) => debug!("system uptime fetch failed: {e}"),
                }
            });
        }

        // ─────────────────────────────────────────────────────────
        // Detail view
        // ─────────────────────────────────────────────────────────
        UpdateAction::FetchDevice { device_id } => {
            tokio::spawn(async move {
                let msg = match client.get_device(device_id).await {
                    Ok(device) => Message::DetailLoaded { device_id, device },
                    Err(e) => failure(e, |error| Message::DetailLoadFailed { device_id, error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::RefreshDevice { device_id } => {
            tokio::spawn(async move {
                let msg = match client.get_device(device_id).await {
                    Ok(device) => Message::DetailRefreshed { device_id, device },
                    Err(e) => {
                        failure(e, |error| Message::DetailRefreshFailed { device_id, error })
                    }
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Ping { ip_address } => {
            tokio::spawn(async move {
                let msg = match client.ping(&ip_address).await {
                    Ok(output) => Message::PingCompleted { output },
                    Err(e) => failure(e, |error| Message::PingFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::TcpTest { ip_address, port } => {
            tokio::spawn(async move {
                let msg = match client.tcp_test(&ip_address, port).await {
                    Ok(output) => Message::TcpTestCompleted { output },
                    Err(e) => failure(e, |error| Message::TcpTestFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::DeleteDevice(key) => {
            tokio::spawn(async move {
                let device_id = key.id;
                let msg = match client.delete_device(&key).await {
                    Ok(_) => Message::DeviceDeleted { device_id },
                    Err(e) => failure(e, |error| Message::DeviceDeleteFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        // ─────────────────────────────────────────────────────────
        // Backup schedule
        // ─────────────────────────────────────────────────────────
        UpdateAction::FetchScheduleStatus => {
            tokio::spawn(async move {
                let msg = match client.schedule_status(BACKUP_JOB_NAME).await {
                    Ok(status) => Message::ScheduleStatusLoaded { status },
                    Err(e) => failure(e, |error| Message::ScheduleStatusFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::CreateSchedule(slot) => {
            tokio::spawn(async move {
                let msg = match client.schedule_backup(&slot, BACKUP_JOB_NAME).await {
                    Ok(_) => Message::ScheduleCreated,
                    Err(e) => failure(e, |error| Message::ScheduleCreateFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::DeleteSchedule => {
            tokio::spawn(async move {
                let msg = match client.delete_schedule(BACKUP_JOB_NAME).await {
                    Ok(_) => Message::ScheduleDeleted,
                    Err(e) => failure(e, |error| Message::ScheduleDeleteFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }

        // ─────────────────────────────────────────────────────────
        // Logs
        // ─────────────────────────────────────────────────────────
        UpdateAction::FetchLogs => {
            tokio::spawn(async move {
                let msg = match client.fetch_logs().await {
                    Ok(lines) => Message::LogsLoaded { lines },
                    Err(e) => failure(e, |error| Message::LogsLoadFailed { error }),
                };
                send(&msg_tx, msg).await;
            });
        }
    }
}

/// Map an operation failure to its message, routing session rejections to
/// the auth handler instead.
fn failure(error: Error, to_message: impl FnOnce(String) -> Message) -> Message {
    if error.is_auth_failure() {
        Message::SessionRejected {
            error: error.to_string(),
        }
    } else {
        to_message(error.to_string())
    }
}

/// Deliver a message to the update loop; a closed channel means the
/// engine is shutting down and the result is simply dropped.
async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("message channel closed, dropping background result");
    }
}
