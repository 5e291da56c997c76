//! # nms-core - Core Domain Types
//!
//! Foundation crate for the NMS console. Provides device domain types,
//! filter predicates, backup-schedule types, error handling, ANSI helpers
//! for raw log lines, and logging initialization.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`DeviceKind`] - The fixed set of managed device kinds
//! - [`NewDevice`] - A device as entered in the add-device form
//! - [`DeviceRecord`] - A device as reported by the backend (telemetry included)
//! - [`DeviceKey`] - The composite id/ip/kind key the delete contract requires
//! - [`NetworkInterface`], [`DeviceStatus`]
//!
//! ### Filtering (`filter`)
//! - [`DeviceFilter`] - search + status + kind predicates over the inventory
//! - [`StatusFilter`], [`KindFilter`]
//!
//! ### Scheduling (`schedule`)
//! - [`BackupSchedule`] - weekly backup slot (day 1 = Sunday)
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with auth/transport/preflight classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use nms_core::prelude::*;
//! ```

pub mod ansi;
pub mod error;
pub mod filter;
pub mod logging;
pub mod schedule;
pub mod types;

/// Prelude for common imports used throughout all NMS console crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use ansi::{contains_ansi_codes, contains_word, strip_ansi_codes};
pub use error::{Error, Result, ResultExt};
pub use filter::{DeviceFilter, KindFilter, StatusFilter};
pub use schedule::{BackupSchedule, BACKUP_JOB_NAME};
pub use types::{DeviceKey, DeviceKind, DeviceRecord, DeviceStatus, NetworkInterface, NewDevice};
