//! Backup schedule types
//!
//! The scheduler's `day` field follows the day list the console has always
//! offered, which starts the week on Sunday: 1 = Sunday through
//! 7 = Saturday. This is NOT ISO-8601 numbering; the mapping is pinned by
//! a test below and must not be "corrected".

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The job name of the single recurring backup job the backend manages
pub const BACKUP_JOB_NAME: &str = "backup";

/// A weekly backup slot as the scheduler endpoint expects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackupSchedule {
    /// Day of week, 1 = Sunday .. 7 = Saturday
    pub day: u8,
    /// Hour of day, 0-23
    pub hour: u8,
    /// Minute, 0-59
    pub minute: u8,
}

impl BackupSchedule {
    /// Build a schedule, rejecting out-of-range fields
    pub fn new(day: u8, hour: u8, minute: u8) -> Result<Self> {
        if !(1..=7).contains(&day) {
            return Err(Error::invalid_request(format!(
                "schedule day must be 1-7, got {day}"
            )));
        }
        if hour > 23 {
            return Err(Error::invalid_request(format!(
                "schedule hour must be 0-23, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(Error::invalid_request(format!(
                "schedule minute must be 0-59, got {minute}"
            )));
        }
        Ok(Self { day, hour, minute })
    }

    /// English day name for the stored day number
    pub fn day_name(&self) -> &'static str {
        match self.day {
            1 => "Sunday",
            2 => "Monday",
            3 => "Tuesday",
            4 => "Wednesday",
            5 => "Thursday",
            6 => "Friday",
            7 => "Saturday",
            // new() makes this unreachable
            _ => "unknown",
        }
    }
}
