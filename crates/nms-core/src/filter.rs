//! Client-side filter predicates for the device inventory
//!
//! Filtering is purely local: it never triggers a fetch, and applying the
//! same filter twice yields the same subset. The page window on top of the
//! filtered subset belongs to the inventory controller, not here.

use serde::{Deserialize, Serialize};

use crate::types::{DeviceKind, DeviceRecord, DeviceStatus};

/// Status facet of the inventory filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Online,
    Offline,
}

impl StatusFilter {
    fn matches(&self, status: DeviceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Online => status == DeviceStatus::Online,
            StatusFilter::Offline => status == DeviceStatus::Offline,
        }
    }
}

/// Device-kind facet of the inventory filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(DeviceKind),
}

impl KindFilter {
    fn matches(&self, kind: DeviceKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(k) => *k == kind,
        }
    }
}

/// The full filter state of the inventory view
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceFilter {
    /// Substring match over name, ip address and place
    pub search: String,
    pub status: StatusFilter,
    pub kind: KindFilter,
}

impl DeviceFilter {
    /// True when no facet narrows the result set
    pub fn is_default(&self) -> bool {
        self.search.is_empty()
            && self.status == StatusFilter::All
            && self.kind == KindFilter::All
    }

    /// Whether a single record passes all three facets
    ///
    /// Name and place match case-insensitively; the ip address is matched
    /// verbatim (addresses have no case).
    pub fn matches(&self, record: &DeviceRecord) -> bool {
        let matches_search = if self.search.is_empty() {
            true
        } else {
            let needle = self.search.to_lowercase();
            record.name.to_lowercase().contains(&needle)
                || record.ip_address.contains(&self.search)
                || record.place.to_lowercase().contains(&needle)
        };

        matches_search && self.status.matches(record.status()) && self.kind.matches(record.kind)
    }

    /// Apply all facets, preserving input order
    pub fn apply<'a>(&self, records: &'a [DeviceRecord]) -> Vec<&'a DeviceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}
