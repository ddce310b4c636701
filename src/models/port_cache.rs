use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PortDetailRecord is the cached detail blob for one switch port.
/// Unknown fields written by the listing page are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDetailRecord {
    pub status: String,
    pub port_number: u32,
    pub port_name: String,
    pub interfacetype: String,
}

/// PortCacheEntry is a stored cache row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortCacheEntry {
    pub key: String,
    pub switch_id: String,
    pub port_number: u32,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// HydrateRequest carries the page address the browser was opened with
#[derive(Debug, Clone, Deserialize)]
pub struct HydrateRequest {
    pub url: String,
}
