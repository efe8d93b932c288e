//! Response types for the panel API
//!
//! Field values are kept as [`Value`] because the panel reports the same
//! field as a string or a number depending on version and virtualization
//! type. A field the panel did not send stays `None` and is left out when
//! the record is serialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of an operation that honors raw mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PanelResponse<T> {
    /// Fields selected and renamed out of the panel body
    Normalized(T),
    /// Decoded panel body, unmodified
    Raw(Value),
}

impl<T> PanelResponse<T> {
    /// Returns the normalized record, if any
    pub fn normalized(self) -> Option<T> {
        match self {
            PanelResponse::Normalized(value) => Some(value),
            PanelResponse::Raw(_) => None,
        }
    }

    /// Returns the raw body, if any
    pub fn raw(self) -> Option<Value> {
        match self {
            PanelResponse::Normalized(_) => None,
            PanelResponse::Raw(value) => Some(value),
        }
    }
}

/// Details of a single server (`act=vpsmanage`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    /// Operating system name (`info.vps.os_name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Value>,
    pub bandwidth: BandwidthUsage,
    /// Host node name (`info.server_name`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datacenter: Option<Value>,
}

/// Monthly bandwidth counters of a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandwidthUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free: Option<Value>,
}

/// One entry of the server list (`act=listvs`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    pub hostname: Value,
    pub os: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Value>,
    #[serde(
        rename = "serverName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub server_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<Value>,
}

/// Outcome of a start, stop or restart request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PowerActionResult {
    /// Panel confirmation (`done.msg`), absent when the panel did not confirm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpsid: Option<Value>,
}

/// Memory usage of a server (`act=ram`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RamUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpsid: Option<Value>,
}

/// CPU usage of a server (`act=cpu`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpsid: Option<Value>,
}

/// Disk usage of a server (`act=disk`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disk: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpsid: Option<Value>,
}

/// Bandwidth history of a server for one month (`act=bandwidth`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BandwidthReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_taken: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vpsid: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let result = PowerActionResult {
            message: None,
            time_taken: Some(json!("1.2")),
            vpsid: Some(json!("7")),
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "time_taken": "1.2", "vpsid": "7" }));
    }

    #[test]
    fn test_summary_uses_camel_case_server_name() {
        let summary = ServerSummary {
            id: json!("5"),
            name: None,
            hostname: json!("h"),
            os: json!("ubuntu"),
            cores: None,
            ram: None,
            space: None,
            bandwidth: None,
            server_name: Some(json!("dc1")),
            status: None,
            ip: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["serverName"], json!("dc1"));
        assert!(value.get("server_name").is_none());
    }

    #[test]
    fn test_panel_response_serializes_untagged() {
        let raw: PanelResponse<RamUsage> = PanelResponse::Raw(json!({ "vs": {} }));
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!({ "vs": {} }));

        let normalized = PanelResponse::Normalized(RamUsage {
            ram: Some(json!(512)),
            ..RamUsage::default()
        });
        assert_eq!(
            serde_json::to_value(&normalized).unwrap(),
            json!({ "ram": 512 })
        );
    }
}
