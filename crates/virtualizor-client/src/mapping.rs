//! Pure mappings from panel bodies to normalized records
//!
//! Every operation owns one function here. The client picks between the
//! mapping and the untouched body once per call through [`ResponseMode`].

use serde_json::{Map, Value};
use virtualizor_api::{
    BandwidthReport, BandwidthUsage, CpuUsage, DiskUsage, PanelResponse, PowerActionResult,
    RamUsage, ServerDetails, ServerSummary,
};

use crate::config::ListRawPolicy;
use crate::error::{ClientError, Result};

/// Post-processing applied to every body that has a raw branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Raw,
    Normalized,
}

impl ResponseMode {
    #[must_use]
    pub fn from_raw_flag(raw: bool) -> Self {
        if raw {
            ResponseMode::Raw
        } else {
            ResponseMode::Normalized
        }
    }

    /// Shape a decoded body with `normalize`, or hand it back untouched
    ///
    /// # Errors
    /// Returns the error of `normalize` in normalized mode.
    pub fn apply<T>(
        self,
        body: Value,
        normalize: impl FnOnce(&Value) -> Result<T>,
    ) -> Result<PanelResponse<T>> {
        match self {
            ResponseMode::Raw => Ok(PanelResponse::Raw(body)),
            ResponseMode::Normalized => normalize(&body).map(PanelResponse::Normalized),
        }
    }
}

/// Truthiness as the panel's own tooling reads its fields
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn object<'a>(
    parent: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>> {
    parent
        .get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ClientError::MissingField(path.to_string()))
}

fn field(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).cloned()
}

/// `act=vpsmanage`
///
/// # Errors
/// Returns [`ClientError::MissingField`] when `info`, `info.vps` or
/// `info.bandwidth` is not an object.
pub fn server_details(body: &Value) -> Result<ServerDetails> {
    let info = body
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| ClientError::MissingField("info".to_string()))?;
    let vps = object(info, "vps", "info.vps")?;
    let bandwidth = object(info, "bandwidth", "info.bandwidth")?;

    Ok(ServerDetails {
        ip: field(info, "ip"),
        hostname: field(info, "hostname"),
        status: field(info, "status"),
        os: field(vps, "os_name"),
        cores: field(vps, "cores"),
        ram: field(vps, "ram"),
        space: field(vps, "space"),
        bandwidth: BandwidthUsage {
            limit: field(bandwidth, "limit"),
            used: field(bandwidth, "used"),
            free: field(bandwidth, "free"),
        },
        datacenter: field(info, "server_name"),
    })
}

/// Canonical array index form of a key: `"3"` but not `"03"`, `"-1"` or
/// `"4294967295"`
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

/// Records of a `vs` map in property enumeration order: array index keys
/// ascending, then the other keys in insertion order
fn ordered_records(map: &Map<String, Value>) -> Vec<&Value> {
    let mut indexed: Vec<(u32, &Value)> = Vec::new();
    let mut named: Vec<&Value> = Vec::new();
    for (key, record) in map {
        match array_index(key) {
            Some(index) => indexed.push((index, record)),
            None => named.push(record),
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed
        .into_iter()
        .map(|(_, record)| record)
        .chain(named)
        .collect()
}

/// Complete entries of the `vs` collection, numeric ids first in ascending
/// order, plus the number of entries dropped for lacking `vpsid`,
/// `hostname` or `os_name`
///
/// Returns `None` when the body has no usable `vs` field.
#[must_use]
pub fn server_summaries(body: &Value) -> Option<(Vec<ServerSummary>, usize)> {
    let vs = body.get("vs").filter(|vs| is_truthy(vs))?;
    let records: Vec<&Value> = match vs {
        Value::Object(map) => ordered_records(map),
        Value::Array(items) => items.iter().collect(),
        _ => Vec::new(),
    };

    let total = records.len();
    let servers: Vec<ServerSummary> = records.into_iter().filter_map(server_summary).collect();
    let dropped = total - servers.len();
    Some((servers, dropped))
}

fn server_summary(record: &Value) -> Option<ServerSummary> {
    let record = record.as_object()?;
    let required = |key: &str| record.get(key).filter(|value| is_truthy(value)).cloned();

    Some(ServerSummary {
        id: required("vpsid")?,
        hostname: required("hostname")?,
        os: required("os_name")?,
        name: field(record, "vps_name"),
        cores: field(record, "cores"),
        ram: field(record, "ram"),
        space: field(record, "space"),
        bandwidth: field(record, "bandwidth"),
        server_name: field(record, "server_name"),
        status: field(record, "status"),
        ip: field(record, "ips"),
    })
}

/// `act=listvs`
///
/// Raw mode only short-circuits under [`ListRawPolicy::Passthrough`] or when
/// `vs` is missing. Without `vs` the normalized result is an empty list.
#[must_use]
pub fn server_listing(
    body: Value,
    mode: ResponseMode,
    policy: ListRawPolicy,
) -> PanelResponse<Vec<ServerSummary>> {
    if mode == ResponseMode::Raw && policy == ListRawPolicy::Passthrough {
        return PanelResponse::Raw(body);
    }

    match server_summaries(&body) {
        Some((servers, dropped)) => {
            if dropped > 0 {
                tracing::debug!(dropped, kept = servers.len(), "dropped incomplete server entries");
            }
            PanelResponse::Normalized(servers)
        }
        None if mode == ResponseMode::Raw => PanelResponse::Raw(body),
        None => {
            tracing::debug!("server list response has no vs field");
            PanelResponse::Normalized(Vec::new())
        }
    }
}

/// `act=start|stop|restart`; never fails on a missing `done`
#[must_use]
pub fn power_action(body: &Value) -> PowerActionResult {
    PowerActionResult {
        message: body
            .get("done")
            .and_then(Value::as_object)
            .and_then(|done| field(done, "msg")),
        time_taken: body.get("time_taken").cloned(),
        vpsid: body.get("vpsid").cloned(),
    }
}

#[must_use]
pub fn ram_usage(body: &Value) -> RamUsage {
    RamUsage {
        ram: body.get("ram").cloned(),
        time_taken: body.get("time_taken").cloned(),
        vpsid: body.get("vpsid").cloned(),
    }
}

#[must_use]
pub fn cpu_usage(body: &Value) -> CpuUsage {
    CpuUsage {
        cpu: body.get("cpu").cloned(),
        time_taken: body.get("time_taken").cloned(),
        vpsid: body.get("vpsid").cloned(),
    }
}

#[must_use]
pub fn disk_usage(body: &Value) -> DiskUsage {
    DiskUsage {
        disk: body.get("disk").cloned(),
        time_taken: body.get("time_taken").cloned(),
        vpsid: body.get("vpsid").cloned(),
    }
}

#[must_use]
pub fn bandwidth_report(body: &Value) -> BandwidthReport {
    BandwidthReport {
        bandwidth: body.get("bandwidth").cloned(),
        time_taken: body.get("time_taken").cloned(),
        vpsid: body.get("vpsid").cloned(),
    }
}
