//! virtualizor-api: Shared response types
//!
//! Normalized shapes produced by the panel client out of Virtualizor
//! end-user API responses, shared between the client library and the CLI.

pub mod responses;

pub use responses::{
    BandwidthReport, BandwidthUsage, CpuUsage, DiskUsage, PanelResponse, PowerActionResult,
    RamUsage, ServerDetails, ServerSummary,
};
