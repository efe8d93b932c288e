//! Panel client

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;

use virtualizor_api::{
    BandwidthReport, CpuUsage, DiskUsage, PanelResponse, PowerActionResult, RamUsage,
    ServerDetails, ServerSummary,
};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::mapping::{self, ResponseMode};
use crate::transport::{Method, PanelRequest, ReqwestTransport, Transport};

/// Remote action selected by the `act` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    VpsManage,
    ListVs,
    Start,
    Stop,
    Restart,
    Ram,
    Cpu,
    Disk,
    Bandwidth,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Action::VpsManage => "vpsmanage",
            Action::ListVs => "listvs",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
            Action::Ram => "ram",
            Action::Cpu => "cpu",
            Action::Disk => "disk",
            Action::Bandwidth => "bandwidth",
        }
    }

    fn is_power(self) -> bool {
        matches!(self, Action::Start | Action::Stop | Action::Restart)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client for the Virtualizor end-user API
///
/// Cloning is cheap; clones share the configuration and the transport.
#[derive(Clone)]
pub struct PanelClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    mode: ResponseMode,
}

impl PanelClient {
    /// Create a client that talks to the panel through `reqwest`
    ///
    /// # Example
    /// ```no_run
    /// use virtualizor_client::{ClientConfig, PanelClient};
    ///
    /// let client = PanelClient::new(ClientConfig::new(
    ///     "https://panel.example.com:4083",
    ///     "key",
    ///     "secret",
    /// ));
    /// ```
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, ReqwestTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            mode: ResponseMode::from_raw_flag(config.raw),
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    /// The configuration this client was built with
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}/index.php", self.config.api))?)
    }

    /// Assemble the request for `action`
    ///
    /// # Errors
    /// Returns an error if the configured base URL does not parse.
    pub fn request(
        &self,
        action: Action,
        server_id: Option<String>,
        form: Option<String>,
    ) -> Result<PanelRequest> {
        let mut query = vec![("act", action.as_str().to_string())];
        if action.is_power() {
            query.push(("do", "1".to_string()));
        }
        query.push(("api", "json".to_string()));
        query.push(("apikey", self.config.key.clone()));
        query.push(("apipass", self.config.secret.clone()));
        if let Some(svs) = server_id {
            query.push(("svs", svs));
        }

        Ok(PanelRequest {
            method: if form.is_some() {
                Method::Post
            } else {
                Method::Get
            },
            url: self.endpoint()?,
            query,
            form,
        })
    }

    async fn call(
        &self,
        action: Action,
        server_id: Option<String>,
        form: Option<String>,
    ) -> Result<Value> {
        let request = self.request(action, server_id, form)?;
        tracing::debug!(act = %action, method = ?request.method, "sending panel request");
        self.transport.send(request).await
    }

    /// Get the details of one server (`act=vpsmanage`)
    ///
    /// # Errors
    /// Returns an error if the request fails, or in normalized mode if the
    /// response lacks `info`, `info.vps` or `info.bandwidth`.
    pub async fn get_server_details(
        &self,
        server_id: impl fmt::Display,
    ) -> Result<PanelResponse<ServerDetails>> {
        let body = self
            .call(Action::VpsManage, Some(server_id.to_string()), None)
            .await?;
        self.mode.apply(body, mapping::server_details)
    }

    /// List the servers of the account (`act=listvs`)
    ///
    /// Entries missing `vpsid`, `hostname` or `os_name` are skipped.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn list_servers(&self) -> Result<PanelResponse<Vec<ServerSummary>>> {
        let body = self.call(Action::ListVs, None, None).await?;
        Ok(mapping::server_listing(body, self.mode, self.config.list_raw))
    }

    async fn power(&self, action: Action, server_id: String) -> Result<PowerActionResult> {
        let body = self.call(action, Some(server_id), None).await?;
        Ok(mapping::power_action(&body))
    }

    /// Boot a server
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn start_server(&self, server_id: impl fmt::Display) -> Result<PowerActionResult> {
        self.power(Action::Start, server_id.to_string()).await
    }

    /// Shut a server down
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn stop_server(&self, server_id: impl fmt::Display) -> Result<PowerActionResult> {
        self.power(Action::Stop, server_id.to_string()).await
    }

    /// Reboot a server
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn restart_server(&self, server_id: impl fmt::Display) -> Result<PowerActionResult> {
        self.power(Action::Restart, server_id.to_string()).await
    }

    /// Memory usage of a server
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_ram(&self, server_id: impl fmt::Display) -> Result<RamUsage> {
        let body = self.call(Action::Ram, Some(server_id.to_string()), None).await?;
        Ok(mapping::ram_usage(&body))
    }

    /// CPU usage of a server
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_cpu(&self, server_id: impl fmt::Display) -> Result<CpuUsage> {
        let body = self.call(Action::Cpu, Some(server_id.to_string()), None).await?;
        Ok(mapping::cpu_usage(&body))
    }

    /// Disk usage of a server
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_disk(&self, server_id: impl fmt::Display) -> Result<DiskUsage> {
        let body = self.call(Action::Disk, Some(server_id.to_string()), None).await?;
        Ok(mapping::disk_usage(&body))
    }

    /// Bandwidth usage of a server for `month`
    ///
    /// `month` is sent as the `show` form field as given; the panel defines
    /// its format.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn get_bandwidth(
        &self,
        server_id: impl fmt::Display,
        month: impl fmt::Display,
    ) -> Result<BandwidthReport> {
        let form = format!("show={month}");
        let body = self
            .call(Action::Bandwidth, Some(server_id.to_string()), Some(form))
            .await?;
        Ok(mapping::bandwidth_report(&body))
    }
}

impl fmt::Debug for PanelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelClient")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
