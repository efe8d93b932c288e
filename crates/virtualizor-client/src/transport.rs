//! Transport seam between the client and the network

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, Result};

/// HTTP method of a panel request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully assembled panel request
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRequest {
    pub method: Method,
    /// `{api}/index.php`, without query
    pub url: Url,
    /// Query pairs in the order they are sent
    pub query: Vec<(&'static str, String)>,
    /// urlencoded form body, POST only
    pub form: Option<String>,
}

impl PanelRequest {
    /// Look up a query parameter by name
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Performs a panel request and decodes the JSON body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PanelRequest) -> Result<Value>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default `reqwest::Client`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport with a custom `reqwest::Client`
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: PanelRequest) -> Result<Value> {
        let mut url = request.url;
        url.query_pairs_mut().extend_pairs(&request.query);

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        if let Some(form) = request.form {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(form);
        }

        // reqwest errors carry the request URL, which holds apikey and apipass
        let response = builder.send().await.map_err(reqwest::Error::without_url)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        Ok(response
            .json::<Value>()
            .await
            .map_err(reqwest::Error::without_url)?)
    }
}
