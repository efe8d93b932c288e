//! virtualizor-client: Virtualizor end-user API client
//!
//! Maps one async method to each panel action and reshapes the JSON the
//! panel returns, either into the records of [`virtualizor_api`] or, in raw
//! mode, not at all.
//!
//! # Example
//!
//! ```no_run
//! use virtualizor_client::{ClientConfig, PanelClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PanelClient::new(ClientConfig::new(
//!     "https://panel.example.com:4083",
//!     "api-key",
//!     "api-pass",
//! ));
//!
//! // Normalized details
//! if let Some(details) = client.get_server_details(101).await?.normalized() {
//!     println!("{:?} runs {:?}", details.hostname, details.os);
//! }
//!
//! // Power actions
//! let result = client.restart_server(101).await?;
//! println!("{:?}", result.message);
//!
//! // Bandwidth for a month
//! let usage = client.get_bandwidth(101, 3).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod transport;

pub use client::{Action, PanelClient};
pub use config::{ClientConfig, ListRawPolicy};
pub use error::{ClientError, Result};
pub use transport::{Method, PanelRequest, ReqwestTransport, Transport};
pub use virtualizor_api::PanelResponse;
