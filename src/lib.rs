//! Minimal synchronous client for the Proxmox VE REST API.
//!
//! The client authenticates against a node at construction, keeps the
//! session ticket fresh by renewing it shortly before expiry, and exposes
//! resource-scoped accessors that return parsed JSON payloads.
//!
//! ```no_run
//! use proxmox_client::{Client, ClientConfig};
//!
//! # fn main() -> proxmox_client::Result<()> {
//! let config = ClientConfig::new("https://pve.example:8006", "root", "secret");
//! let client = Client::connect(config)?;
//! let nodes = client.cluster().nodes()?;
//! let status = client.node("pve1").status()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod resources;
pub mod session;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use params::{ParamValue, Params};
pub use resources::{Acme, Backup, Cluster, Node};
pub use transport::{Method, Transport};
