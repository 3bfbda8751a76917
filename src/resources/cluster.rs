use super::{Acme, Backup};
use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

/// Cluster-wide API calls.
pub struct Cluster<'a> {
    client: &'a Client,
}

impl<'a> Cluster<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all nodes in the cluster.
    pub fn nodes(&self) -> Result<Value> {
        self.client.get("/nodes")
    }

    /// ACME (certificate) endpoints of this cluster.
    pub fn acme(&self) -> Acme<'a> {
        Acme::new(self.client)
    }

    /// Backup job endpoints of this cluster.
    pub fn backup(&self) -> Backup<'a> {
        Backup::new(self.client)
    }
}
