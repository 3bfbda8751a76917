use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

/// Backup job endpoints of the cluster.
pub struct Backup<'a> {
    client: &'a Client,
}

impl<'a> Backup<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all backup jobs.
    pub fn all(&self) -> Result<Value> {
        self.client.get("/cluster/backup")
    }
}
