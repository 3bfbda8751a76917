use crate::client::Client;
use crate::error::Result;
use serde_json::Value;

/// ACME (certificate) endpoints of the cluster.
pub struct Acme<'a> {
    client: &'a Client,
}

impl<'a> Acme<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Terms-of-service URL of the configured ACME directory.
    pub fn tos(&self) -> Result<Value> {
        self.client.get("/cluster/acme/tos")
    }
}
