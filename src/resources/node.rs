use crate::client::Client;
use crate::error::Result;
use crate::params::Params;
use serde_json::Value;

/// API calls scoped to one named node.
pub struct Node<'a> {
    client: &'a Client,
    node: String,
}

impl<'a> Node<'a> {
    pub(crate) fn new(client: &'a Client, node: impl Into<String>) -> Self {
        Self {
            client,
            node: node.into(),
        }
    }

    /// Status of this node.
    pub fn status(&self) -> Result<Value> {
        self.client.get(&format!("/nodes/{}/status", self.node))
    }

    /// Pending package updates on this node.
    pub fn updates(&self) -> Result<Value> {
        self.client.get(&format!("/nodes/{}/apt/update", self.node))
    }

    /// Create a QEMU virtual machine on this node.
    pub fn create_vm(&self, params: &Params) -> Result<Value> {
        self.client
            .post(&format!("/nodes/{}/qemu", self.node), params)
    }
}
