//! Resource-scoped accessors.
//!
//! Each method is a single pass-through to [`crate::Client::request`] with a
//! fixed path; no validation or transformation happens here.

mod acme;
mod backup;
mod cluster;
mod node;

pub use acme::Acme;
pub use backup::Backup;
pub use cluster::Cluster;
pub use node::Node;
