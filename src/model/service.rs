//! Services and the connections observed against them.

use std::net::IpAddr;

/// An observed connection, as seen by the collector on a client host.
///
/// `service_remote_ip` is the address the client dialed (often a virtual
/// service address); `actual_remote_ip` is the endpoint the traffic
/// really reached after any translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub service_remote_ip: IpAddr,
    pub actual_remote_ip: IpAddr,
}

/// A cluster service and the connections recorded against it.
#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    /// Advertised virtual address; headless services have none.
    pub cluster_ip: Option<IpAddr>,
    pub connections: Vec<Connection>,
}

impl Service {
    pub fn new(name: impl Into<String>, cluster_ip: Option<IpAddr>) -> Self {
        Self {
            name: name.into(),
            cluster_ip,
            connections: Vec::new(),
        }
    }
}
