//! Applications and their running instances.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

use super::Pod;

/// Identity of a monitored workload group: (namespace, name).
///
/// Unique within one [`World`](super::World); the only identity that
/// survives across evaluation cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApplicationId {
    pub namespace: String,
    pub name: String,
}

impl ApplicationId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// An (ip, port) pair an instance is observed listening on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Listen {
    pub ip: IpAddr,
    pub port: u16,
}

/// One running instance of an application.
#[derive(Debug, Clone, Default)]
pub struct Instance {
    pub name: String,
    /// Workload-instance status, when the instance is pod-backed.
    pub pod: Option<Pod>,
    /// Sockets the instance is observed listening on.
    pub tcp_listens: HashSet<Listen>,
}

impl Instance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A monitored workload group and its instances.
///
/// Instances are keyed by name; [`get_or_create_instance`] keeps the
/// keying idempotent while the backing order stays insertion order, which
/// the resolution queries scan deterministically.
///
/// [`get_or_create_instance`]: Application::get_or_create_instance
#[derive(Debug, Clone)]
pub struct Application {
    pub id: ApplicationId,
    pub instances: Vec<Instance>,
}

impl Application {
    pub fn new(id: ApplicationId) -> Self {
        Self {
            id,
            instances: Vec::new(),
        }
    }

    /// The instance with that name, if any.
    pub fn get_instance(&self, name: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.name == name)
    }

    /// The instance with that name, created empty and appended if absent.
    pub fn get_or_create_instance(&mut self, name: &str) -> &mut Instance {
        let idx = match self.instances.iter().position(|i| i.name == name) {
            Some(idx) => idx,
            None => {
                self.instances.push(Instance::new(name));
                self.instances.len() - 1
            }
        };
        &mut self.instances[idx]
    }
}
