//! The topology snapshot and its resolution queries.

use std::net::IpAddr;

use topowatch_types::Context;
use tracing::debug;

use super::{Application, ApplicationId, Connection, Instance, Listen, Node, Service};

/// A point-in-time snapshot of the monitored system's topology.
///
/// Built once per evaluation cycle by the snapshot builder (the write
/// phase), then queried read-only while views are assembled. All
/// resolution queries below are bounded scans in insertion order: given a
/// frozen world they are deterministic, and when several entities could
/// match, the first one inserted wins. None of them can fail - "no match"
/// is an ordinary answer.
#[derive(Debug, Default)]
pub struct World {
    pub ctx: Context,

    pub nodes: Vec<Node>,
    pub applications: Vec<Application>,
    pub services: Vec<Service>,
}

impl World {
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            ..Default::default()
        }
    }

    /// The application with that id, if any.
    pub fn get_application(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|a| &a.id == id)
    }

    /// The application with that id, created empty and appended if absent.
    ///
    /// Idempotent: a given world never holds two applications with the
    /// same id.
    pub fn get_or_create_application(&mut self, id: ApplicationId) -> &mut Application {
        let idx = match self.applications.iter().position(|a| a.id == id) {
            Some(idx) => idx,
            None => {
                debug!(application = %id, "registering application");
                self.applications.push(Application::new(id));
                self.applications.len() - 1
            }
        };
        &mut self.applications[idx]
    }

    /// Best-effort correlation of an observed connection to a service.
    ///
    /// A service whose advertised cluster address matches what the client
    /// dialed wins over one that merely recorded the same actual endpoint;
    /// within each rule, services are scanned in insertion order and the
    /// first match wins. Multiple services may legitimately share
    /// addresses - this resolves the ambiguity by order, not by scoring.
    pub fn service_for_connection(&self, c: &Connection) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.cluster_ip == Some(c.service_remote_ip))
            .or_else(|| {
                self.services.iter().find(|s| {
                    s.connections
                        .iter()
                        .any(|sc| sc.actual_remote_ip == c.actual_remote_ip)
                })
            })
    }

    /// The first instance observed listening on (ip, port), if any.
    pub fn find_instance_by_listen(&self, ip: IpAddr, port: u16) -> Option<&Instance> {
        let listen = Listen { ip, port };
        self.applications
            .iter()
            .flat_map(|a| a.instances.iter())
            .find(|i| i.tcp_listens.contains(&listen))
    }

    /// The first pod-backed instance with that name within a namespace.
    pub fn find_instance_by_pod(&self, namespace: &str, pod_name: &str) -> Option<&Instance> {
        self.applications
            .iter()
            .filter(|a| a.id.namespace == namespace)
            .flat_map(|a| a.instances.iter())
            .find(|i| i.pod.is_some() && i.name == pod_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pod;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    fn world_with_apps() -> World {
        let mut world = World::default();

        let api = world.get_or_create_application(ApplicationId::new("default", "api"));
        let api_0 = api.get_or_create_instance("api-0");
        api_0.pod = Some(Pod::default());
        api_0.tcp_listens.insert(Listen {
            ip: ip("10.0.0.1"),
            port: 8080,
        });

        let db = world.get_or_create_application(ApplicationId::new("storage", "db"));
        let db_0 = db.get_or_create_instance("db-0");
        db_0.tcp_listens.insert(Listen {
            ip: ip("10.0.0.2"),
            port: 5432,
        });

        world
    }

    // ========================================================================
    // Application registry
    // ========================================================================

    #[test]
    fn get_or_create_application_is_idempotent() {
        let mut world = World::default();
        let id = ApplicationId::new("default", "api");

        world.get_or_create_application(id.clone());
        assert_eq!(world.applications.len(), 1);

        world.get_or_create_application(id.clone());
        assert_eq!(world.applications.len(), 1);
        assert_eq!(world.get_application(&id).unwrap().id, id);
    }

    #[test]
    fn get_or_create_preserves_existing_state() {
        let mut world = World::default();
        let id = ApplicationId::new("default", "api");

        world
            .get_or_create_application(id.clone())
            .get_or_create_instance("api-0");
        let app = world.get_or_create_application(id);
        assert_eq!(app.instances.len(), 1);
    }

    #[test]
    fn get_application_absent_is_none() {
        let world = World::default();
        assert!(world
            .get_application(&ApplicationId::new("default", "missing"))
            .is_none());
    }

    #[test]
    fn applications_append_in_insertion_order() {
        let world = world_with_apps();
        let ids: Vec<String> = world.applications.iter().map(|a| a.id.to_string()).collect();
        assert_eq!(ids, vec!["default/api", "storage/db"]);
    }

    // ========================================================================
    // Connection resolution
    // ========================================================================

    #[test]
    fn service_resolved_by_cluster_ip() {
        let mut world = World::default();
        world
            .services
            .push(Service::new("api", Some(ip("10.96.0.1"))));

        let c = Connection {
            service_remote_ip: ip("10.96.0.1"),
            actual_remote_ip: ip("10.0.0.9"),
        };
        let svc = world.service_for_connection(&c).unwrap();
        assert_eq!(svc.name, "api");
    }

    #[test]
    fn service_resolved_by_recorded_endpoint() {
        let mut world = World::default();
        let mut svc = Service::new("db", None);
        svc.connections.push(Connection {
            service_remote_ip: ip("10.96.0.2"),
            actual_remote_ip: ip("10.0.0.7"),
        });
        world.services.push(svc);

        let c = Connection {
            service_remote_ip: ip("10.96.0.99"),
            actual_remote_ip: ip("10.0.0.7"),
        };
        assert_eq!(world.service_for_connection(&c).unwrap().name, "db");
    }

    #[test]
    fn cluster_ip_match_wins_over_endpoint_match() {
        let mut world = World::default();

        // earlier service only matches by recorded endpoint
        let mut by_endpoint = Service::new("by-endpoint", None);
        by_endpoint.connections.push(Connection {
            service_remote_ip: ip("10.96.0.5"),
            actual_remote_ip: ip("10.0.0.7"),
        });
        world.services.push(by_endpoint);

        // later service matches by advertised address
        world
            .services
            .push(Service::new("by-cluster-ip", Some(ip("10.96.0.1"))));

        let c = Connection {
            service_remote_ip: ip("10.96.0.1"),
            actual_remote_ip: ip("10.0.0.7"),
        };
        assert_eq!(
            world.service_for_connection(&c).unwrap().name,
            "by-cluster-ip"
        );
    }

    #[test]
    fn tied_cluster_ips_resolve_by_insertion_order() {
        let mut world = World::default();
        world
            .services
            .push(Service::new("first", Some(ip("10.96.0.1"))));
        world
            .services
            .push(Service::new("second", Some(ip("10.96.0.1"))));

        let c = Connection {
            service_remote_ip: ip("10.96.0.1"),
            actual_remote_ip: ip("10.0.0.9"),
        };
        assert_eq!(world.service_for_connection(&c).unwrap().name, "first");
    }

    #[test]
    fn unresolvable_connection_is_none() {
        let world = World::default();
        let c = Connection {
            service_remote_ip: ip("10.96.0.1"),
            actual_remote_ip: ip("10.0.0.9"),
        };
        assert!(world.service_for_connection(&c).is_none());
    }

    // ========================================================================
    // Instance resolution
    // ========================================================================

    #[test]
    fn find_instance_by_listen_matches_owner() {
        let world = world_with_apps();
        let found = world.find_instance_by_listen(ip("10.0.0.2"), 5432).unwrap();
        assert_eq!(found.name, "db-0");
    }

    #[test]
    fn find_instance_by_listen_requires_exact_pair() {
        let world = world_with_apps();
        assert!(world.find_instance_by_listen(ip("10.0.0.2"), 5433).is_none());
        assert!(world.find_instance_by_listen(ip("10.0.0.3"), 5432).is_none());
    }

    #[test]
    fn find_instance_by_pod_restricts_to_namespace() {
        let world = world_with_apps();

        let found = world.find_instance_by_pod("default", "api-0").unwrap();
        assert_eq!(found.name, "api-0");

        // right name, wrong namespace
        assert!(world.find_instance_by_pod("storage", "api-0").is_none());
    }

    #[test]
    fn find_instance_by_pod_skips_podless_instances() {
        let world = world_with_apps();
        // db-0 exists but has no pod reference
        assert!(world.find_instance_by_pod("storage", "db-0").is_none());
    }
}
