//! Report composition over a frozen topology snapshot.
//!
//! This is the read phase of the snapshot lifecycle: an [`Auditor`]
//! borrows a fully-built [`World`], correlates what it finds, and
//! assembles chart groups for display. Reports are transient - built per
//! rendering request, serialized, and discarded.

mod config;

pub use config::AuditConfig;

use serde::Serialize;
use topowatch_types::{nan_sum, Named};
use tracing::debug;

use crate::charts::ChartGroup;
use crate::model::{Application, World};

/// A display-ready bundle of chart groups.
#[derive(Debug, Serialize)]
pub struct Report {
    pub groups: Vec<ChartGroup>,
}

/// Composes display reports from a frozen world.
pub struct Auditor<'a> {
    world: &'a World,
    config: AuditConfig,
}

impl<'a> Auditor<'a> {
    pub fn new(world: &'a World) -> Self {
        Self::with_config(world, AuditConfig::default())
    }

    pub fn with_config(world: &'a World, config: AuditConfig) -> Self {
        Self { world, config }
    }

    /// Assemble the full report: one group per application, plus a nodes
    /// group when the snapshot carries any hosts.
    pub fn audit(&self) -> Report {
        let mut groups: Vec<ChartGroup> = self
            .world
            .applications
            .iter()
            .map(|app| self.application_group(app))
            .collect();
        if !self.world.nodes.is_empty() {
            groups.push(self.nodes_group());
        }
        debug!(groups = groups.len(), "composed report");
        Report { groups }
    }

    /// Instance status charts for one application.
    fn application_group(&self, app: &Application) -> ChartGroup {
        let ctx = self.world.ctx;
        let mut group = ChartGroup::new(app.id.to_string());

        let lifespans: Vec<Named> = app
            .instances
            .iter()
            .filter_map(|i| {
                let pod = i.pod.as_ref()?;
                Some(Named::new(i.name.clone(), pod.life_span.clone()?))
            })
            .collect();
        group
            .get_or_create_chart(ctx, "Pod lifespan")
            .add_many(lifespans);

        {
            let readiness = group.get_or_create_chart(ctx, "Pod readiness");
            for instance in &app.instances {
                let Some(pod) = instance.pod.as_ref() else {
                    continue;
                };
                readiness.add_series(instance.name.clone(), pod.ready.clone());
                if pod.is_running() && !pod.is_ready() {
                    readiness.add_annotation(
                        format!("{} is not ready", instance.name),
                        ctx.to,
                        ctx.to,
                        &self.config.warning_icon,
                    );
                }
            }
        }

        {
            let restarts = group.get_or_create_chart(ctx, "Init container restarts");
            restarts.column();
            for instance in &app.instances {
                let Some(pod) = instance.pod.as_ref() else {
                    continue;
                };
                for container in pod.init_containers.values() {
                    restarts.add_series(
                        format!("{}/{}", instance.name, container.name),
                        container.restarts.clone(),
                    );
                }
            }
        }

        if self.config.auto_feature {
            group.auto_feature_chart();
        }
        group
    }

    /// Host utilization charts, usage against aggregate capacity.
    fn nodes_group(&self) -> ChartGroup {
        let ctx = self.world.ctx;
        let mut group = ChartGroup::new("Nodes");

        {
            let cpu = group.get_or_create_chart(ctx, "CPU usage");
            cpu.stacked();
            for node in &self.world.nodes {
                cpu.add_series(node.name.clone(), node.cpu_usage.clone());
                cpu.set_threshold("capacity", node.cpu_capacity.clone(), nan_sum);
            }
        }

        {
            let memory = group.get_or_create_chart(ctx, "Memory usage");
            memory.stacked();
            for node in &self.world.nodes {
                memory.add_series(node.name.clone(), node.memory_usage.clone());
            }
        }

        if self.config.auto_feature {
            group.auto_feature_chart();
        }
        group
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicationId, Container, Node, Pod, PodPhase};
    use topowatch_types::{Context, MetricSeries, SeriesRef, Time};

    fn series(values: Vec<f64>) -> Option<SeriesRef> {
        Some(MetricSeries::new(values).into_ref())
    }

    fn sample_world() -> World {
        let mut world = World::new(Context::new(Time::from_secs(0), Time::from_secs(60), 15));

        let app = world.get_or_create_application(ApplicationId::new("default", "api"));

        let healthy = app.get_or_create_instance("api-0");
        healthy.pod = Some(Pod {
            phase: PodPhase::Running,
            ready: series(vec![1.0, 1.0]),
            life_span: series(vec![100.0, 100.0]),
            ..Default::default()
        });

        let unready = app.get_or_create_instance("api-1");
        let mut pod = Pod {
            phase: PodPhase::Running,
            ready: series(vec![1.0, 0.0]),
            life_span: series(vec![5.0, 5.0]),
            ..Default::default()
        };
        pod.init_containers.insert(
            "migrate".to_string(),
            Container {
                name: "migrate".to_string(),
                restarts: series(vec![0.0, 2.0]),
            },
        );
        unready.pod = Some(pod);

        let mut node = Node::new("node-a");
        node.cpu_usage = series(vec![2.0, 3.0]);
        node.cpu_capacity = series(vec![8.0, 8.0]);
        node.memory_usage = series(vec![0.5, 0.5]);
        world.nodes.push(node);

        world
    }

    #[test]
    fn report_covers_applications_and_nodes() {
        let world = sample_world();
        let report = Auditor::new(&world).audit();

        let titles: Vec<&str> = report.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["default/api", "Nodes"]);
    }

    #[test]
    fn application_group_charts_pod_series() {
        let world = sample_world();
        let report = Auditor::new(&world).audit();
        let group = &report.groups[0];

        let lifespan = group.charts.iter().find(|c| c.title == "Pod lifespan").unwrap();
        assert_eq!(lifespan.series.len(), 2);

        let restarts = group
            .charts
            .iter()
            .find(|c| c.title == "Init container restarts")
            .unwrap();
        assert!(restarts.is_column);
        assert_eq!(restarts.series.len(), 1);
        assert_eq!(restarts.series[0].name, "api-1/migrate");
    }

    #[test]
    fn running_but_unready_pod_is_annotated() {
        let world = sample_world();
        let report = Auditor::new(&world).audit();

        let readiness = report.groups[0]
            .charts
            .iter()
            .find(|c| c.title == "Pod readiness")
            .unwrap();
        assert_eq!(readiness.annotations.len(), 1);
        assert_eq!(readiness.annotations[0].name, "api-1 is not ready");
        assert_eq!(readiness.annotations[0].icon, "warning");
    }

    #[test]
    fn lifespan_leader_is_auto_featured() {
        let world = sample_world();
        let report = Auditor::new(&world).audit();

        // lifespan weight 210 dwarfs readiness 3 and restarts 2
        let featured: Vec<&str> = report.groups[0]
            .charts
            .iter()
            .filter(|c| c.featured)
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(featured, vec!["Pod lifespan"]);
    }

    #[test]
    fn node_capacity_feeds_the_threshold() {
        let world = sample_world();
        let report = Auditor::new(&world).audit();

        let nodes = report.groups.iter().find(|g| g.title == "Nodes").unwrap();
        let cpu = nodes.charts.iter().find(|c| c.title == "CPU usage").unwrap();
        assert!(cpu.is_stacked);
        let threshold = cpu.threshold.as_ref().unwrap();
        assert_eq!(threshold.name(), "capacity");
        assert_eq!(threshold.input_count(), 1);
    }

    #[test]
    fn auto_feature_can_be_disabled() {
        let world = sample_world();
        let config = AuditConfig {
            auto_feature: false,
            ..Default::default()
        };
        let report = Auditor::with_config(&world, config).audit();
        assert!(report
            .groups
            .iter()
            .flat_map(|g| g.charts.iter())
            .all(|c| !c.featured));
    }

    #[test]
    fn podless_world_still_reports() {
        let mut world = World::default();
        world.get_or_create_application(ApplicationId::new("default", "bare"));
        let report = Auditor::new(&world).audit();

        assert_eq!(report.groups.len(), 1);
        assert!(report.groups[0].charts.iter().all(|c| c.series.is_empty()));
    }
}
