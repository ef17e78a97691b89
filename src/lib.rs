//! # topowatch
//!
//! Topology snapshots and metric chart composition for infrastructure
//! observability.
//!
//! This crate maintains a point-in-time picture of a monitored system -
//! hosts, applications and their instances, services and observed
//! connections, pods - and composes time-indexed metric charts over it,
//! grouped for display with a default highlight picked per group.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Evaluation cycle                        │
//! │  ┌─────────┐     ┌─────────┐     ┌─────────┐    ┌─────────┐  │
//! │  │ builder │────▶│  model  │────▶│  audit  │───▶│ charts  │  │
//! │  │ (write) │     │ (World) │     │ (read)  │    │ (wire)  │  │
//! │  └─────────┘     └────┬────┘     └─────────┘    └─────────┘  │
//! │                       │                                      │
//! │                       ▼                                      │
//! │                  ┌─────────┐                                 │
//! │                  │  feed   │◀── publish / subscribe          │
//! │                  └─────────┘                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`model`]**: the topology snapshot ([`World`]) with its
//!   entity-resolution queries and pod status classification
//! - **[`charts`]**: transient chart/group composition with the
//!   auto-highlight heuristic and the fixed wire shape
//! - **[`audit`]**: report composition - queries a frozen world and
//!   assembles chart groups per rendering request
//! - **[`feed`]**: watch-channel handoff from the single writer of a
//!   cycle to any number of readers
//!
//! Metric series themselves live in external storage; everything here
//! holds [`topowatch_types::SeriesRef`] handles and consumes the contract
//! defined in `topowatch-types`.
//!
//! ## Example
//!
//! ```
//! use topowatch::{ApplicationId, Auditor, World};
//! use topowatch::model::{Pod, PodPhase};
//! use topowatch_types::{Context, MetricSeries, Time};
//!
//! // write phase: the snapshot builder populates a fresh world
//! let mut world = World::new(Context::new(Time::from_secs(0), Time::from_secs(60), 15));
//! let app = world.get_or_create_application(ApplicationId::new("default", "api"));
//! app.get_or_create_instance("api-0").pod = Some(Pod {
//!     phase: PodPhase::Running,
//!     life_span: Some(MetricSeries::new(vec![300.0, 300.0, 300.0]).into_ref()),
//!     ..Default::default()
//! });
//!
//! // read phase: compose and serialize a report
//! let report = Auditor::new(&world).audit();
//! let json = serde_json::to_string(&report).unwrap();
//! assert!(json.contains("\"default/api\""));
//! ```

pub mod audit;
pub mod charts;
pub mod feed;
pub mod model;

// Re-export main types for convenience
pub use audit::{AuditConfig, Auditor, Report};
pub use charts::{Annotation, Chart, ChartGroup, Series};
pub use feed::{WorldFeed, WorldHandle};
pub use model::{
    Application, ApplicationId, Connection, Container, Instance, Listen, Node, Pod, PodPhase,
    Service, World,
};
