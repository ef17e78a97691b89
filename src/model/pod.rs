//! Pod status records and their phase classification.

use std::collections::BTreeMap;

use topowatch_types::SeriesRef;

/// Lifecycle state of a pod as last observed.
///
/// `Obsolete` is an explicit "unknown or deleted" state, distinct from
/// every phase a live pod can report: the collector either stopped seeing
/// the pod or sent something unparseable. Defaulting to it means a record
/// built from bad input classifies as stale instead of running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PodPhase {
    /// Unknown or deleted; no live phase is being reported.
    #[default]
    Obsolete,
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl PodPhase {
    /// Classify a collector-reported phase string.
    ///
    /// Anything unrecognized, including the empty string, is `Obsolete`.
    pub fn parse(phase: &str) -> Self {
        match phase {
            "Pending" => Self::Pending,
            "Running" => Self::Running,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            _ => Self::Obsolete,
        }
    }
}

/// A container within a pod.
#[derive(Debug, Clone, Default)]
pub struct Container {
    pub name: String,
    /// Cumulative restart counter, when collected.
    pub restarts: Option<SeriesRef>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Workload-instance status as last reported by the collector.
///
/// The series fields point into externally-owned metric storage and may
/// each be absent independently; every classifier below treats absence as
/// a normal "don't know" answer, never an error.
#[derive(Debug, Clone, Default)]
pub struct Pod {
    pub phase: PodPhase,
    /// Human-readable reason accompanying the phase, e.g. "Evicted".
    pub reason: String,
    pub scheduled: bool,

    pub running: Option<SeriesRef>,
    pub ready: Option<SeriesRef>,
    pub life_span: Option<SeriesRef>,

    pub replica_set: String,

    pub init_containers: BTreeMap<String, Container>,
}

impl Pod {
    pub fn is_running(&self) -> bool {
        self.phase == PodPhase::Running
    }

    pub fn is_pending(&self) -> bool {
        self.phase == PodPhase::Pending
    }

    pub fn is_obsolete(&self) -> bool {
        self.phase == PodPhase::Obsolete
    }

    /// True when a readiness series is present and its last sampled value
    /// is positive. No series means "not ready", not an error.
    pub fn is_ready(&self) -> bool {
        self.ready
            .as_ref()
            .and_then(|s| s.last())
            .map_or(false, |v| v > 0.0)
    }
}
