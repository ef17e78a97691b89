//! Host-level records.

use topowatch_types::SeriesRef;

/// A host in the monitored system.
///
/// Utilization series point into externally-owned metric storage; capacity
/// feeds chart thresholds in the audit layer.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub name: String,
    pub cpu_usage: Option<SeriesRef>,
    pub cpu_capacity: Option<SeriesRef>,
    pub memory_usage: Option<SeriesRef>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
