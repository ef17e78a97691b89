//! The series capability set and a reference in-memory implementation.

use std::fmt::Debug;
use std::sync::Arc;

/// A shared, non-owning handle to an externally-owned series.
///
/// Charts and reports clone these handles freely; the storage they point
/// at stays valid for as long as any handle does.
pub type SeriesRef = Arc<dyn TimeSeries + Send + Sync>;

/// Capabilities a sampled series must provide.
///
/// Samples are grid-aligned values in time order; a gap in the grid is
/// `f64::NAN`. Implementations over remote or compressed storage may
/// materialize values lazily - consumers only ever iterate.
pub trait TimeSeries: Debug {
    /// True when the series has no sampled (non-gap) points.
    fn is_empty(&self) -> bool;

    /// The last sampled value, or `None` when the series has no samples.
    fn last(&self) -> Option<f64>;

    /// Grid-aligned samples in time order; gaps are `f64::NAN`.
    fn values(&self) -> Box<dyn Iterator<Item = f64> + '_>;
}

/// An in-memory series aligned to a sampling grid.
///
/// The reference implementation of [`TimeSeries`], used by snapshot
/// builders and tests. Gaps are stored as `f64::NAN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSeries {
    values: Vec<f64>,
}

impl MetricSeries {
    /// Create from grid-aligned samples.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Append one sample to the end of the grid.
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Number of grid points, gaps included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Wrap into a shared [`SeriesRef`] handle.
    pub fn into_ref(self) -> SeriesRef {
        Arc::new(self)
    }
}

impl TimeSeries for MetricSeries {
    fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_nan())
    }

    fn last(&self) -> Option<f64> {
        self.values.iter().rev().find(|v| !v.is_nan()).copied()
    }

    fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        Box::new(self.values.iter().copied())
    }
}

impl FromIterator<f64> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// A (name, series) pairing for bulk registration.
///
/// Display layers take sequences of these when one call adds many
/// series at once.
#[derive(Debug, Clone)]
pub struct Named {
    pub name: String,
    pub series: SeriesRef,
}

impl Named {
    /// Pair a name with a series handle.
    pub fn new(name: impl Into<String>, series: SeriesRef) -> Self {
        Self {
            name: name.into(),
            series,
        }
    }
}
