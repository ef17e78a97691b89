//! Lazy multi-input series combination.

use crate::{AccumulateFn, SeriesRef, TimeSeries};

/// A series computed on demand by combining registered inputs.
///
/// Inputs are registered incrementally with [`add_input`]; nothing is
/// computed until the series is read, at which point all inputs are
/// combined per timestamp with the supplied accumulator. The grid length
/// is the longest input's; shorter inputs simply stop contributing.
///
/// # Example
///
/// ```
/// use topowatch_types::{nan_sum, AggregateSeries, MetricSeries, TimeSeries};
///
/// let mut total = AggregateSeries::new(nan_sum);
/// total.add_input(MetricSeries::new(vec![1.0, 2.0]).into_ref());
/// total.add_input(MetricSeries::new(vec![10.0, 20.0]).into_ref());
/// let combined: Vec<f64> = total.values().collect();
/// assert_eq!(combined, vec![11.0, 22.0]);
/// ```
///
/// [`add_input`]: AggregateSeries::add_input
#[derive(Debug)]
pub struct AggregateSeries {
    combine: AccumulateFn,
    inputs: Vec<SeriesRef>,
}

impl AggregateSeries {
    /// Create an empty combinator around a per-timestamp accumulator.
    pub fn new(combine: AccumulateFn) -> Self {
        Self {
            combine,
            inputs: Vec::new(),
        }
    }

    /// Register one more input series.
    pub fn add_input(&mut self, series: SeriesRef) {
        self.inputs.push(series);
    }

    /// Number of registered inputs.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }
}

impl TimeSeries for AggregateSeries {
    fn is_empty(&self) -> bool {
        self.inputs.iter().all(|s| s.is_empty())
    }

    fn last(&self) -> Option<f64> {
        self.values().filter(|v| !v.is_nan()).last()
    }

    fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        let combine = self.combine;
        let mut iters: Vec<_> = self.inputs.iter().map(|s| s.values()).collect();
        Box::new(std::iter::from_fn(move || {
            let mut acc = f64::NAN;
            let mut exhausted = true;
            for it in iters.iter_mut() {
                if let Some(v) = it.next() {
                    exhausted = false;
                    acc = combine(acc, v);
                }
            }
            if exhausted {
                None
            } else {
                Some(acc)
            }
        }))
    }
}
