//! Titled chart collections and the default-highlight heuristic.

use std::cmp::Ordering;

use serde::Serialize;
use topowatch_types::{nan_sum, reduce, Context};
use tracing::debug;

use super::Chart;

/// Minimum lead the heaviest chart needs over the runner-up before it is
/// highlighted by default.
const FEATURE_WEIGHT_RATIO: f64 = 1.2;

/// A titled collection of charts, unique by exact title.
#[derive(Debug, Serialize)]
pub struct ChartGroup {
    pub title: String,
    pub charts: Vec<Chart>,
}

impl ChartGroup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            charts: Vec::new(),
        }
    }

    /// The chart with that exact title, created empty and appended if
    /// absent. Idempotent by title within the group.
    pub fn get_or_create_chart(&mut self, ctx: Context, title: &str) -> &mut Chart {
        let idx = match self.charts.iter().position(|c| c.title == title) {
            Some(idx) => idx,
            None => {
                self.charts.push(Chart::new(ctx, title));
                self.charts.len() - 1
            }
        };
        &mut self.charts[idx]
    }

    /// Highlight the chart carrying most of the group's signal, if any.
    ///
    /// Runs once per group, after all charts are added. A no-op for groups
    /// of fewer than two charts or when any chart is already featured -
    /// a manual choice is never overridden. Each chart's weight is the sum
    /// over its series of the gap-skipping whole-series sum; the heaviest
    /// chart is featured only when it leads the runner-up by more than
    /// the feature weight ratio.
    ///
    /// A zero runner-up makes the lead unbounded, so any positive top
    /// weight is featured. Two zero top weights mean an undefined ratio
    /// and nothing is featured; the division is never performed, so no
    /// NaN comparison can sneak in a highlight.
    pub fn auto_feature_chart(&mut self) {
        if self.charts.len() < 2 {
            return;
        }
        if self.charts.iter().any(|c| c.featured) {
            return;
        }

        let mut weighted: Vec<(usize, f64)> = self
            .charts
            .iter()
            .enumerate()
            .map(|(idx, chart)| {
                let weight: f64 = chart
                    .series
                    .iter()
                    .map(|s| reduce(nan_sum, s.data.as_ref()))
                    .sum();
                (idx, weight)
            })
            .collect();
        weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let (top_idx, top) = weighted[0];
        let (_, second) = weighted[1];

        let lead = if second == 0.0 {
            top > 0.0
        } else {
            top / second > FEATURE_WEIGHT_RATIO
        };
        if lead {
            debug!(
                group = %self.title,
                chart = %self.charts[top_idx].title,
                weight = top,
                "auto-featuring chart"
            );
            self.charts[top_idx].featured = true;
        }
    }
}
