//! # topowatch-types
//!
//! Time-series contract types for infrastructure observability. This crate
//! defines the capability set topowatch consumes from a metric engine:
//! windowed sampling contexts, lazily-combined series, and NaN-aware scalar
//! reductions.
//!
//! ## Design Goals
//!
//! - **Engine agnostic**: charts and reports hold [`SeriesRef`] handles and
//!   never own or copy the underlying storage
//! - **Gap aware**: a sample grid may have holes; gaps are `f64::NAN` and
//!   every operation here skips them rather than propagating them
//! - **Lazy combination**: [`AggregateSeries`] registers inputs up front and
//!   combines them per timestamp only when read
//! - **Optional serialization**: enable the `serde` feature for the wire
//!   representations consumed by display layers
//!
//! ## Example
//!
//! ```rust
//! use topowatch_types::{nan_sum, reduce, AggregateSeries, MetricSeries, TimeSeries};
//!
//! let requests = MetricSeries::new(vec![1.0, 2.0, f64::NAN, 4.0]).into_ref();
//! assert_eq!(requests.last(), Some(4.0));
//! assert_eq!(reduce(nan_sum, requests.as_ref()), 7.0);
//!
//! let mut total = AggregateSeries::new(nan_sum);
//! total.add_input(requests);
//! total.add_input(MetricSeries::new(vec![10.0, 10.0, 10.0, 10.0]).into_ref());
//! assert_eq!(total.last(), Some(14.0));
//! ```

mod aggregate;
mod ops;
mod series;
mod time;

pub use aggregate::*;
pub use ops::*;
pub use series::*;
pub use time::*;
