//! Chart and series composition for display.
//!
//! Charts are transient per-render objects: view code assembles them from
//! series handles, groups them, lets the group pick a default highlight,
//! then serializes and discards them. The serialized field names are a
//! compatibility contract with the display layer and never change.

mod chart;
mod group;

pub use chart::{Annotation, Chart, Series, Threshold};
pub use group::ChartGroup;
