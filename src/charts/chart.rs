//! A single chart: ordered series, display flags, annotations, and an
//! optional threshold line.

use serde::{Serialize, Serializer};

use topowatch_types::{
    AccumulateFn, AggregateSeries, Context, Named, SeriesRef, Time, TimeSeries,
};

/// A labeled time range drawn over a chart, e.g. a deploy or an outage.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub name: String,
    pub x1: Time,
    pub x2: Time,
    pub icon: String,
}

/// A named reference to an externally-owned series plus display hints.
///
/// The handle is shared, never owned: dropping the chart leaves the
/// underlying storage untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub color: Option<String>,
    pub fill: bool,
    #[serde(serialize_with = "serialize_series_data")]
    pub data: SeriesRef,
}

/// The single combinator series a chart's threshold line is drawn from.
///
/// Created lazily by the first threshold registration on a chart and only
/// ever extended afterwards; the per-timestamp combination is evaluated
/// when the chart is read, not when inputs are added.
#[derive(Debug, Serialize)]
pub struct Threshold {
    name: String,
    color: &'static str,
    fill: bool,
    #[serde(rename = "data", serialize_with = "serialize_threshold_data")]
    combinator: AggregateSeries,
}

impl Threshold {
    fn new(name: impl Into<String>, combine: AccumulateFn) -> Self {
        Self {
            name: name.into(),
            color: "black",
            fill: false,
            combinator: AggregateSeries::new(combine),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of series registered into the combinator so far.
    pub fn input_count(&self) -> usize {
        self.combinator.input_count()
    }
}

/// An ordered collection of series prepared for one rendered chart.
///
/// Configuration methods mutate one flag and return the receiver, so a
/// chart freshly obtained from its group can be set up in one chain:
///
/// ```
/// use topowatch::charts::Chart;
/// use topowatch_types::{Context, MetricSeries};
///
/// let mut chart = Chart::new(Context::default(), "Requests");
/// chart
///     .stacked()
///     .sorted()
///     .add_series("2xx", Some(MetricSeries::new(vec![1.0, 2.0]).into_ref()));
/// assert!(chart.is_stacked);
/// ```
#[derive(Debug, Serialize)]
pub struct Chart {
    pub ctx: Context,

    pub title: String,
    pub series: Vec<Series>,
    pub threshold: Option<Threshold>,
    pub featured: bool,
    #[serde(rename = "stacked")]
    pub is_stacked: bool,
    #[serde(rename = "sorted")]
    pub is_sorted: bool,
    #[serde(rename = "column")]
    pub is_column: bool,
    pub color_shift: i32,
    pub annotations: Vec<Annotation>,
}

impl Chart {
    /// An empty chart bound to a sampling context.
    pub fn new(ctx: Context, title: impl Into<String>) -> Self {
        Self {
            ctx,
            title: title.into(),
            series: Vec::new(),
            threshold: None,
            featured: false,
            is_stacked: false,
            is_sorted: false,
            is_column: false,
            color_shift: 0,
            annotations: Vec::new(),
        }
    }

    pub fn stacked(&mut self) -> &mut Self {
        self.is_stacked = true;
        self
    }

    pub fn sorted(&mut self) -> &mut Self {
        self.is_sorted = true;
        self
    }

    /// Columns are always rendered stacked.
    pub fn column(&mut self) -> &mut Self {
        self.is_column = true;
        self.is_stacked = true;
        self
    }

    pub fn shift_colors(&mut self) -> &mut Self {
        self.color_shift = 1;
        self
    }

    pub fn feature(&mut self) -> &mut Self {
        self.featured = true;
        self
    }

    pub fn add_annotation(
        &mut self,
        name: impl Into<String>,
        start: Time,
        end: Time,
        icon: impl Into<String>,
    ) -> &mut Self {
        self.annotations.push(Annotation {
            name: name.into(),
            x1: start,
            x2: end,
            icon: icon.into(),
        });
        self
    }

    /// Append a series referencing `data`.
    ///
    /// An absent or sample-less series is silently skipped: optional
    /// metrics are routinely missing and must not corrupt the chart or
    /// surface an error.
    pub fn add_series(&mut self, name: impl Into<String>, data: Option<SeriesRef>) -> &mut Self {
        self.push_series(name.into(), data, None)
    }

    /// Like [`add_series`](Chart::add_series), with a color override.
    pub fn add_series_with_color(
        &mut self,
        name: impl Into<String>,
        data: Option<SeriesRef>,
        color: impl Into<String>,
    ) -> &mut Self {
        self.push_series(name.into(), data, Some(color.into()))
    }

    /// Append one series per (name, series) pair, in order, with the same
    /// empty-skip rule as [`add_series`](Chart::add_series).
    pub fn add_many(&mut self, series: impl IntoIterator<Item = Named>) -> &mut Self {
        for named in series {
            self.add_series(named.name, Some(named.series));
        }
        self
    }

    /// Register `data` as one more input to the chart's threshold line.
    ///
    /// The first registration creates the single [`Threshold`] combinator
    /// with the given name and accumulator; later calls only add inputs,
    /// whatever name or accumulator they pass. Absent data is a no-op.
    pub fn set_threshold(
        &mut self,
        name: &str,
        data: Option<SeriesRef>,
        combine: AccumulateFn,
    ) -> &mut Self {
        let Some(data) = data else {
            return self;
        };
        self.threshold
            .get_or_insert_with(|| Threshold::new(name, combine))
            .combinator
            .add_input(data);
        self
    }

    fn push_series(&mut self, name: String, data: Option<SeriesRef>, color: Option<String>) -> &mut Self {
        let Some(data) = data else {
            return self;
        };
        if data.is_empty() {
            return self;
        }
        self.series.push(Series {
            name,
            color,
            fill: false,
            data,
        });
        self
    }
}

fn serialize_series_data<S: Serializer>(data: &SeriesRef, serializer: S) -> Result<S::Ok, S::Error> {
    serialize_samples(data.values(), serializer)
}

fn serialize_threshold_data<S: Serializer>(
    data: &AggregateSeries,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serialize_samples(data.values(), serializer)
}

// JSON has no NaN; gaps go out as null.
fn serialize_samples<S: Serializer>(
    values: impl Iterator<Item = f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.map(|v| if v.is_nan() { None } else { Some(v) }))
}
