//! Line chart content from insight series.
//!
//! Insight series arrive column-oriented: each series is a list of
//! `(dateTime, value)` points. A line chart wants rows: one entry per
//! timestamp holding the value of every series at that time (or null when a
//! series has no point there).

use std::collections::{BTreeMap, HashMap};

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use sift_core::{Error, Result};
use tracing::debug;

/// Key of the timestamp column in chart rows.
pub const DATE_TIME_KEY: &str = "dateTime";

/// One dated value of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    /// RFC 3339 timestamp.
    pub date_time: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date_time: impl Into<String>, value: f64) -> Self {
        Self {
            date_time: date_time.into(),
            value,
        }
    }
}

/// A series identified by its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightDataSeries {
    pub label: String,
    pub points: Vec<DataPoint>,
}

/// Series data as returned for a search-based insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InsightData {
    pub series: Vec<InsightDataSeries>,
}

/// A series identified by the id of its definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexedSeriesData {
    pub series_id: String,
    pub label: String,
    pub points: Vec<DataPoint>,
}

/// User-facing definition of a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesDefinition {
    pub id: String,
    pub query: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

/// Chart type marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
}

/// One chart row: a timestamp and the value of every series at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartDatum {
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "dateTime")]
    pub date_time: i64,
    /// Value per series data key; `None` when the series has no point here.
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

/// How a series is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartSeries {
    pub data_key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
}

/// X axis description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XAxis {
    pub data_key: String,
    pub scale: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Default for XAxis {
    fn default() -> Self {
        Self {
            data_key: DATE_TIME_KEY.to_string(),
            scale: "time".to_string(),
            kind: "number".to_string(),
        }
    }
}

/// Everything a line chart needs to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineChartContent {
    pub chart: ChartKind,
    pub data: Vec<LineChartDatum>,
    pub series: Vec<LineChartSeries>,
    pub x_axis: XAxis,
}

/// Build line chart content from label-identified series.
///
/// Series `i` is keyed `series{i}`. Its display name and stroke come from the
/// definition with the same name as the series label, or else from the
/// definition at the same position.
///
/// # Errors
/// Returns [`Error::InvalidInput`] when a point's timestamp is not RFC 3339.
pub fn create_line_chart_content(
    data: &InsightData,
    definitions: &[SeriesDefinition],
) -> Result<LineChartContent> {
    let series = data
        .series
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let definition = definitions
                .iter()
                .find(|d| d.name == line.label)
                .or_else(|| definitions.get(index));
            (
                describe(format!("series{}", index), &line.label, definition),
                line.points.as_slice(),
            )
        })
        .collect();

    build_content(series)
}

/// Build line chart content from id-identified series.
///
/// Each series is keyed by its `series_id` and drawn with the definition of
/// the same id, falling back to its label when no definition matches.
///
/// # Errors
/// Returns [`Error::InvalidInput`] when a point's timestamp is not RFC 3339,
/// or when a `series_id` is `dateTime` and would collide with the timestamp
/// column.
pub fn create_line_chart_content_from_indexed_series(
    series: &[IndexedSeriesData],
    definitions: &[SeriesDefinition],
) -> Result<LineChartContent> {
    let series = series
        .iter()
        .map(|line| {
            if line.series_id == DATE_TIME_KEY {
                return Err(Error::InvalidInput(format!(
                    "Series id '{}' is reserved for the timestamp column",
                    DATE_TIME_KEY
                )));
            }
            let definition = definitions.iter().find(|d| d.id == line.series_id);
            Ok((
                describe(line.series_id.clone(), &line.label, definition),
                line.points.as_slice(),
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    build_content(series)
}

fn describe(data_key: String, label: &str, definition: Option<&SeriesDefinition>) -> LineChartSeries {
    LineChartSeries {
        data_key,
        name: definition.map_or_else(|| label.to_string(), |d| d.name.clone()),
        stroke: definition.and_then(|d| d.stroke.clone()),
    }
}

fn build_content(series: Vec<(LineChartSeries, &[DataPoint])>) -> Result<LineChartContent> {
    let empty_row: BTreeMap<String, Option<f64>> = series
        .iter()
        .map(|(s, _)| (s.data_key.clone(), None))
        .collect();

    let mut data: Vec<LineChartDatum> = Vec::new();
    let mut row_by_time: HashMap<i64, usize> = HashMap::new();

    for (line, points) in &series {
        for point in *points {
            let date_time = parse_millis(&point.date_time)?;
            let row = *row_by_time.entry(date_time).or_insert_with(|| {
                data.push(LineChartDatum {
                    date_time,
                    values: empty_row.clone(),
                });
                data.len() - 1
            });
            data[row]
                .values
                .insert(line.data_key.clone(), Some(point.value));
        }
    }

    debug!(
        component = "line_chart",
        series_count = series.len(),
        point_count = data.len(),
        "Built line chart content"
    );

    Ok(LineChartContent {
        chart: ChartKind::Line,
        data,
        series: series.into_iter().map(|(s, _)| s).collect(),
        x_axis: XAxis::default(),
    })
}

fn parse_millis(date_time: &str) -> Result<i64> {
    DateTime::parse_from_rfc3339(date_time)
        .map(|dt| dt.timestamp_millis())
        .map_err(|e| Error::InvalidInput(format!("Invalid timestamp '{}': {}", date_time, e)))
}
