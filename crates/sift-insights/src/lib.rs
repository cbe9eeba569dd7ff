//! # sift-insights
//!
//! Turns code insight time series (one series of dated counts per search
//! query) into the row-oriented content a line chart renders.
//!
//! ## Example
//!
//! ```
//! use sift_insights::{create_line_chart_content, InsightData, InsightDataSeries, DataPoint};
//!
//! let data = InsightData {
//!     series: vec![InsightDataSeries {
//!         label: "TODOs".to_string(),
//!         points: vec![DataPoint::new("2021-11-01T00:00:00Z", 42.0)],
//!     }],
//! };
//! let content = create_line_chart_content(&data, &[]).unwrap();
//! assert_eq!(content.data.len(), 1);
//! assert_eq!(content.series[0].data_key, "series0");
//! ```

pub mod line_chart;

// Re-export core types
pub use sift_core::{Error, Result};

pub use line_chart::{
    create_line_chart_content, create_line_chart_content_from_indexed_series, ChartKind,
    DataPoint, IndexedSeriesData, InsightData, InsightDataSeries, LineChartContent, LineChartDatum,
    LineChartSeries, SeriesDefinition, XAxis,
};
