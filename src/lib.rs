//! Year-scoped weekly incident heatmap engine.
//!
//! Takes dated incident records and produces a fixed 12 month x 4 week grid
//! of counts, per-bucket intensity tiers and month/year summary counters.
//! All operations are pure; the caller supplies records and the reference
//! date.

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod ingest;
pub mod intensity;
pub mod models;
pub mod report;
pub mod summary;
pub mod timestamp;

pub use aggregate::{aggregate, aggregate_with_stats, ReshapePolicy};
pub use calendar::{build_weeks, label, week_of_month};
pub use error::{CalendarError, TimestampError};
pub use intensity::{classify, IntensityLevel};
pub use models::{
    Aggregation, AggregationStats, IncidentRecord, MonthGrid, MonthRow, SummaryCounters,
    WeekBucket, WeekKey, WeekSpan, MONTH_ABBREVIATIONS, WEEKS_PER_MONTH,
};
pub use report::{build_report, HeatmapReport};
pub use summary::{count_this_month, count_this_year, count_total, summarize, CounterKind};
pub use timestamp::{parse_timestamp, Timestamped};
