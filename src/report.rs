use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::aggregate_with_stats;
use crate::error::CalendarError;
use crate::models::{AggregationStats, MonthGrid, SummaryCounters};
use crate::summary::summarize;
use crate::timestamp::Timestamped;

/// Everything the presentation layer needs for one dashboard render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapReport {
    pub year: i32,
    pub reference_date: NaiveDate,
    pub grid: MonthGrid,
    pub summary: SummaryCounters,
    pub stats: AggregationStats,
}

pub fn build_report<R: Timestamped>(
    records: &[R],
    year: i32,
    reference_now: NaiveDate,
) -> Result<HeatmapReport, CalendarError> {
    let aggregation = aggregate_with_stats(records, year)?;
    Ok(HeatmapReport {
        year,
        reference_date: reference_now,
        grid: aggregation.grid,
        summary: summarize(records, reference_now),
        stats: aggregation.stats,
    })
}
