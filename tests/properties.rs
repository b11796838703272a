//! Property tests for the bucketing engine.

use chrono::{Datelike, Duration, NaiveDate};
use proptest::collection::vec;
use proptest::prelude::*;

use incident_heatmap::{
    aggregate, aggregate_with_stats, build_weeks, classify, count_this_year, week_of_month,
};

fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year")
}

fn dates_around(year: i32, offsets: &[i64]) -> Vec<NaiveDate> {
    offsets
        .iter()
        .map(|offset| jan_first(year) + Duration::days(*offset))
        .collect()
}

proptest! {
    /// Every day of the year sits inside exactly one generated week.
    #[test]
    fn weeks_cover_every_day_once(year in 1600i32..2400) {
        let weeks = build_weeks(year).expect("weeks");
        let mut day = jan_first(year);
        while day.year() == year {
            let holders = weeks.iter().filter(|week| week.contains(day)).count();
            prop_assert_eq!(holders, 1, "{}", day);
            day += Duration::days(1);
        }

        prop_assert!(weeks.first().expect("first").start <= jan_first(year));
        prop_assert!(weeks.last().expect("last").end.year() >= year);
        for pair in weeks.windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
    }

    /// The grid is 12x4 whatever the input.
    #[test]
    fn grid_shape_is_fixed(year in 1990i32..2060, offsets in vec(-400i64..800, 0..200)) {
        let records = dates_around(year, &offsets);
        let grid = aggregate(&records, year).expect("grid");

        prop_assert_eq!(grid.months.len(), 12);
        for row in grid.iter() {
            prop_assert_eq!(row.weeks.len(), 4);
        }
        prop_assert_eq!(grid.buckets().count(), 48);
    }

    /// Every record is accounted for exactly once, and the grid holds what
    /// was counted minus what reshaping dropped.
    #[test]
    fn stats_conserve_records(year in 1990i32..2060, offsets in vec(-400i64..800, 0..200)) {
        let records = dates_around(year, &offsets);
        let aggregation = aggregate_with_stats(&records, year).expect("aggregation");
        let stats = aggregation.stats;

        prop_assert_eq!(stats.total, records.len());
        prop_assert_eq!(
            stats.counted + stats.out_of_year + stats.unparseable + stats.unmatched,
            stats.total
        );
        prop_assert_eq!(aggregation.grid.total(), stats.counted - stats.truncated);
        prop_assert_eq!(stats.counted + stats.unmatched, count_this_year(&records, jan_first(year)));
    }

    /// Aggregation has no hidden state between calls.
    #[test]
    fn aggregation_is_idempotent(year in 1990i32..2060, offsets in vec(-400i64..800, 0..100)) {
        let records = dates_around(year, &offsets);
        let first = aggregate_with_stats(&records, year).expect("aggregation");
        let second = aggregate_with_stats(&records, year).expect("aggregation");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn intensity_is_monotonic(a in 0usize..10_000, b in 0usize..10_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low).index() <= classify(high).index());
    }

    /// Week-of-month advances by one every seven days inside a month.
    #[test]
    fn week_of_month_steps_weekly(offset in 0i64..3650) {
        let day = jan_first(2015) + Duration::days(offset);
        let next = day + Duration::days(7);
        prop_assert!(week_of_month(day) >= 1);
        prop_assert!(week_of_month(day) <= 6);
        if next.month() == day.month() {
            prop_assert_eq!(week_of_month(next), week_of_month(day) + 1);
        }
    }
}
