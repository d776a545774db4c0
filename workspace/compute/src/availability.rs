//! Availability aggregations over the loaded calendar and listing tables.
//!
//! Every function here is pure: it reads the in-memory tables it is handed
//! and produces a new DataFrame or vector. DataFrames are the interchange
//! format between the aggregations, the forecaster and the API converters.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use common::NeighbourhoodTotal;
use model::records::calendar::CalendarRecord;
use model::records::listing::Listing;
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// One row of the per-neighbourhood daily aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourhoodDay {
    pub date: NaiveDate,
    pub neighbourhood: String,
    pub available: i64,
}

/// Sums availability per date over the whole calendar.
///
/// Output columns are named `ds` and `y` because the forecaster consumes the
/// frame by those names. Rows are sorted ascending by date and each date
/// appears exactly once.
#[instrument(skip(calendar), fields(num_records = calendar.len()))]
pub fn daily_series(calendar: &[CalendarRecord]) -> Result<DataFrame> {
    let mut totals: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in calendar {
        *totals.entry(record.date).or_insert(0) += i64::from(record.available);
    }

    let mut dates = Vec::with_capacity(totals.len());
    let mut counts = Vec::with_capacity(totals.len());
    for (date, count) in totals {
        dates.push(date);
        counts.push(count);
    }

    debug!(
        "Aggregated {} calendar records into {} daily points",
        calendar.len(),
        dates.len()
    );

    let df = DataFrame::new(vec![
        Series::new("ds".into(), dates).into(),
        Series::new("y".into(), counts).into(),
    ])?;

    Ok(df)
}

/// Sums availability per (date, neighbourhood) pair.
///
/// Calendar rows are joined to listings on the listing id to resolve the
/// neighbourhood. Rows whose listing id has no matching listing are dropped
/// silently; a matched row always creates its (date, neighbourhood) entry,
/// so a neighbourhood whose listings are all unavailable on a date shows up
/// with a count of zero rather than disappearing. Rows are sorted by date,
/// then neighbourhood name.
#[instrument(skip(calendar, listings), fields(num_records = calendar.len(), num_listings = listings.len()))]
pub fn neighbourhood_daily(calendar: &[CalendarRecord], listings: &[Listing]) -> Result<DataFrame> {
    let neighbourhood_by_listing: HashMap<i64, &str> = listings
        .iter()
        .map(|listing| (listing.id, listing.neighbourhood.as_str()))
        .collect();

    let mut totals: BTreeMap<(NaiveDate, &str), i64> = BTreeMap::new();
    let mut dropped = 0usize;
    for record in calendar {
        match neighbourhood_by_listing.get(&record.listing_id) {
            Some(neighbourhood) => {
                *totals.entry((record.date, neighbourhood)).or_insert(0) +=
                    i64::from(record.available);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {} calendar records without a matching listing",
            dropped
        );
    }

    let mut dates = Vec::with_capacity(totals.len());
    let mut neighbourhoods = Vec::with_capacity(totals.len());
    let mut counts = Vec::with_capacity(totals.len());
    for ((date, neighbourhood), count) in totals {
        dates.push(date);
        neighbourhoods.push(neighbourhood.to_string());
        counts.push(count);
    }

    let df = DataFrame::new(vec![
        Series::new("date".into(), dates).into(),
        Series::new("neighbourhood".into(), neighbourhoods).into(),
        Series::new("available".into(), counts).into(),
    ])?;

    Ok(df)
}

/// Ranks neighbourhoods by their availability total across all dates.
///
/// Ordered descending by total; equal totals fall back to neighbourhood name
/// ascending so the ranking is stable from run to run.
#[instrument(skip(neighbourhood_daily))]
pub fn neighbourhood_ranking(neighbourhood_daily: &DataFrame) -> Result<Vec<NeighbourhoodTotal>> {
    let rows = neighbourhood_rows(neighbourhood_daily)?;

    let mut totals: HashMap<String, i64> = HashMap::new();
    for row in rows {
        *totals.entry(row.neighbourhood).or_insert(0) += row.available;
    }

    let mut entries: Vec<NeighbourhoodTotal> = totals
        .into_iter()
        .map(|(neighbourhood, total)| NeighbourhoodTotal {
            neighbourhood,
            total,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.neighbourhood.cmp(&b.neighbourhood))
    });

    debug!("Ranked {} neighbourhoods", entries.len());

    Ok(entries)
}

/// Returns the distinct dates present in the per-neighbourhood aggregation,
/// sorted ascending.
#[instrument(skip(neighbourhood_daily))]
pub fn distinct_dates(neighbourhood_daily: &DataFrame) -> Result<Vec<NaiveDate>> {
    let mut dates = column_dates(neighbourhood_daily, "date")?;
    dates.sort_unstable();
    dates.dedup();
    Ok(dates)
}

/// Extracts the per-neighbourhood aggregation into typed rows.
pub fn neighbourhood_rows(neighbourhood_daily: &DataFrame) -> Result<Vec<NeighbourhoodDay>> {
    let dates = column_dates(neighbourhood_daily, "date")?;
    let neighbourhoods = column_str(neighbourhood_daily, "neighbourhood")?;
    let counts = column_i64(neighbourhood_daily, "available")?;

    Ok(dates
        .into_iter()
        .zip(neighbourhoods)
        .zip(counts)
        .map(|((date, neighbourhood), available)| NeighbourhoodDay {
            date,
            neighbourhood,
            available,
        })
        .collect())
}

/// Extracts a date column into chrono dates.
pub(crate) fn column_dates(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>> {
    let column = df.column(name)?;
    let mut dates = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        match column.get(i)? {
            AnyValue::Date(days) => {
                let date = NaiveDate::from_ymd_opt(1970, 1, 1)
                    .and_then(|epoch| epoch.checked_add_signed(Duration::days(i64::from(days))))
                    .ok_or_else(|| {
                        ComputeError::Date(format!(
                            "day offset {days} in column '{name}' is out of range"
                        ))
                    })?;
                dates.push(date);
            }
            other => {
                return Err(ComputeError::Series(format!(
                    "expected a date in column '{name}', got {other}"
                )));
            }
        }
    }
    Ok(dates)
}

/// Extracts an integer column as i64 values.
pub(crate) fn column_i64(df: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        match column.get(i)? {
            AnyValue::Int64(value) => values.push(value),
            AnyValue::Int32(value) => values.push(i64::from(value)),
            AnyValue::UInt32(value) => values.push(i64::from(value)),
            other => {
                return Err(ComputeError::Series(format!(
                    "expected an integer in column '{name}', got {other}"
                )));
            }
        }
    }
    Ok(values)
}

/// Extracts a string column into owned strings.
pub(crate) fn column_str(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(column.len());
    for i in 0..column.len() {
        match column.get(i)? {
            AnyValue::String(value) => values.push(value.to_string()),
            AnyValue::StringOwned(value) => values.push(value.to_string()),
            other => {
                return Err(ComputeError::Series(format!(
                    "expected a string in column '{name}', got {other}"
                )));
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_calendar() -> Vec<CalendarRecord> {
        vec![
            CalendarRecord::new(1, date(2024, 1, 1), true),
            CalendarRecord::new(2, date(2024, 1, 1), false),
            CalendarRecord::new(1, date(2024, 1, 2), true),
        ]
    }

    fn sample_listings() -> Vec<Listing> {
        vec![Listing::new(1, "A"), Listing::new(2, "B")]
    }

    #[test]
    fn test_daily_series_sums_per_date() {
        let df = daily_series(&sample_calendar()).unwrap();
        assert_eq!(df.shape(), (2, 2));

        let dates = column_dates(&df, "ds").unwrap();
        let counts = column_i64(&df, "y").unwrap();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
        assert_eq!(counts, vec![1, 1]);
    }

    #[test]
    fn test_daily_series_dates_unique_and_ascending() {
        let mut calendar = Vec::new();
        for day in (1..=9).rev() {
            for listing in 0..4 {
                calendar.push(CalendarRecord::new(listing, date(2024, 3, day), listing % 2 == 0));
            }
        }

        let df = daily_series(&calendar).unwrap();
        let dates = column_dates(&df, "ds").unwrap();
        assert_eq!(dates.len(), 9);
        for pair in dates.windows(2) {
            assert!(pair[0] < pair[1]);
        }

        let counts = column_i64(&df, "y").unwrap();
        let total: i64 = counts.iter().sum();
        let expected: i64 = calendar.iter().map(|r| i64::from(r.available)).sum();
        assert_eq!(total, expected);
    }

    #[test]
    fn test_daily_series_empty_calendar() {
        let df = daily_series(&[]).unwrap();
        assert_eq!(df.shape(), (0, 2));
    }

    #[test]
    fn test_neighbourhood_daily_keeps_zero_count_rows() {
        let df = neighbourhood_daily(&sample_calendar(), &sample_listings()).unwrap();
        let rows = neighbourhood_rows(&df).unwrap();

        // L2 is unavailable on 2024-01-01 but still joined, so B appears with
        // a zero count instead of vanishing.
        assert_eq!(
            rows,
            vec![
                NeighbourhoodDay {
                    date: date(2024, 1, 1),
                    neighbourhood: "A".to_string(),
                    available: 1,
                },
                NeighbourhoodDay {
                    date: date(2024, 1, 1),
                    neighbourhood: "B".to_string(),
                    available: 0,
                },
                NeighbourhoodDay {
                    date: date(2024, 1, 2),
                    neighbourhood: "A".to_string(),
                    available: 1,
                },
            ]
        );
    }

    #[test]
    fn test_neighbourhood_daily_drops_unmatched_listings() {
        let mut calendar = sample_calendar();
        calendar.push(CalendarRecord::new(99, date(2024, 1, 1), true));

        let df = neighbourhood_daily(&calendar, &sample_listings()).unwrap();
        let rows = neighbourhood_rows(&df).unwrap();

        // The record for the unknown listing contributes nowhere.
        let day_one: i64 = rows
            .iter()
            .filter(|row| row.date == date(2024, 1, 1))
            .map(|row| row.available)
            .sum();
        assert_eq!(day_one, 1);
        assert!(rows.iter().all(|row| row.neighbourhood != "99"));
    }

    #[test]
    fn test_neighbourhood_daily_matches_daily_series_for_matched_rows() {
        let calendar = vec![
            CalendarRecord::new(1, date(2024, 2, 1), true),
            CalendarRecord::new(2, date(2024, 2, 1), true),
            CalendarRecord::new(1, date(2024, 2, 2), false),
            CalendarRecord::new(2, date(2024, 2, 2), true),
        ];
        let listings = sample_listings();

        let by_neighbourhood = neighbourhood_daily(&calendar, &listings).unwrap();
        let rows = neighbourhood_rows(&by_neighbourhood).unwrap();

        let daily = daily_series(&calendar).unwrap();
        let dates = column_dates(&daily, "ds").unwrap();
        let counts = column_i64(&daily, "y").unwrap();

        for (day, expected) in dates.iter().zip(counts) {
            let across_neighbourhoods: i64 = rows
                .iter()
                .filter(|row| row.date == *day)
                .map(|row| row.available)
                .sum();
            assert_eq!(across_neighbourhoods, expected);
        }
    }

    #[test]
    fn test_ranking_follows_end_to_end_example() {
        let df = neighbourhood_daily(&sample_calendar(), &sample_listings()).unwrap();
        let ranking = neighbourhood_ranking(&df).unwrap();

        assert_eq!(
            ranking,
            vec![
                NeighbourhoodTotal {
                    neighbourhood: "A".to_string(),
                    total: 2,
                },
                NeighbourhoodTotal {
                    neighbourhood: "B".to_string(),
                    total: 0,
                },
            ]
        );
    }

    #[test]
    fn test_ranking_breaks_ties_by_name() {
        let calendar = vec![
            CalendarRecord::new(1, date(2024, 1, 1), true),
            CalendarRecord::new(2, date(2024, 1, 1), true),
            CalendarRecord::new(3, date(2024, 1, 1), true),
        ];
        let listings = vec![
            Listing::new(1, "Zaunkoenig"),
            Listing::new(2, "Altstadt"),
            Listing::new(3, "Moosach"),
        ];

        let df = neighbourhood_daily(&calendar, &listings).unwrap();
        let ranking = neighbourhood_ranking(&df).unwrap();

        let names: Vec<&str> = ranking
            .iter()
            .map(|entry| entry.neighbourhood.as_str())
            .collect();
        assert_eq!(names, vec!["Altstadt", "Moosach", "Zaunkoenig"]);

        let totals_sum: i64 = ranking.iter().map(|entry| entry.total).sum();
        assert_eq!(totals_sum, 3);
    }

    #[test]
    fn test_distinct_dates_sorted_ascending() {
        let df = neighbourhood_daily(&sample_calendar(), &sample_listings()).unwrap();
        let dates = distinct_dates(&df).unwrap();
        assert_eq!(dates, vec![date(2024, 1, 1), date(2024, 1, 2)]);
    }
}
