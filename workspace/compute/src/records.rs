//! Conversions from loaded record types into Polars DataFrames.

use chrono::NaiveDate;
use model::records::prelude::*;
use polars::prelude::*;

/// Extension trait for converting calendar records into a DataFrame.
pub trait CalendarPolars {
    /// Builds a DataFrame with `listing_id`, `date` and `available` columns.
    ///
    /// Availability is emitted as 0/1 integers so that sums over the column
    /// stay plain `Int64` counts.
    fn to_df(&self) -> std::result::Result<DataFrame, PolarsError>;
}

impl CalendarPolars for [CalendarRecord] {
    fn to_df(&self) -> std::result::Result<DataFrame, PolarsError> {
        let mut listing_ids = Vec::with_capacity(self.len());
        let mut dates: Vec<NaiveDate> = Vec::with_capacity(self.len());
        let mut available = Vec::with_capacity(self.len());

        for record in self {
            listing_ids.push(record.listing_id);
            dates.push(record.date);
            available.push(i64::from(record.available));
        }

        DataFrame::new(vec![
            Series::new("listing_id".into(), listing_ids).into(),
            Series::new("date".into(), dates).into(),
            Series::new("available".into(), available).into(),
        ])
    }
}

/// Extension trait for converting listings into a DataFrame.
pub trait ListingPolars {
    /// Builds a DataFrame with `id` and `neighbourhood` columns.
    fn to_df(&self) -> std::result::Result<DataFrame, PolarsError>;
}

impl ListingPolars for [Listing] {
    fn to_df(&self) -> std::result::Result<DataFrame, PolarsError> {
        let mut ids = Vec::with_capacity(self.len());
        let mut neighbourhoods = Vec::with_capacity(self.len());

        for listing in self {
            ids.push(listing.id);
            neighbourhoods.push(listing.neighbourhood.clone());
        }

        DataFrame::new(vec![
            Series::new("id".into(), ids).into(),
            Series::new("neighbourhood".into(), neighbourhoods).into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn days_since_epoch(value: NaiveDate) -> i32 {
        (value - date(1970, 1, 1)).num_days() as i32
    }

    #[test]
    fn test_calendar_to_df() {
        let records = vec![
            CalendarRecord::new(10, date(2024, 1, 1), true),
            CalendarRecord::new(10, date(2024, 1, 2), false),
            CalendarRecord::new(20, date(2024, 1, 1), true),
        ];

        let df = records.to_df().unwrap();
        assert_eq!(df.shape(), (3, 3));

        let column_names = df.get_column_names();
        assert!(column_names.iter().any(|name| name.contains("listing_id")));
        assert!(column_names.iter().any(|name| name.contains("date")));
        assert!(column_names.iter().any(|name| name.contains("available")));

        let available = df.column("available").unwrap();
        assert_eq!(available.get(0).unwrap(), AnyValue::Int64(1));
        assert_eq!(available.get(1).unwrap(), AnyValue::Int64(0));

        let dates = df.column("date").unwrap();
        match dates.get(0).unwrap() {
            AnyValue::Date(days) => assert_eq!(days, days_since_epoch(date(2024, 1, 1))),
            other => panic!("expected a date value, got {other:?}"),
        }
    }

    #[test]
    fn test_calendar_to_df_empty() {
        let records: Vec<CalendarRecord> = Vec::new();
        let df = records.to_df().unwrap();
        assert_eq!(df.shape(), (0, 3));
    }

    #[test]
    fn test_listings_to_df() {
        let listings = vec![
            Listing::new(10, "Altstadt-Lehel"),
            Listing::new(20, "Schwabing-West"),
        ];

        let df = listings.to_df().unwrap();
        assert_eq!(df.shape(), (2, 2));

        let names = df.column("neighbourhood").unwrap();
        match names.get(0).unwrap() {
            AnyValue::String(name) => assert_eq!(name, "Altstadt-Lehel"),
            AnyValue::StringOwned(name) => assert_eq!(name.as_str(), "Altstadt-Lehel"),
            other => panic!("expected a string value, got {other:?}"),
        }
    }
}
