use chrono::NaiveDate;

/// Date format used across the input files and in every display string.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One availability observation: whether a listing is bookable on a date.
///
/// This is the source of truth for every derived view. Many records exist
/// per listing id, at most one per (listing, date) pair in the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRecord {
    /// Listing the observation belongs to.
    pub listing_id: i64,
    /// The calendar date observed.
    pub date: NaiveDate,
    /// Whether the listing is bookable on that date.
    pub available: bool,
}

impl CalendarRecord {
    /// Creates a new CalendarRecord.
    pub fn new(listing_id: i64, date: NaiveDate, available: bool) -> Self {
        Self {
            listing_id,
            date,
            available,
        }
    }
}

/// Normalizes the source file's two-valued availability code.
///
/// The raw files encode availability as `"t"` or `"f"`. Anything else is
/// rejected so that malformed rows fail the load instead of skewing counts.
pub fn parse_availability(value: &str) -> Option<bool> {
    match value {
        "t" => Some(true),
        "f" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_calendar_record() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let record = CalendarRecord::new(42, date, true);

        assert_eq!(record.listing_id, 42);
        assert_eq!(record.date, date);
        assert!(record.available);
    }

    #[test]
    fn test_parse_availability_accepts_t_and_f() {
        assert_eq!(parse_availability("t"), Some(true));
        assert_eq!(parse_availability("f"), Some(false));
    }

    #[test]
    fn test_parse_availability_rejects_everything_else() {
        assert_eq!(parse_availability(""), None);
        assert_eq!(parse_availability("true"), None);
        assert_eq!(parse_availability("T"), None);
        assert_eq!(parse_availability("F"), None);
        assert_eq!(parse_availability("1"), None);
    }

    #[test]
    fn test_date_format_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let rendered = date.format(DATE_FORMAT).to_string();
        assert_eq!(rendered, "2024-03-17");
        assert_eq!(
            NaiveDate::parse_from_str(&rendered, DATE_FORMAT).unwrap(),
            date
        );
    }
}
