use chrono::NaiveDate;
use common::{AvailabilityPoint, AvailabilityTrend, ForecastPoint, ForecastSeries};
use polars::prelude::AnyValue;

/// Helper function to convert the daily availability DataFrame to a trend DTO
pub fn convert_dataframe_to_trend(
    df: polars::prelude::DataFrame,
) -> Result<AvailabilityTrend, String> {
    let date_col = df
        .column("ds")
        .map_err(|e| format!("Missing ds column: {}", e))?;
    let count_col = df
        .column("y")
        .map_err(|e| format!("Missing y column: {}", e))?;

    let mut points = Vec::new();

    for i in 0..df.height() {
        let date = extract_date(
            date_col
                .get(i)
                .map_err(|e| format!("Error getting ds at row {}: {}", i, e))?,
            i,
        )?;

        let available = count_col
            .get(i)
            .map_err(|e| format!("Error getting y at row {}: {}", i, e))?
            .try_extract::<i64>()
            .map_err(|e| format!("Error extracting y as i64 at row {}: {}", i, e))?;

        points.push(AvailabilityPoint { date, available });
    }

    Ok(AvailabilityTrend::new(points))
}

/// Helper function to convert the forecaster output DataFrame to a forecast DTO
pub fn convert_dataframe_to_forecast(
    df: polars::prelude::DataFrame,
) -> Result<ForecastSeries, String> {
    let date_col = df
        .column("ds")
        .map_err(|e| format!("Missing ds column: {}", e))?;
    let predicted_col = df
        .column("yhat")
        .map_err(|e| format!("Missing yhat column: {}", e))?;
    let lower_col = df
        .column("yhat_lower")
        .map_err(|e| format!("Missing yhat_lower column: {}", e))?;
    let upper_col = df
        .column("yhat_upper")
        .map_err(|e| format!("Missing yhat_upper column: {}", e))?;

    let mut points = Vec::new();

    for i in 0..df.height() {
        let date = extract_date(
            date_col
                .get(i)
                .map_err(|e| format!("Error getting ds at row {}: {}", i, e))?,
            i,
        )?;

        let predicted = predicted_col
            .get(i)
            .map_err(|e| format!("Error getting yhat at row {}: {}", i, e))?
            .try_extract::<f64>()
            .map_err(|e| format!("Error extracting yhat as f64 at row {}: {}", i, e))?;

        let lower = lower_col
            .get(i)
            .map_err(|e| format!("Error getting yhat_lower at row {}: {}", i, e))?
            .try_extract::<f64>()
            .map_err(|e| format!("Error extracting yhat_lower as f64 at row {}: {}", i, e))?;

        let upper = upper_col
            .get(i)
            .map_err(|e| format!("Error getting yhat_upper at row {}: {}", i, e))?
            .try_extract::<f64>()
            .map_err(|e| format!("Error extracting yhat_upper as f64 at row {}: {}", i, e))?;

        points.push(ForecastPoint {
            date,
            predicted,
            lower,
            upper,
        });
    }

    Ok(ForecastSeries {
        horizon_days: compute::forecast::HORIZON_DAYS,
        points,
    })
}

/// Converts one Date cell (days since the Unix epoch) to a chrono date.
fn extract_date(value: AnyValue, row: usize) -> Result<NaiveDate, String> {
    match value {
        AnyValue::Date(days) => NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(i64::from(days))))
            .ok_or_else(|| format!("Invalid date value at row {}: {}", row, days)),
        other => Err(format!("Unexpected date value at row {}: {}", row, other)),
    }
}
