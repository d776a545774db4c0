use axum::{extract::State, http::StatusCode, response::Json};
use common::AvailabilityTrend;
use compute::availability::daily_series;
use tracing::instrument;

use crate::helpers::converters::convert_dataframe_to_trend;
use crate::schemas::{ApiResponse, AppState, CachedData};

/// Get the city-wide daily availability trend
#[utoipa::path(
    get,
    path = "/api/v1/availability/trend",
    tag = "availability",
    responses(
        (status = 200, description = "Availability trend retrieved successfully", body = ApiResponse<AvailabilityTrend>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_availability_trend(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AvailabilityTrend>>, StatusCode> {
    let cache_key = "trend".to_string();

    // Check cache first
    if let Some(CachedData::Trend(trend)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: trend,
            message: "Availability trend retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    // Aggregate the calendar into the daily series
    let series = match daily_series(&state.dataset.calendar) {
        Ok(df) => df,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    let trend = match convert_dataframe_to_trend(series) {
        Ok(trend) => trend,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Trend(trend.clone()))
        .await;

    let response = ApiResponse {
        data: trend,
        message: "Availability trend retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
