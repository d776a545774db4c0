use axum::{extract::State, http::StatusCode, response::Json};
use common::ForecastSeries;
use compute::availability::daily_series;
use compute::default_forecaster;
use compute::error::ComputeError;
use tracing::{error, instrument};

use crate::helpers::converters::convert_dataframe_to_forecast;
use crate::schemas::{ApiResponse, AppState};

/// Get the availability forecast over the observed series plus the horizon
#[utoipa::path(
    get,
    path = "/api/v1/availability/forecast",
    tag = "availability",
    responses(
        (status = 200, description = "Availability forecast computed successfully", body = ApiResponse<ForecastSeries>),
        (status = 422, description = "Series too short to fit a forecast", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_availability_forecast(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastSeries>>, StatusCode> {
    // Never cached: each request refits the model from the full series.
    let series = match daily_series(&state.dataset.calendar) {
        Ok(df) => df,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    let forecaster = default_forecaster();
    let forecast_df = match forecaster.forecast(&series) {
        Ok(df) => df,
        Err(ComputeError::InsufficientHistory { needed, got }) => {
            error!(
                "Cannot forecast: {} observations available, {} required",
                got, needed
            );
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    let forecast = match convert_dataframe_to_forecast(forecast_df) {
        Ok(forecast) => forecast,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    let response = ApiResponse {
        data: forecast,
        message: "Availability forecast computed successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
