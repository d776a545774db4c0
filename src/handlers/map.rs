use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use common::ChoroplethMap;
use compute::availability::{distinct_dates, neighbourhood_daily};
use compute::choropleth::render_map;
use model::records::calendar::DATE_FORMAT;
use tracing::instrument;

use crate::schemas::{ApiResponse, AppState, CachedData, MapQuery};

/// Get the styled choropleth map for one date
#[utoipa::path(
    get,
    path = "/api/v1/availability/map",
    tag = "map",
    params(
        ("date" = String, Query, description = "Date to render (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Availability map retrieved successfully", body = ApiResponse<ChoroplethMap>),
        (status = 404, description = "No availability data for the requested date", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_availability_map(
    Query(query): Query<MapQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ChoroplethMap>>, StatusCode> {
    // Create cache key
    let cache_key = format!("map_{}", query.date);

    // Check cache first
    if let Some(CachedData::Map(map)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: map,
            message: "Availability map retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let by_neighbourhood =
        match neighbourhood_daily(&state.dataset.calendar, &state.dataset.listings) {
            Ok(df) => df,
            Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        };

    // Only dates actually present in the aggregation can be rendered
    let dates = match distinct_dates(&by_neighbourhood) {
        Ok(dates) => dates,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    if !dates.contains(&query.date) {
        return Err(StatusCode::NOT_FOUND);
    }

    let map = match render_map(&by_neighbourhood, &state.dataset.neighbourhoods, query.date) {
        Ok(map) => map,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Map(map.clone()))
        .await;

    let response = ApiResponse {
        data: map,
        message: "Availability map retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get the dates that can be rendered on the map
#[utoipa::path(
    get,
    path = "/api/v1/availability/dates",
    tag = "map",
    responses(
        (status = 200, description = "Available dates retrieved successfully", body = ApiResponse<Vec<String>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_available_dates(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, StatusCode> {
    let cache_key = "dates".to_string();

    // Check cache first
    if let Some(CachedData::Dates(dates)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: dates,
            message: "Available dates retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let by_neighbourhood =
        match neighbourhood_daily(&state.dataset.calendar, &state.dataset.listings) {
            Ok(df) => df,
            Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        };

    let dates = match distinct_dates(&by_neighbourhood) {
        Ok(dates) => dates,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    let formatted: Vec<String> = dates
        .into_iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect();

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Dates(formatted.clone()))
        .await;

    let response = ApiResponse {
        data: formatted,
        message: "Available dates retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
