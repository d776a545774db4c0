use axum::{extract::State, http::StatusCode, response::Json};
use common::NeighbourhoodRanking;
use compute::availability::{neighbourhood_daily, neighbourhood_ranking};
use tracing::instrument;

use crate::schemas::{ApiResponse, AppState, CachedData};

/// Get neighbourhoods ranked by total availability
#[utoipa::path(
    get,
    path = "/api/v1/availability/neighbourhoods",
    tag = "availability",
    responses(
        (status = 200, description = "Neighbourhood ranking retrieved successfully", body = ApiResponse<NeighbourhoodRanking>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_neighbourhood_ranking(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<NeighbourhoodRanking>>, StatusCode> {
    let cache_key = "neighbourhoods".to_string();

    // Check cache first
    if let Some(CachedData::Ranking(ranking)) = state.cache.get(&cache_key).await {
        let response = ApiResponse {
            data: ranking,
            message: "Neighbourhood ranking retrieved from cache".to_string(),
            success: true,
        };
        return Ok(Json(response));
    }

    let by_neighbourhood =
        match neighbourhood_daily(&state.dataset.calendar, &state.dataset.listings) {
            Ok(df) => df,
            Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        };

    let entries = match neighbourhood_ranking(&by_neighbourhood) {
        Ok(entries) => entries,
        Err(_) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
    };
    let ranking = NeighbourhoodRanking::new(entries);

    // Cache the result
    state
        .cache
        .insert(cache_key, CachedData::Ranking(ranking.clone()))
        .await;

    let response = ApiResponse {
        data: ranking,
        message: "Neighbourhood ranking retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}
