use std::sync::Arc;

use chrono::NaiveDate;
use common::{
    AvailabilityPoint, AvailabilityTrend, ChoroplethMap, ForecastPoint, ForecastSeries, MapCenter,
    MapRegion, NeighbourhoodRanking, NeighbourhoodTotal, TooltipLabels,
};
use model::Dataset;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Loaded dataset, immutable for the process lifetime
    pub dataset: Arc<Dataset>,
    /// Cache for expensive operations
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Trend(AvailabilityTrend),
    Ranking(NeighbourhoodRanking),
    Dates(Vec<String>),
    Map(ChoroplethMap),
}

/// Query parameters for the map endpoint
#[derive(Debug, Deserialize, ToSchema)]
pub struct MapQuery {
    /// Date to render (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Loaded dataset summary
    pub dataset: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::trend::get_availability_trend,
        crate::handlers::neighbourhoods::get_neighbourhood_ranking,
        crate::handlers::forecast::get_availability_forecast,
        crate::handlers::map::get_availability_map,
        crate::handlers::map::get_available_dates,
    ),
    components(
        schemas(
            ApiResponse<AvailabilityTrend>,
            ApiResponse<NeighbourhoodRanking>,
            ApiResponse<ForecastSeries>,
            ApiResponse<ChoroplethMap>,
            ApiResponse<Vec<String>>,
            ErrorResponse,
            HealthResponse,
            MapQuery,
            AvailabilityTrend,
            AvailabilityPoint,
            NeighbourhoodRanking,
            NeighbourhoodTotal,
            ForecastSeries,
            ForecastPoint,
            ChoroplethMap,
            MapRegion,
            MapCenter,
            TooltipLabels,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "availability", description = "Availability analytics endpoints"),
        (name = "map", description = "Choropleth map endpoints"),
    ),
    info(
        title = "StayScope API",
        description = "Short-term rental availability dashboard API - aggregation, forecasting and map styling over public listing data",
        version = "0.1.0",
        contact(
            name = "StayScope Team",
            email = "contact@stayscope.dev"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
